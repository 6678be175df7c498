//! Error type for `recast-store-sqlite`.

use recast_core::{ImportError, sentence::SentenceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] recast_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to save or skip a sentence that does not exist.
  #[error("sentence not found: {0}")]
  NotFound(SentenceId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<ImportError> for Error {
  fn from(e: ImportError) -> Self { Self::Core(e.into()) }
}

impl From<Error> for recast_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(e) => e,
      Error::NotFound(id) => recast_core::Error::NotFound(id),
      other => recast_core::Error::storage(other),
    }
  }
}

//! Error types for `recast-core`.

use thiserror::Error;

use crate::sentence::SentenceId;

/// Why an import was rejected. An import that fails inserts nothing.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("missing required column {0:?}")]
  MissingColumn(String),

  #[error("no non-empty sentences to import")]
  NoValidRows,

  #[error("malformed input: {0}")]
  Malformed(String),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("import failed: {0}")]
  Import(#[from] ImportError),

  /// An id that the store never handed out, or that no longer exists.
  #[error("sentence not found: {0}")]
  NotFound(SentenceId),

  #[error("no sentence is currently displayed")]
  InvalidState,

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap any backend failure as [`Error::Storage`].
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

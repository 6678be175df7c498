//! Error types for the recast-csv codec.

use recast_core::ImportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required column {0:?}")]
  MissingColumn(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// The row source failed part-way through an export.
  #[error("reading rows: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for ImportError {
  fn from(e: Error) -> Self {
    match e {
      Error::MissingColumn(column) => ImportError::MissingColumn(column),
      Error::Io(io) => ImportError::Io(io),
      Error::Csv(e) => {
        let message = e.to_string();
        match e.into_kind() {
          csv::ErrorKind::Io(io) => ImportError::Io(io),
          _ => ImportError::Malformed(message),
        }
      }
      Error::Source(e) => ImportError::Malformed(e.to_string()),
    }
  }
}


//! CSV codec for recast.
//!
//! Reads the `sentence` column of an import file and writes the
//! `original,rewrite` export file. Pure synchronous; no database
//! dependencies. Files are opened and closed within each call.
//!
//! # Quick start
//!
//! ```no_run
//! let rows = recast_csv::read_sentences("sentence\nA cat sat.\n".as_bytes()).unwrap();
//! assert_eq!(rows, vec!["A cat sat.".to_string()]);
//! ```

pub mod error;
mod read;
mod write;

use std::{fs::File, path::Path};

pub use error::{Error, Result};
use recast_core::sentence::ExportRow;
use tempfile::NamedTempFile;

/// Header of the import column that holds sentence text.
pub const SENTENCE_COLUMN: &str = "sentence";

/// Header row of every export file.
pub const EXPORT_HEADER: [&str; 2] = ["original", "rewrite"];

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Read every value of the `sentence` column from `input`.
///
/// Values are returned as found, blanks included; trimming and blank-row
/// rejection happen at the store boundary.
pub fn read_sentences<R: std::io::Read>(input: R) -> Result<Vec<String>> {
  read::read_column(input, SENTENCE_COLUMN)
}

/// [`read_sentences`] over the file at `path`.
pub fn read_sentences_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
  let file = File::open(path)?;
  read_sentences(file)
}

/// Write the export header followed by one line per row. Returns the number
/// of rows written. Stops at the first row error.
pub fn write_export<W, I, E>(output: W, rows: I) -> Result<usize>
where
  W: std::io::Write,
  I: IntoIterator<Item = Result<ExportRow, E>>,
  E: std::error::Error + Send + Sync + 'static,
{
  write::write_rows(output, rows)
}

/// [`write_export`] to the file at `path`.
///
/// Rows go to a temporary file in the same directory, which replaces `path`
/// only once every row has been written. On error `path` is left as it was.
pub fn write_export_to_path<I, E>(path: impl AsRef<Path>, rows: I) -> Result<usize>
where
  I: IntoIterator<Item = Result<ExportRow, E>>,
  E: std::error::Error + Send + Sync + 'static,
{
  let path = path.as_ref();
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut staged = NamedTempFile::new_in(dir)?;
  let written = write_export(staged.as_file_mut(), rows)?;
  staged.persist(path).map_err(|e| e.error)?;
  Ok(written)
}

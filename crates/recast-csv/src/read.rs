//! Import side: pull one named column out of a CSV document.

use tracing::debug;

use crate::{Error, Result};

const BOM: char = '\u{feff}';

pub(crate) fn read_column<R: std::io::Read>(input: R, column: &str) -> Result<Vec<String>> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(input);

  let index = reader
    .headers()?
    .iter()
    .position(|h| h.trim_start_matches(BOM).trim() == column)
    .ok_or_else(|| Error::MissingColumn(column.to_owned()))?;

  let mut values = Vec::new();
  for record in reader.records() {
    let record = record?;
    // Short rows are treated as a blank cell.
    values.push(record.get(index).unwrap_or_default().to_owned());
  }

  debug!(column, rows = values.len(), "read csv column");
  Ok(values)
}

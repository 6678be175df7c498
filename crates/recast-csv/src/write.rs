//! Export side: stream `(original, rewrite)` rows into a CSV document.

use recast_core::sentence::ExportRow;
use tracing::debug;

use crate::{EXPORT_HEADER, Error, Result};

pub(crate) fn write_rows<W, I, E>(output: W, rows: I) -> Result<usize>
where
  W: std::io::Write,
  I: IntoIterator<Item = Result<ExportRow, E>>,
  E: std::error::Error + Send + Sync + 'static,
{
  let mut writer = csv::Writer::from_writer(output);
  writer.write_record(EXPORT_HEADER)?;

  let mut written = 0;
  for row in rows {
    let row = row.map_err(|e| Error::Source(Box::new(e)))?;
    writer.write_record([row.original.as_str(), row.rewrite.as_str()])?;
    written += 1;
  }
  writer.flush()?;

  debug!(rows = written, "wrote export");
  Ok(written)
}

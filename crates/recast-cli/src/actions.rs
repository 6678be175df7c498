//! File-backed session actions shared by the subcommands and the form.

use std::path::Path;

use recast_core::{ImportError, session::Session, store::SentenceStore};
use tracing::info;

/// Read the `sentence` column of `path` and import it. Nothing is inserted
/// unless the whole file reads cleanly and has at least one sentence.
pub fn import_file<S: SentenceStore>(
  session: &mut Session<S>,
  path: &Path,
) -> recast_core::Result<usize> {
  let rows = recast_csv::read_sentences_from_path(path).map_err(ImportError::from)?;
  let inserted = session.import(rows)?;
  info!(path = %path.display(), inserted, "imported csv");
  Ok(inserted)
}

/// Write every sentence (or only those with a non-empty rewrite) to `path`.
pub fn export_file<S: SentenceStore>(
  session: &Session<S>,
  path: &Path,
  rewritten_only: bool,
) -> recast_csv::Result<usize> {
  let export = session.export_rewrites();
  let rows = export
    .iter()
    .filter(|row| !rewritten_only || !matches!(row, Ok(r) if !r.has_rewrite()));
  let written = recast_csv::write_export_to_path(path, rows)?;
  info!(path = %path.display(), written, "exported csv");
  Ok(written)
}

//! Non-interactive subcommands.

use std::{
  io::{self, BufRead as _, Write as _},
  path::Path,
};

use anyhow::{Context as _, Result};
use recast_core::{session::Session, store::SentenceStore};

use crate::actions;

pub fn import<S: SentenceStore>(session: &mut Session<S>, file: &Path) -> Result<()> {
  let inserted = actions::import_file(session, file)
    .with_context(|| format!("importing {}", file.display()))?;
  println!("Imported {inserted} sentences from {}.", file.display());
  Ok(())
}

pub fn export<S: SentenceStore>(
  session: &Session<S>,
  file: &Path,
  rewritten_only: bool,
) -> Result<()> {
  let written = actions::export_file(session, file, rewritten_only)
    .with_context(|| format!("exporting to {}", file.display()))?;
  println!("Exported {written} rows to {}.", file.display());
  Ok(())
}

pub fn reset<S: SentenceStore>(session: &mut Session<S>, yes: bool) -> Result<()> {
  if !yes && !confirm("Reset the session? All rewrites will be cleared. [y/N] ")? {
    println!("Reset cancelled.");
    return Ok(());
  }
  session.reset().context("resetting session")?;
  println!("Session reset; every sentence is unseen again.");
  Ok(())
}

pub fn status<S: SentenceStore>(session: &Session<S>, json: bool) -> Result<()> {
  let progress = session.progress().context("reading progress")?;
  if json {
    println!("{}", serde_json::to_string_pretty(&progress)?);
  } else {
    println!(
      "Progress: {}/{} rewritten, {} unseen",
      progress.rewritten, progress.total, progress.unseen
    );
    if progress.is_complete() && progress.total > 0 {
      println!("All sentences completed. Reset the session or import more.");
    }
  }
  Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
  print!("{question}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

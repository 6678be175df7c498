//! The sentence record and the small value types derived from it.
//!
//! A sentence is created by import with only its original text. The user
//! later either saves a rewrite for it or skips it; both mark it seen. A reset
//! returns every sentence to the unseen pool and discards all rewrites.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ImportError;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned row id. Never reused or renumbered.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SentenceId(pub i64);

impl fmt::Display for SentenceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

// ─── Sentence ────────────────────────────────────────────────────────────────

/// One imported sentence and the user's rewrite of it, if any.
///
/// `rewrite` is `None` until a rewrite is saved. `Some("")` is a deliberate
/// blank rewrite. An unseen sentence never carries a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
  pub id:         SentenceId,
  pub original:   String,
  pub rewrite:    Option<String>,
  pub seen:       bool,
  pub created_at: DateTime<Utc>,
  /// Last time `rewrite` or `seen` changed; `None` if never touched.
  pub updated_at: Option<DateTime<Utc>>,
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// One line of an export. A missing rewrite exports as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
  pub id:       SentenceId,
  pub original: String,
  pub rewrite:  String,
}

impl ExportRow {
  pub fn has_rewrite(&self) -> bool { !self.rewrite.is_empty() }
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// Counters for the progress display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
  pub total:     u64,
  pub unseen:    u64,
  /// Sentences with a saved rewrite (blank rewrites included).
  pub rewritten: u64,
}

impl Progress {
  pub fn is_complete(&self) -> bool { self.unseen == 0 }
}

// ─── Import validation ───────────────────────────────────────────────────────

/// Trim every input string and drop the blank ones.
///
/// Duplicates are kept. Fails with [`ImportError::NoValidRows`] if nothing is
/// left, so callers can reject the whole import before touching storage.
pub fn prepare_import<I, T>(rows: I) -> Result<Vec<String>, ImportError>
where
  I: IntoIterator<Item = T>,
  T: AsRef<str>,
{
  let cleaned: Vec<String> = rows
    .into_iter()
    .filter_map(|row| {
      let trimmed = row.as_ref().trim();
      (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
    .collect();

  if cleaned.is_empty() {
    return Err(ImportError::NoValidRows);
  }
  Ok(cleaned)
}

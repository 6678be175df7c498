//! Conversions between domain types and the plain values stored in SQLite.
//!
//! Timestamps are stored as RFC 3339 strings; `seen` as 0/1.

use chrono::{DateTime, Utc};
use recast_core::sentence::{Sentence, SentenceId};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawSentence::from_row`].
pub const SENTENCE_COLUMNS: &str =
  "id, original, rewrite, seen, created_at, updated_at";

/// A `sentences` row before timestamp parsing.
pub struct RawSentence {
  pub id:         i64,
  pub original:   String,
  pub rewrite:    Option<String>,
  pub seen:       bool,
  pub created_at: String,
  pub updated_at: Option<String>,
}

impl RawSentence {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      original:   row.get(1)?,
      rewrite:    row.get(2)?,
      seen:       row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_sentence(self) -> Result<Sentence> {
    Ok(Sentence {
      id:         SentenceId(self.id),
      original:   self.original,
      rewrite:    self.rewrite,
      seen:       self.seen,
      created_at: decode_dt(&self.created_at)?,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

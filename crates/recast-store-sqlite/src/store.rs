//! [`SqliteStore`] — the SQLite implementation of [`SentenceStore`].

use std::path::Path;

use chrono::Utc;
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use recast_core::{
  sentence::{ExportRow, Sentence, SentenceId, prepare_import},
  store::SentenceStore,
};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{RawSentence, SENTENCE_COLUMNS, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A sentence store backed by a single SQLite file.
pub struct SqliteStore {
  conn: rusqlite::Connection,
  /// Source for unseen-sentence selection. System-seeded unless
  /// [`SqliteStore::with_seed`] is used.
  rng:  StdRng,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let conn = rusqlite::Connection::open(path)?;
    let store = Self::from_connection(conn)?;
    info!(path = %path.display(), "opened sentence store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_connection(rusqlite::Connection::open_in_memory()?)
  }

  /// Replace the selection RNG with one seeded from `seed`, making
  /// [`SentenceStore::next_unseen`] reproducible.
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.rng = StdRng::seed_from_u64(seed);
    self
  }

  fn from_connection(conn: rusqlite::Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn, rng: StdRng::from_os_rng() })
  }

  #[cfg(test)]
  pub(crate) fn conn(&self) -> &rusqlite::Connection { &self.conn }

  fn count(&self, sql: &str) -> Result<u64> {
    let n: i64 = self.conn.query_row(sql, [], |r| r.get(0))?;
    Ok(n as u64)
  }

  /// Run an UPDATE against one id, failing with `NotFound` if it matched no
  /// row.
  fn update_one(
    &self,
    id: SentenceId,
    sql: &str,
    params: impl rusqlite::Params,
  ) -> Result<()> {
    let changed = self.conn.execute(sql, params)?;
    if changed == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }
}

// ─── SentenceStore impl ──────────────────────────────────────────────────────

impl SentenceStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  fn import_sentences(&mut self, rows: Vec<String>) -> Result<usize> {
    let rows = prepare_import(rows)?;
    let now = encode_dt(Utc::now());

    // One transaction: either every row lands or none does.
    let tx = self.conn.transaction()?;
    {
      let mut stmt = tx.prepare_cached(
        "INSERT INTO sentences (original, created_at) VALUES (?1, ?2)",
      )?;
      for original in &rows {
        stmt.execute(rusqlite::params![original, now])?;
      }
    }
    tx.commit()?;

    info!(inserted = rows.len(), "imported sentences");
    Ok(rows.len())
  }

  fn save_rewrite(&mut self, id: SentenceId, rewrite: &str) -> Result<()> {
    let now = encode_dt(Utc::now());
    self.update_one(
      id,
      "UPDATE sentences SET rewrite = ?1, seen = 1, updated_at = ?2 WHERE id = ?3",
      rusqlite::params![rewrite, now, id.0],
    )
  }

  fn skip(&mut self, id: SentenceId) -> Result<()> {
    let now = encode_dt(Utc::now());
    self.update_one(
      id,
      "UPDATE sentences SET seen = 1, updated_at = ?1 WHERE id = ?2",
      rusqlite::params![now, id.0],
    )
  }

  fn reset_all(&mut self) -> Result<()> {
    let now = encode_dt(Utc::now());
    // Only touch rows that change, so a repeated reset is a no-op.
    let changed = self.conn.execute(
      "UPDATE sentences SET seen = 0, rewrite = NULL, updated_at = ?1
       WHERE seen = 1 OR rewrite IS NOT NULL",
      rusqlite::params![now],
    )?;
    info!(changed, "reset all sentences");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  fn next_unseen(&mut self) -> Result<Option<Sentence>> {
    let ids: Vec<i64> = {
      let mut stmt = self
        .conn
        .prepare_cached("SELECT id FROM sentences WHERE seen = 0 ORDER BY id")?;
      stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?
    };

    if ids.is_empty() {
      return Ok(None);
    }

    let picked = SentenceId(ids[self.rng.random_range(0..ids.len())]);
    debug!(id = %picked, pool = ids.len(), "picked unseen sentence");
    self.get(picked)
  }

  fn get(&self, id: SentenceId) -> Result<Option<Sentence>> {
    let raw: Option<RawSentence> = self
      .conn
      .query_row(
        &format!("SELECT {SENTENCE_COLUMNS} FROM sentences WHERE id = ?1"),
        rusqlite::params![id.0],
        RawSentence::from_row,
      )
      .optional()?;

    raw.map(RawSentence::into_sentence).transpose()
  }

  fn export_page(
    &self,
    after: Option<SentenceId>,
    limit: usize,
  ) -> Result<Vec<ExportRow>> {
    let after = after.map(|id| id.0);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let mut stmt = self.conn.prepare_cached(
      "SELECT id, original, COALESCE(rewrite, '')
       FROM sentences
       WHERE ?1 IS NULL OR id > ?1
       ORDER BY id
       LIMIT ?2",
    )?;
    let rows = stmt
      .query_map(rusqlite::params![after, limit], |row| {
        Ok(ExportRow {
          id:       SentenceId(row.get(0)?),
          original: row.get(1)?,
          rewrite:  row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
  }

  fn count_total(&self) -> Result<u64> { self.count("SELECT COUNT(*) FROM sentences") }

  fn count_unseen(&self) -> Result<u64> {
    self.count("SELECT COUNT(*) FROM sentences WHERE seen = 0")
  }

  fn count_rewritten(&self) -> Result<u64> {
    self.count("SELECT COUNT(*) FROM sentences WHERE rewrite IS NOT NULL")
  }
}

//! Session controller tests against a small in-memory store.

use chrono::Utc;

use crate::{
  Error, ImportError, Result,
  sentence::{ExportRow, Sentence, SentenceId, prepare_import},
  session::{Advance, Session, SessionState},
  store::SentenceStore,
};

// ─── Fake store ──────────────────────────────────────────────────────────────

/// Always hands out the lowest unseen id, so scenarios are deterministic.
#[derive(Default)]
struct MemoryStore {
  rows:    Vec<Sentence>,
  next_id: i64,
}

impl MemoryStore {
  fn row_mut(&mut self, id: SentenceId) -> Result<&mut Sentence> {
    self
      .rows
      .iter_mut()
      .find(|s| s.id == id)
      .ok_or(Error::NotFound(id))
  }
}

impl SentenceStore for MemoryStore {
  type Error = Error;

  fn import_sentences(&mut self, rows: Vec<String>) -> Result<usize> {
    let rows = prepare_import(rows)?;
    let count = rows.len();
    for original in rows {
      self.next_id += 1;
      self.rows.push(Sentence {
        id: SentenceId(self.next_id),
        original,
        rewrite: None,
        seen: false,
        created_at: Utc::now(),
        updated_at: None,
      });
    }
    Ok(count)
  }

  fn save_rewrite(&mut self, id: SentenceId, rewrite: &str) -> Result<()> {
    let row = self.row_mut(id)?;
    row.rewrite = Some(rewrite.to_owned());
    row.seen = true;
    row.updated_at = Some(Utc::now());
    Ok(())
  }

  fn skip(&mut self, id: SentenceId) -> Result<()> {
    let row = self.row_mut(id)?;
    row.seen = true;
    row.updated_at = Some(Utc::now());
    Ok(())
  }

  fn reset_all(&mut self) -> Result<()> {
    for row in &mut self.rows {
      row.seen = false;
      row.rewrite = None;
    }
    Ok(())
  }

  fn next_unseen(&mut self) -> Result<Option<Sentence>> {
    Ok(self.rows.iter().find(|s| !s.seen).cloned())
  }

  fn get(&self, id: SentenceId) -> Result<Option<Sentence>> {
    Ok(self.rows.iter().find(|s| s.id == id).cloned())
  }

  fn export_page(
    &self,
    after: Option<SentenceId>,
    limit: usize,
  ) -> Result<Vec<ExportRow>> {
    Ok(
      self
        .rows
        .iter()
        .filter(|s| after.is_none_or(|a| s.id > a))
        .take(limit)
        .map(|s| ExportRow {
          id:       s.id,
          original: s.original.clone(),
          rewrite:  s.rewrite.clone().unwrap_or_default(),
        })
        .collect(),
    )
  }

  fn count_total(&self) -> Result<u64> { Ok(self.rows.len() as u64) }

  fn count_unseen(&self) -> Result<u64> {
    Ok(self.rows.iter().filter(|s| !s.seen).count() as u64)
  }

  fn count_rewritten(&self) -> Result<u64> {
    Ok(self.rows.iter().filter(|s| s.rewrite.is_some()).count() as u64)
  }
}

fn session_with(rows: &[&str]) -> Session<MemoryStore> {
  let mut session = Session::new(MemoryStore::default());
  session
    .import(rows.iter().map(|r| r.to_string()).collect())
    .unwrap();
  session
}

// ─── State machine ───────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle() {
  let session = session_with(&["One."]);
  assert_eq!(session.state(), &SessionState::Idle);
  assert!(session.current().is_none());
}

#[test]
fn save_from_idle_is_invalid_state() {
  let mut session = session_with(&["One."]);
  let err = session.save("rewrite").unwrap_err();
  assert!(matches!(err, Error::InvalidState));
  assert_eq!(session.progress().unwrap().unseen, 1);
}

#[test]
fn skip_from_idle_is_invalid_state() {
  let mut session = session_with(&["One."]);
  assert!(matches!(session.skip(), Err(Error::InvalidState)));
}

#[test]
fn import_does_not_change_display_state() {
  let mut session = session_with(&["One."]);
  session.start_or_advance().unwrap();
  let shown = session.current().cloned();

  session.import(vec!["Two.".into()]).unwrap();
  assert_eq!(session.current().cloned(), shown);
}

#[test]
fn failed_import_leaves_table_unchanged() {
  let mut session = session_with(&["One."]);
  let err = session.import(vec!["  ".into(), String::new()]).unwrap_err();
  assert!(matches!(err, Error::Import(ImportError::NoValidRows)));
  assert_eq!(session.progress().unwrap().total, 1);
}

#[test]
fn advance_on_empty_store_completes() {
  let mut session = Session::new(MemoryStore::default());
  assert_eq!(session.start_or_advance().unwrap(), Advance::Completed);
  assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn reset_from_displaying_goes_idle() {
  let mut session = session_with(&["One."]);
  session.start_or_advance().unwrap();
  session.reset().unwrap();
  assert_eq!(session.state(), &SessionState::Idle);
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn save_skip_export_reset_scenario() {
  let mut session = session_with(&["A cat sat.", "A dog ran."]);
  let p = session.progress().unwrap();
  assert_eq!((p.total, p.unseen), (2, 2));

  let first = session.start_or_advance().unwrap();
  let first_id = first.sentence().unwrap().id;

  let second = session.save("A feline rested.").unwrap();
  assert_eq!(session.progress().unwrap().unseen, 1);
  let second_id = second.sentence().expect("one sentence left").id;
  assert_ne!(first_id, second_id);

  assert_eq!(session.skip().unwrap(), Advance::Completed);
  assert_eq!(session.progress().unwrap().unseen, 0);
  assert_eq!(session.state(), &SessionState::Idle);

  let rows: Vec<ExportRow> = session
    .export_rewrites()
    .iter()
    .collect::<Result<_>>()
    .unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows[0].id < rows[1].id);
  let saved = rows.iter().find(|r| r.id == first_id).unwrap();
  assert_eq!(saved.rewrite, "A feline rested.");
  let skipped = rows.iter().find(|r| r.id == second_id).unwrap();
  assert_eq!(skipped.rewrite, "");

  session.reset().unwrap();
  let p = session.progress().unwrap();
  assert_eq!((p.unseen, p.rewritten), (2, 0));
}

#[test]
fn saved_sentence_is_not_offered_again() {
  let mut session = session_with(&["One.", "Two.", "Three."]);
  let first = session.start_or_advance().unwrap().sentence().unwrap().id;
  session.save("1").unwrap();

  for _ in 0..5 {
    let next = session.start_or_advance().unwrap();
    assert_ne!(next.sentence().map(|s| s.id), Some(first));
  }
}

#[test]
fn blank_rewrite_is_recorded() {
  let mut session = session_with(&["One."]);
  let id = session.start_or_advance().unwrap().sentence().unwrap().id;
  session.save("").unwrap();

  let row = session.store().get(id).unwrap().unwrap();
  assert_eq!(row.rewrite.as_deref(), Some(""));
  assert!(row.seen);
  assert_eq!(session.progress().unwrap().rewritten, 1);
}

#[test]
fn skip_leaves_rewrite_null() {
  let mut session = session_with(&["One."]);
  let id = session.start_or_advance().unwrap().sentence().unwrap().id;
  session.skip().unwrap();

  let row = session.store().get(id).unwrap().unwrap();
  assert!(row.seen);
  assert!(row.rewrite.is_none());
}

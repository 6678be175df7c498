//! A store that fails on demand, for driving error paths in tests.

use recast_core::{
  sentence::{ExportRow, Sentence, SentenceId},
  store::SentenceStore,
};
use recast_store_sqlite::{Error, Result, SqliteStore};

pub struct FailingStore {
  inner: SqliteStore,
  /// Successful `next_unseen` calls left before it starts failing.
  pub unseen_budget: Option<usize>,
  /// Fail every export page after the first.
  pub fail_later_pages: bool,
}

impl FailingStore {
  pub fn new(inner: SqliteStore) -> Self {
    Self { inner, unseen_budget: None, fail_later_pages: false }
  }
}

fn gone() -> Error { Error::Io(std::io::Error::other("disk gone")) }

impl SentenceStore for FailingStore {
  type Error = Error;

  fn import_sentences(&mut self, rows: Vec<String>) -> Result<usize> {
    self.inner.import_sentences(rows)
  }

  fn save_rewrite(&mut self, id: SentenceId, rewrite: &str) -> Result<()> {
    self.inner.save_rewrite(id, rewrite)
  }

  fn skip(&mut self, id: SentenceId) -> Result<()> { self.inner.skip(id) }

  fn reset_all(&mut self) -> Result<()> { self.inner.reset_all() }

  fn next_unseen(&mut self) -> Result<Option<Sentence>> {
    if let Some(budget) = self.unseen_budget.as_mut() {
      if *budget == 0 {
        return Err(gone());
      }
      *budget -= 1;
    }
    self.inner.next_unseen()
  }

  fn get(&self, id: SentenceId) -> Result<Option<Sentence>> { self.inner.get(id) }

  fn export_page(
    &self,
    after: Option<SentenceId>,
    limit: usize,
  ) -> Result<Vec<ExportRow>> {
    if self.fail_later_pages && after.is_some() {
      return Err(gone());
    }
    self.inner.export_page(after, limit)
  }

  fn count_total(&self) -> Result<u64> { self.inner.count_total() }

  fn count_unseen(&self) -> Result<u64> { self.inner.count_unseen() }

  fn count_rewritten(&self) -> Result<u64> { self.inner.count_rewritten() }
}

//! The `SentenceStore` trait and the restartable export sequence.
//!
//! The trait is implemented by storage backends (e.g. `recast-store-sqlite`).
//! [`crate::session::Session`] is the only caller in the application; front
//! ends go through the session.

use std::collections::VecDeque;

use crate::sentence::{ExportRow, Progress, Sentence, SentenceId};

/// Rows fetched per round trip while iterating an [`Export`].
pub const EXPORT_PAGE_SIZE: usize = 256;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a sentence store backend.
///
/// Every mutating method commits before returning; a failed call leaves no
/// partial write behind. Backend errors must convert into the core
/// [`crate::Error`] taxonomy so the session can surface them uniformly.
pub trait SentenceStore {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert one unseen sentence per non-blank (trimmed) row.
  ///
  /// Duplicates are allowed. Returns the number of sentences inserted. If no
  /// row survives trimming, fails with
  /// [`ImportError::NoValidRows`](crate::ImportError::NoValidRows) and
  /// inserts nothing.
  fn import_sentences(&mut self, rows: Vec<String>) -> Result<usize, Self::Error>;

  /// Record `rewrite` for `id` and mark it seen. An empty `rewrite` is stored
  /// as-is. Fails with [`crate::Error::NotFound`] for an unknown id.
  fn save_rewrite(&mut self, id: SentenceId, rewrite: &str) -> Result<(), Self::Error>;

  /// Mark `id` seen without touching its rewrite. Fails with
  /// [`crate::Error::NotFound`] for an unknown id.
  fn skip(&mut self, id: SentenceId) -> Result<(), Self::Error>;

  /// Return every sentence to the unseen pool and clear all rewrites.
  /// Idempotent.
  fn reset_all(&mut self) -> Result<(), Self::Error>;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Pick one unseen sentence uniformly at random, or `None` when the unseen
  /// set is empty. Selection alone never marks anything seen.
  fn next_unseen(&mut self) -> Result<Option<Sentence>, Self::Error>;

  /// Fetch a sentence by id.
  fn get(&self, id: SentenceId) -> Result<Option<Sentence>, Self::Error>;

  /// Up to `limit` export rows with `id > after`, in ascending id order.
  fn export_page(
    &self,
    after: Option<SentenceId>,
    limit: usize,
  ) -> Result<Vec<ExportRow>, Self::Error>;

  fn count_total(&self) -> Result<u64, Self::Error>;

  fn count_unseen(&self) -> Result<u64, Self::Error>;

  /// Sentences with a non-null rewrite.
  fn count_rewritten(&self) -> Result<u64, Self::Error>;

  // ── Provided ──────────────────────────────────────────────────────────

  fn progress(&self) -> Result<Progress, Self::Error> {
    Ok(Progress {
      total:     self.count_total()?,
      unseen:    self.count_unseen()?,
      rewritten: self.count_rewritten()?,
    })
  }

  /// All sentences as `(original, rewrite)` rows, ordered by id.
  fn export_rewrites(&self) -> Export<'_, Self>
  where
    Self: Sized,
  {
    Export::new(self)
  }
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// A lazy, restartable view over every sentence in id order.
///
/// Each call to [`Export::iter`] starts again from the lowest id and pages
/// through the store with keyset pagination. Iterating has no side effects.
#[derive(Debug)]
pub struct Export<'a, S> {
  store:     &'a S,
  page_size: usize,
}

impl<S> Clone for Export<'_, S> {
  fn clone(&self) -> Self { *self }
}

impl<S> Copy for Export<'_, S> {}

impl<'a, S: SentenceStore> Export<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store, page_size: EXPORT_PAGE_SIZE }
  }

  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  pub fn iter(&self) -> ExportIter<'a, S> {
    ExportIter {
      store:     self.store,
      page_size: self.page_size,
      after:     None,
      buffer:    VecDeque::new(),
      done:      false,
    }
  }
}

impl<'a, S: SentenceStore> IntoIterator for &Export<'a, S> {
  type IntoIter = ExportIter<'a, S>;
  type Item = Result<ExportRow, S::Error>;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Iterator returned by [`Export::iter`]. Stops after the first error.
pub struct ExportIter<'a, S> {
  store:     &'a S,
  page_size: usize,
  after:     Option<SentenceId>,
  buffer:    VecDeque<ExportRow>,
  done:      bool,
}

impl<S: SentenceStore> Iterator for ExportIter<'_, S> {
  type Item = Result<ExportRow, S::Error>;

  fn next(&mut self) -> Option<Self::Item> {
    if let Some(row) = self.buffer.pop_front() {
      return Some(Ok(row));
    }
    if self.done {
      return None;
    }

    match self.store.export_page(self.after, self.page_size) {
      Ok(page) => {
        // A short page means the store has nothing past it.
        if page.len() < self.page_size {
          self.done = true;
        }
        if let Some(last) = page.last() {
          self.after = Some(last.id);
        }
        self.buffer.extend(page);
        self.buffer.pop_front().map(Ok)
      }
      Err(e) => {
        self.done = true;
        Some(Err(e))
      }
    }
  }
}

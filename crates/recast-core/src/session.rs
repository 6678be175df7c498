//! The session controller: which sentence is on screen, and what the user
//! may do next.
//!
//! ```text
//!            start_or_advance / save / skip
//!   Idle ────────────────────────────────▶ Displaying(sentence)
//!    ▲  ◀── (unseen set empty) ──────────        │
//!    └──────────────── reset ────────────────────┘
//! ```
//!
//! The session owns its store. Front ends only see the text to show and the
//! "completed" signal; they never decide what gets persisted.

use tracing::debug;

use crate::{
  Error, Result,
  sentence::{Progress, Sentence, SentenceId},
  store::{Export, SentenceStore},
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
  /// Nothing on screen: either not started, reset, or the unseen set ran out.
  Idle,
  /// A sentence has been fetched and is awaiting save or skip.
  Displaying(Sentence),
}

/// What the view should show after an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
  Showing(Sentence),
  /// The unseen set is empty. Nothing more until a reset or a new import.
  Completed,
}

impl Advance {
  pub fn sentence(&self) -> Option<&Sentence> {
    match self {
      Self::Showing(s) => Some(s),
      Self::Completed => None,
    }
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub struct Session<S> {
  store: S,
  state: SessionState,
}

impl<S: SentenceStore> Session<S> {
  /// Wrap `store` in an idle session. Call [`Session::start_or_advance`] to
  /// display the first sentence.
  pub fn new(store: S) -> Self {
    Self { store, state: SessionState::Idle }
  }

  pub fn state(&self) -> &SessionState { &self.state }

  /// The sentence currently on screen, if any.
  pub fn current(&self) -> Option<&Sentence> {
    match &self.state {
      SessionState::Displaying(s) => Some(s),
      SessionState::Idle => None,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Transitions ─────────────────────────────────────────────────────────

  /// Fetch a random unseen sentence and display it, or go idle and report
  /// completion.
  pub fn start_or_advance(&mut self) -> Result<Advance> {
    let next = self.store.next_unseen().map_err(Into::<Error>::into)?;
    match next {
      Some(sentence) => {
        debug!(id = %sentence.id, "displaying sentence");
        self.state = SessionState::Displaying(sentence.clone());
        Ok(Advance::Showing(sentence))
      }
      None => {
        debug!("unseen set exhausted");
        self.state = SessionState::Idle;
        Ok(Advance::Completed)
      }
    }
  }

  /// Save `text` as the rewrite of the displayed sentence, then advance.
  pub fn save(&mut self, text: &str) -> Result<Advance> {
    let id = self.displayed_id()?;
    self.store.save_rewrite(id, text).map_err(Into::<Error>::into)?;
    debug!(%id, "rewrite saved");
    self.state = SessionState::Idle;
    self.start_or_advance()
  }

  /// Mark the displayed sentence seen without a rewrite, then advance.
  pub fn skip(&mut self) -> Result<Advance> {
    let id = self.displayed_id()?;
    self.store.skip(id).map_err(Into::<Error>::into)?;
    debug!(%id, "sentence skipped");
    self.state = SessionState::Idle;
    self.start_or_advance()
  }

  /// Clear every rewrite and return all sentences to the unseen pool.
  pub fn reset(&mut self) -> Result<()> {
    self.store.reset_all().map_err(Into::<Error>::into)?;
    self.state = SessionState::Idle;
    debug!("session reset");
    Ok(())
  }

  /// Import `rows` as new unseen sentences. The display state is unchanged.
  pub fn import(&mut self, rows: Vec<String>) -> Result<usize> {
    let inserted = self.store.import_sentences(rows).map_err(Into::<Error>::into)?;
    debug!(inserted, "sentences imported");
    Ok(inserted)
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  pub fn progress(&self) -> Result<Progress> {
    self.store.progress().map_err(Into::into)
  }

  pub fn export_rewrites(&self) -> Export<'_, S> { self.store.export_rewrites() }

  fn displayed_id(&self) -> Result<SentenceId> {
    self.current().map(|s| s.id).ok_or(Error::InvalidState)
  }
}

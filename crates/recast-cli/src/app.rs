//! Application state machine and event dispatcher for the practice form.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recast_core::{
  sentence::{Progress, SentenceId},
  session::{Advance, Session},
  store::SentenceStore,
};
use tracing::{error, warn};

use crate::actions;

/// Prefilled path in the export prompt.
const DEFAULT_EXPORT_PATH: &str = "rewrites.csv";

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Reading the original and typing the rewrite.
  Practice,
  /// Typing a file path for an import or export.
  Prompt(PromptKind),
  /// Waiting for y/n before a reset.
  ConfirmReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
  Import,
  Export,
}

/// Last notification shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  None,
  Info(String),
  Error(String),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level form state. Owns the session, which owns the store.
pub struct App<S> {
  pub screen: Screen,

  pub session: Session<S>,

  /// Counters shown in the header; refreshed after every action.
  pub progress: Progress,

  /// The user's rewrite, as typed so far.
  pub rewrite: String,

  /// Path being typed in the import/export prompt.
  pub input: String,

  pub notice: Notice,
}

impl<S: SentenceStore> App<S> {
  pub fn new(session: Session<S>) -> Self {
    Self {
      screen: Screen::Practice,
      session,
      progress: Progress::default(),
      rewrite: String::new(),
      input: String::new(),
      notice: Notice::None,
    }
  }

  /// The text for the original pane: the current sentence, or `None` once
  /// the unseen set is exhausted.
  pub fn original(&self) -> Option<&str> {
    self.session.current().map(|s| s.original.as_str())
  }

  fn displayed_id(&self) -> Option<SentenceId> { self.session.current().map(|s| s.id) }

  // ── Session actions ───────────────────────────────────────────────────────

  /// Show the first sentence. Called once before the event loop.
  pub fn start(&mut self) {
    let result = self.session.start_or_advance();
    self.after_advance(result);
  }

  fn save(&mut self) {
    if self.session.current().is_none() {
      self.notice = Notice::Error("Nothing to save. Import sentences or reset the session.".into());
      return;
    }
    let text = self.rewrite.trim().to_owned();
    if text.is_empty() {
      self.notice = Notice::Error("Please write something before saving.".into());
      return;
    }
    let shown = self.displayed_id();
    let result = self.session.save(&text);
    // The rewrite is stored once the sentence has left the screen, even if
    // the advance after it failed.
    if self.displayed_id() != shown {
      self.rewrite.clear();
    }
    if result.is_ok() {
      self.notice = Notice::Info("Saved.".into());
    }
    self.after_advance(result);
  }

  fn skip(&mut self) {
    if self.session.current().is_none() {
      self.notice = Notice::Error("Nothing to skip.".into());
      return;
    }
    let shown = self.displayed_id();
    let result = self.session.skip();
    if self.displayed_id() != shown {
      self.rewrite.clear();
    }
    if result.is_ok() {
      self.notice = Notice::Info("Skipped.".into());
    }
    self.after_advance(result);
  }

  fn reset(&mut self) {
    match self.session.reset() {
      Ok(()) => {
        self.rewrite.clear();
        self.notice = Notice::Info("Session reset.".into());
        self.start();
      }
      Err(e) => self.fail("Reset failed", &e),
    }
  }

  fn import(&mut self, path: PathBuf) {
    match actions::import_file(&mut self.session, &path) {
      Ok(n) => {
        self.notice = Notice::Info(format!("Imported {n} sentences."));
        // The session keeps whatever is on screen; fill an empty screen.
        if self.session.current().is_none() {
          self.start();
        } else {
          self.refresh_progress();
        }
      }
      Err(e) => self.fail("Import failed", &e),
    }
  }

  fn export(&mut self, path: PathBuf) {
    match actions::export_file(&self.session, &path, false) {
      Ok(n) => {
        self.notice = Notice::Info(format!("Exported {n} rows to {}.", path.display()));
      }
      Err(e) => self.fail("Export failed", &e),
    }
  }

  fn after_advance(&mut self, result: recast_core::Result<Advance>) {
    match result {
      Ok(Advance::Showing(_)) => {}
      Ok(Advance::Completed) => {
        if !matches!(self.notice, Notice::Error(_)) {
          self.notice = Notice::Info("All sentences completed.".into());
        }
      }
      Err(e) => self.fail("Could not load the next sentence", &e),
    }
    self.refresh_progress();
  }

  fn refresh_progress(&mut self) {
    match self.session.progress() {
      Ok(p) => self.progress = p,
      Err(e) => warn!(error = %e, "could not refresh progress"),
    }
  }

  fn fail(&mut self, what: &str, e: &dyn std::error::Error) {
    error!(error = %e, "{what}");
    self.notice = Notice::Error(format!("{what}: {e}"));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::Practice => self.handle_practice_key(key),
      Screen::Prompt(kind) => {
        self.handle_prompt_key(kind, key);
        true
      }
      Screen::ConfirmReset => {
        self.handle_confirm_key(key);
        true
      }
    }
  }

  fn handle_practice_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('s') => self.save(),
        KeyCode::Char('n') => self.skip(),
        KeyCode::Char('o') => self.open_prompt(PromptKind::Import),
        KeyCode::Char('e') => self.open_prompt(PromptKind::Export),
        KeyCode::Char('r') => self.screen = Screen::ConfirmReset,
        _ => {}
      }
      return true;
    }

    match key.code {
      KeyCode::Esc => return false,
      KeyCode::Enter => self.rewrite.push('\n'),
      KeyCode::Backspace => {
        self.rewrite.pop();
      }
      KeyCode::Char(c) => self.rewrite.push(c),
      _ => {}
    }
    true
  }

  fn open_prompt(&mut self, kind: PromptKind) {
    self.input = match kind {
      PromptKind::Import => String::new(),
      PromptKind::Export => DEFAULT_EXPORT_PATH.to_owned(),
    };
    self.screen = Screen::Prompt(kind);
  }

  fn handle_prompt_key(&mut self, kind: PromptKind, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input.clear();
        self.screen = Screen::Practice;
      }
      KeyCode::Enter => {
        let path = self.input.trim().to_owned();
        if path.is_empty() {
          return;
        }
        self.input.clear();
        self.screen = Screen::Practice;
        let path = crate::settings::expand_tilde(Path::new(&path));
        match kind {
          PromptKind::Import => self.import(path),
          PromptKind::Export => self.export(path),
        }
      }
      KeyCode::Backspace => {
        self.input.pop();
      }
      KeyCode::Char(c) => self.input.push(c),
      _ => {}
    }
  }

  fn handle_confirm_key(&mut self, key: KeyEvent) {
    self.screen = Screen::Practice;
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
      self.reset();
    } else {
      self.notice = Notice::Info("Reset cancelled.".into());
    }
  }
}

#[cfg(test)]
mod tests {
  use recast_store_sqlite::SqliteStore;

  use super::*;
  use crate::testing::FailingStore;

  fn app(rows: &[&str]) -> App<SqliteStore> {
    let mut session = Session::new(SqliteStore::open_in_memory().unwrap().with_seed(5));
    if !rows.is_empty() {
      session
        .import(rows.iter().map(|r| r.to_string()).collect())
        .unwrap();
    }
    let mut app = App::new(session);
    app.start();
    app
  }

  fn press<S: SentenceStore>(app: &mut App<S>, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn ctrl<S: SentenceStore>(app: &mut App<S>, c: char) -> bool {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
  }

  fn type_str<S: SentenceStore>(app: &mut App<S>, s: &str) {
    for c in s.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  #[test]
  fn start_shows_a_sentence() {
    let app = app(&["One.", "Two."]);
    assert!(app.original().is_some());
    assert_eq!(app.progress.total, 2);
  }

  #[test]
  fn empty_store_shows_completion() {
    let app = app(&[]);
    assert!(app.original().is_none());
    assert_eq!(app.progress, Progress::default());
    assert_eq!(app.notice, Notice::Info("All sentences completed.".into()));
  }

  #[test]
  fn typing_and_saving_advances() {
    let mut app = app(&["One.", "Two."]);
    type_str(&mut app, "  Uno. ");
    assert!(ctrl(&mut app, 's'));

    assert!(app.rewrite.is_empty());
    assert_eq!(app.progress.unseen, 1);
    assert_eq!(app.progress.rewritten, 1);
    assert!(app.original().is_some());
  }

  #[test]
  fn editor_clears_when_save_lands_but_advance_fails() {
    let mut inner = SqliteStore::open_in_memory().unwrap().with_seed(5);
    inner
      .import_sentences(vec!["One.".into(), "Two.".into()])
      .unwrap();
    let mut store = FailingStore::new(inner);
    // Enough for the first sentence only.
    store.unseen_budget = Some(1);

    let mut app = App::new(Session::new(store));
    app.start();
    assert!(app.original().is_some());

    type_str(&mut app, "Uno.");
    assert!(ctrl(&mut app, 's'));

    assert!(app.rewrite.is_empty());
    assert!(app.original().is_none());
    assert!(matches!(app.notice, Notice::Error(_)));
    assert_eq!(app.progress.rewritten, 1);
  }

  #[test]
  fn editor_keeps_text_when_nothing_was_saved() {
    let mut app = app(&["One."]);
    type_str(&mut app, "Uno.");
    app.session.reset().unwrap();
    // Idle now: save is refused before it reaches the store.
    ctrl(&mut app, 's');
    assert_eq!(app.rewrite, "Uno.");
  }

  #[test]
  fn blank_rewrite_is_refused_by_the_form() {
    let mut app = app(&["One."]);
    type_str(&mut app, "   ");
    ctrl(&mut app, 's');
    assert!(matches!(app.notice, Notice::Error(_)));
    assert_eq!(app.progress.unseen, 1);
  }

  #[test]
  fn skip_then_complete() {
    let mut app = app(&["One."]);
    ctrl(&mut app, 'n');
    assert!(app.original().is_none());
    assert_eq!(app.progress.unseen, 0);
    assert_eq!(app.progress.rewritten, 0);
  }

  #[test]
  fn reset_requires_confirmation() {
    let mut app = app(&["One."]);
    ctrl(&mut app, 'n');

    ctrl(&mut app, 'r');
    assert_eq!(app.screen, Screen::ConfirmReset);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.progress.unseen, 0);

    ctrl(&mut app, 'r');
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.screen, Screen::Practice);
    assert_eq!(app.progress.unseen, 1);
    assert!(app.original().is_some());
  }

  #[test]
  fn import_prompt_loads_file_and_fills_empty_screen() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("in.csv");
    std::fs::write(&file, "sentence\nHello there.\n").unwrap();

    let mut app = app(&[]);
    ctrl(&mut app, 'o');
    assert_eq!(app.screen, Screen::Prompt(PromptKind::Import));
    type_str(&mut app, &file.to_string_lossy());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Practice);
    assert_eq!(app.original(), Some("Hello there."));
    assert_eq!(app.progress.total, 1);
  }

  #[test]
  fn failed_import_is_reported_not_fatal() {
    let mut app = app(&["One."]);
    ctrl(&mut app, 'o');
    type_str(&mut app, "/definitely/not/here.csv");
    assert!(press(&mut app, KeyCode::Enter));
    assert!(matches!(app.notice, Notice::Error(ref m) if m.starts_with("Import failed")));
    assert_eq!(app.progress.total, 1);
  }

  #[test]
  fn export_prompt_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");

    let mut app = app(&["One."]);
    ctrl(&mut app, 'e');
    assert_eq!(app.input, DEFAULT_EXPORT_PATH);
    app.input.clear();
    type_str(&mut app, &out.to_string_lossy());
    press(&mut app, KeyCode::Enter);

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text, "original,rewrite\nOne.,\n");
  }

  #[test]
  fn escape_quits_from_practice_but_cancels_prompts() {
    let mut app = app(&["One."]);
    ctrl(&mut app, 'o');
    assert!(press(&mut app, KeyCode::Esc));
    assert_eq!(app.screen, Screen::Practice);
    assert!(!press(&mut app, KeyCode::Esc));
  }
}

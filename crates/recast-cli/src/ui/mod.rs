//! TUI rendering — orchestrates all panes.

pub mod popup;
pub mod practice;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use recast_core::store::SentenceStore;

use crate::app::{App, Notice, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: SentenceStore>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  practice::draw(f, rows[1], app);
  draw_status(f, rows[2], app);

  match app.screen {
    Screen::Practice => {}
    Screen::Prompt(kind) => popup::draw_prompt(f, area, kind, &app.input),
    Screen::ConfirmReset => popup::draw_confirm_reset(f, area),
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: SentenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let p = app.progress;

  let left = Span::styled(
    " recast  sentence rewriting practice",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("Progress: {}/{}  ({} unseen)  {date} ", p.rewritten, p.total, p.unseen),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: SentenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match app.screen {
    Screen::Practice => (
      "PRACTICE",
      "^S save & next  ^N skip  ^O import  ^E export  ^R reset  Esc quit",
    ),
    Screen::Prompt(_) => ("PATH", "Enter confirm  Esc cancel"),
    Screen::ConfirmReset => ("RESET", "y confirm  any other key cancels"),
  };

  let (message, color) = match &app.notice {
    Notice::Error(msg) => (msg.clone(), Color::Red),
    Notice::Info(msg) if app.screen == Screen::Practice => (format!("{msg}  ·  {hints}"), Color::Gray),
    _ => (hints.to_string(), Color::Gray),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let message_span = Span::styled(format!("  {message}"), Style::default().fg(color));

  let line = Line::from(vec![mode_span, message_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

#[cfg(test)]
mod tests {
  use ratatui::{Terminal, backend::TestBackend};
  use recast_core::session::Session;
  use recast_store_sqlite::SqliteStore;

  use super::*;

  fn rendered(app: &App<SqliteStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect()
  }

  #[test]
  fn renders_sentence_and_progress() {
    let mut session = Session::new(SqliteStore::open_in_memory().unwrap());
    session.import(vec!["A cat sat.".into()]).unwrap();
    let mut app = App::new(session);
    app.start();

    let screen = rendered(&app);
    assert!(screen.contains("A cat sat."));
    assert!(screen.contains("Progress: 0/1"));
  }

  #[test]
  fn renders_completion_message_when_idle() {
    let mut app = App::new(Session::new(SqliteStore::open_in_memory().unwrap()));
    app.start();
    assert!(rendered(&app).contains("No more sentences"));
  }
}

//! Practice pane — the original sentence above, the rewrite editor below.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use recast_core::store::SentenceStore;

use crate::app::{App, Screen};

const COMPLETED_TEXT: &str =
  "No more sentences to practice! Import more (^O) or reset the session (^R).";

/// Render the original and rewrite panes into `area`.
pub fn draw<S: SentenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let panes = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_original(f, panes[0], app);
  draw_rewrite(f, panes[1], app);
}

fn draw_original<S: SentenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let block = Block::default()
    .title(" Original sentence ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let para = match app.original() {
    Some(text) => Paragraph::new(text.to_owned())
      .style(Style::default().add_modifier(Modifier::BOLD)),
    None => Paragraph::new(COMPLETED_TEXT).style(Style::default().fg(Color::DarkGray)),
  };

  f.render_widget(para.block(block).wrap(Wrap { trim: false }), area);
}

fn draw_rewrite<S: SentenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.screen == Screen::Practice && app.original().is_some();
  let border = if focused { Color::Cyan } else { Color::DarkGray };

  let block = Block::default()
    .title(" Your rewrite ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let mut lines: Vec<Line> = app.rewrite.split('\n').map(|l| Line::from(l.to_owned())).collect();
  if focused && let Some(last) = lines.last_mut() {
    last.push_span(Span::styled("▏", Style::default().fg(Color::Cyan)));
  }

  // Keep the cursor line visible once the text outgrows the pane.
  let visible = area.height.saturating_sub(2) as usize;
  let scroll = lines.len().saturating_sub(visible.max(1)) as u16;

  let para = Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: false })
    .scroll((scroll, 0));
  f.render_widget(para, area);
}

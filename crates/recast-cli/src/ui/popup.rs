//! Centered modal boxes for the path prompt and the reset confirmation.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::PromptKind;

pub fn draw_prompt(f: &mut Frame, area: Rect, kind: PromptKind, input: &str) {
  let title = match kind {
    PromptKind::Import => " Import CSV (needs a `sentence` column) ",
    PromptKind::Export => " Export rewrites to CSV ",
  };
  let line = Line::from(vec![
    Span::raw(input.to_owned()),
    Span::styled("▏", Style::default().fg(Color::Cyan)),
  ]);
  draw_box(f, area, title, vec![line], Color::Cyan);
}

pub fn draw_confirm_reset(f: &mut Frame, area: Rect) {
  let lines = vec![
    Line::from("Mark every sentence unseen and clear all rewrites?"),
    Line::from(""),
    Line::from(Span::styled("[y] reset   [any other key] cancel", Style::default().fg(Color::DarkGray))),
  ];
  draw_box(f, area, " Reset session ", lines, Color::Yellow);
}

fn draw_box(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, color: Color) {
  let height = lines.len() as u16 + 2;
  let rect = centered(area, 70, height);

  let block = Block::default()
    .title(title.to_owned())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(color));

  f.render_widget(Clear, rect);
  f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
    .flex(Flex::Center)
    .areas(row);
  rect
}

//! Rendering - turns the editing session into a ratatui frame.

use std::time::Instant;

use eyre::Result;
use kite_lib::{
  editor::Editor,
  messages::MessageLevel,
  render::RenderSpan,
};
use ratatui::{
  Frame,
  layout::{
    Constraint,
    Layout,
    Position as ScreenPosition,
  },
  style::{
    Color,
    Modifier,
    Style,
  },
  text::{
    Line,
    Span,
  },
  widgets::Paragraph,
};

use crate::{
  Ctx,
  prompt::Prompt,
  terminal::Terminal,
  theme::highlight_to_color,
};

/// Render the current session to the terminal.
pub fn render(ctx: &Ctx, terminal: &mut Terminal) -> Result<()> {
  terminal.draw(|frame| draw(frame, ctx))
}

fn draw(frame: &mut Frame, ctx: &Ctx) {
  let [text_area, status_area, message_area] = Layout::vertical([
    Constraint::Min(0),
    Constraint::Length(1),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  frame.render_widget(Paragraph::new(text_lines(&ctx.editor)), text_area);
  frame.render_widget(
    Paragraph::new(status_bar(&ctx.editor, status_area.width as usize)),
    status_area,
  );
  frame.render_widget(
    Paragraph::new(message_bar(
      &ctx.editor,
      ctx.prompt.as_ref(),
      message_area.width as usize,
      Instant::now(),
    )),
    message_area,
  );

  let cursor = ctx.editor.screen_cursor();
  frame.set_cursor_position(ScreenPosition::new(
    text_area.x + cursor.col as u16,
    text_area.y + cursor.row as u16,
  ));
}

/// One line per text-area row: document text, the welcome banner or `~`.
pub fn text_lines(editor: &Editor) -> Vec<Line<'static>> {
  let view = editor.viewport();
  let doc = editor.document();
  view
    .visible_rows()
    .map(|(screen_row, row)| {
      match doc.render_span(row, view.visible_cols()) {
        Some(span) => row_line(&span),
        None if doc.is_empty() && screen_row == view.rows / 3 => welcome_line(view.cols),
        None => Line::from("~"),
      }
    })
    .collect()
}

fn row_line(span: &RenderSpan<'_>) -> Line<'static> {
  let mut spans = Vec::new();
  for (highlight, bytes) in span.runs() {
    let style = Style::default().fg(highlight_to_color(highlight));
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
      if !byte.is_ascii_control() {
        continue;
      }
      if start < i {
        spans.push(Span::styled(
          String::from_utf8_lossy(&bytes[start..i]).into_owned(),
          style,
        ));
      }
      spans.push(Span::styled(
        control_symbol(byte).to_string(),
        Style::default().add_modifier(Modifier::REVERSED),
      ));
      start = i + 1;
    }
    if start < bytes.len() {
      spans.push(Span::styled(
        String::from_utf8_lossy(&bytes[start..]).into_owned(),
        style,
      ));
    }
  }
  Line::from(spans)
}

/// `^A` shows as `A`, NUL as `@`; anything past `^Z` as `?`.
fn control_symbol(byte: u8) -> char {
  if byte <= 26 {
    (b'@' + byte) as char
  } else {
    '?'
  }
}

fn welcome_line(cols: usize) -> Line<'static> {
  let mut banner = format!("Kite editor -- version {}", env!("CARGO_PKG_VERSION"));
  banner.truncate(cols);
  let padding = (cols - banner.len()) / 2;
  let mut line = String::with_capacity(cols);
  if padding > 0 {
    line.push('~');
    line.push_str(&" ".repeat(padding - 1));
  }
  line.push_str(&banner);
  Line::from(line)
}

/// Reversed bar: file info on the left, file type and line on the right.
pub fn status_bar(editor: &Editor, width: usize) -> Line<'static> {
  let status = editor.status_line();
  let mut text: String = status.left.chars().take(width).collect();
  let used = text.chars().count();
  let right = status.right.chars().count();
  if used + right <= width {
    text.push_str(&" ".repeat(width - used - right));
    text.push_str(&status.right);
  } else {
    text.push_str(&" ".repeat(width - used));
  }
  Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
}

/// The open prompt, or the status message while it has not expired.
pub fn message_bar(
  editor: &Editor,
  prompt: Option<&Prompt>,
  width: usize,
  now: Instant,
) -> Line<'static> {
  if let Some(prompt) = prompt {
    return Line::from(prompt.label().chars().take(width).collect::<String>());
  }
  let Some(message) = editor.messages().visible_at(now) else {
    return Line::default();
  };
  let style = match message.level {
    MessageLevel::Info => Style::default(),
    MessageLevel::Warning => Style::default().fg(Color::Yellow),
    MessageLevel::Error => Style::default().fg(Color::Red),
  };
  Line::styled(message.text.chars().take(width).collect::<String>(), style)
}

//! Editing session: one document plus everything the user interacts with.
//!
//! [`Editor`] is the context object the client threads through its event
//! loop. It owns the document, the raw cursor, the viewport, the search
//! engine and the status message, and turns logical key events into edits.
//! File and terminal IO stay in the client; the editor only reports what it
//! needs through [`EditorOutcome`] and the save/search protocol methods.

use std::path::PathBuf;

use crate::{
  config::EditorConfig,
  document::Document,
  input::{
    Key,
    KeyEvent,
  },
  messages::MessageCenter,
  movement::{
    Movement,
    move_cursor,
  },
  position::Position,
  search::{
    SearchEngine,
    SearchInput,
    SearchOutcome,
  },
  view::Viewport,
};

/// What the client should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
  Continue,
  Quit,
  /// Write [`Document::to_flat_text`] out, prompting for a name if the
  /// document has none.
  SaveRequested,
  /// Open the search prompt; [`Editor::begin_search`] has already run.
  SearchRequested,
}

/// Left and right halves of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
  pub left:  String,
  pub right: String,
}

/// Cursor and scroll state captured when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SavedView {
  cursor:     Position,
  row_offset: usize,
  col_offset: usize,
}

#[derive(Debug)]
pub struct Editor {
  document:   Document,
  /// Raw cursor; `row` may equal `document.len()`.
  cursor:     Position,
  /// Render column of the cursor, refreshed by [`Editor::scroll`].
  render_col: usize,
  viewport:   Viewport,
  search:     SearchEngine,
  saved_view: Option<SavedView>,
  messages:   MessageCenter,
  quit_times: u8,
  quit_left:  u8,
}

impl Editor {
  pub fn new(document: Document, config: &EditorConfig) -> Self {
    let quit_times = config.quit_times.max(1);
    Self {
      document,
      cursor: Position::zero(),
      render_col: 0,
      viewport: Viewport::default(),
      search: SearchEngine::new(),
      saved_view: None,
      messages: MessageCenter::with_timeout(config.message_timeout()),
      quit_times,
      quit_left: quit_times,
    }
  }

  pub fn document(&self) -> &Document {
    &self.document
  }

  pub fn document_mut(&mut self) -> &mut Document {
    &mut self.document
  }

  pub fn cursor(&self) -> Position {
    self.cursor
  }

  /// Move the cursor to `pos`, clamped into the document.
  pub fn set_cursor(&mut self, pos: Position) {
    let row = pos.row.min(self.document.len());
    self.cursor = Position::new(row, pos.col.min(self.document.row_len(row)));
  }

  pub fn render_col(&self) -> usize {
    self.render_col
  }

  pub fn viewport(&self) -> &Viewport {
    &self.viewport
  }

  pub fn messages(&self) -> &MessageCenter {
    &self.messages
  }

  pub fn messages_mut(&mut self) -> &mut MessageCenter {
    &mut self.messages
  }

  pub fn search_engine(&self) -> &SearchEngine {
    &self.search
  }

  /// Set the text area size (terminal size minus the bars).
  pub fn resize(&mut self, rows: usize, cols: usize) {
    self.viewport.rows = rows;
    self.viewport.cols = cols;
  }

  /// Recompute the cursor's render column and scroll it into view.
  pub fn scroll(&mut self) {
    self.render_col = self
      .document
      .raw_to_render_column(self.cursor.row, self.cursor.col);
    self
      .viewport
      .scroll_to(Position::new(self.cursor.row, self.render_col));
  }

  /// Cursor position on screen, relative to the text area.
  pub fn screen_cursor(&self) -> Position {
    self
      .viewport
      .to_screen(Position::new(self.cursor.row, self.render_col))
  }

  pub fn move_cursor(&mut self, movement: Movement) {
    self.cursor = move_cursor(&self.document, self.cursor, movement);
  }

  fn page(&mut self, up: bool) {
    let rows = self.viewport.rows;
    if up {
      self.cursor.row = self.viewport.row_offset;
    } else {
      self.cursor.row = (self.viewport.row_offset + rows)
        .saturating_sub(1)
        .min(self.document.len());
    }
    self.cursor.col = self.cursor.col.min(self.document.row_len(self.cursor.row));
    let movement = if up { Movement::Up } else { Movement::Down };
    for _ in 0..rows {
      self.move_cursor(movement);
    }
  }

  /// Insert `byte` at the cursor, opening a new last row if the cursor is
  /// past the end.
  pub fn insert_char(&mut self, byte: u8) {
    if self.cursor.row == self.document.len() {
      self.document.insert_row(self.document.len(), Vec::new());
    }
    self
      .document
      .insert_char(self.cursor.row, self.cursor.col, byte);
    self.cursor.col += 1;
  }

  pub fn insert_bytes(&mut self, bytes: &[u8]) {
    for &byte in bytes {
      self.insert_char(byte);
    }
  }

  /// Break the line at the cursor; the cursor moves to the new line's start.
  pub fn insert_newline(&mut self) {
    if self.cursor.row == self.document.len() {
      self.document.insert_row(self.cursor.row, Vec::new());
    } else {
      self
        .document
        .split_row(self.cursor.row, self.cursor.col);
    }
    self.cursor = Position::new(self.cursor.row + 1, 0);
  }

  /// Backspace: remove the byte before the cursor, joining with the previous
  /// row at column 0.
  pub fn delete_char(&mut self) {
    let Position { row, col } = self.cursor;
    if row == self.document.len() || (row == 0 && col == 0) {
      return;
    }
    if col > 0 {
      self.document.delete_char(row, col - 1);
      self.cursor.col -= 1;
    } else if let Some(join_at) = self.document.merge_with_previous(row) {
      self.cursor = Position::new(row - 1, join_at);
    }
  }

  /// Dispatch one key outside of any prompt.
  pub fn handle_key(&mut self, event: KeyEvent) -> EditorOutcome {
    let outcome = self.dispatch(event);
    if event.ctrl_char() != Some('q') {
      self.quit_left = self.quit_times;
    }
    outcome
  }

  fn dispatch(&mut self, event: KeyEvent) -> EditorOutcome {
    if let Some(ch) = event.ctrl_char() {
      match ch {
        'q' => return self.request_quit(),
        's' => return EditorOutcome::SaveRequested,
        'f' => {
          self.begin_search();
          return EditorOutcome::SearchRequested;
        },
        'h' => self.delete_char(),
        _ => {},
      }
      return EditorOutcome::Continue;
    }

    match event.key {
      Key::Enter => self.insert_newline(),
      Key::Backspace => self.delete_char(),
      Key::Delete => {
        self.move_cursor(Movement::Right);
        self.delete_char();
      },
      Key::Home => self.move_cursor(Movement::LineStart),
      Key::End => self.move_cursor(Movement::LineEnd),
      Key::PageUp => self.page(true),
      Key::PageDown => self.page(false),
      Key::Left => self.move_cursor(Movement::Left),
      Key::Right => self.move_cursor(Movement::Right),
      Key::Up => self.move_cursor(Movement::Up),
      Key::Down => self.move_cursor(Movement::Down),
      Key::Tab => self.insert_char(b'\t'),
      Key::Char(_) => {
        if let Some(ch) = event.text() {
          let mut buf = [0; 4];
          self.insert_bytes(ch.encode_utf8(&mut buf).as_bytes());
        }
      },
      Key::Escape | Key::Other => {},
    }
    EditorOutcome::Continue
  }

  fn request_quit(&mut self) -> EditorOutcome {
    if self.document.is_modified() && self.quit_left > 1 {
      self.quit_left -= 1;
      let left = self.quit_left;
      self.messages.warning(format!(
        "WARNING!!! File has unsaved changes. Press Ctrl-Q {left} more time{} to quit.",
        if left == 1 { "" } else { "s" }
      ));
      return EditorOutcome::Continue;
    }
    EditorOutcome::Quit
  }

  /// Bind the document to a file name chosen by the user.
  pub fn set_file_path(&mut self, path: PathBuf) {
    self.document.set_path(Some(path));
  }

  /// Record that `bytes` bytes of [`Document::to_flat_text`] reached disk.
  pub fn save_succeeded(&mut self, bytes: usize) {
    self.document.mark_saved();
    log::info!("saved {bytes} bytes to {}", self.document.display_name());
    self.messages.info(format!("{bytes} bytes written to disk"));
  }

  pub fn save_failed(&mut self, err: impl std::fmt::Display) {
    self.messages.error(format!("Can't save! I/O error: {err}"));
  }

  pub fn save_aborted(&mut self) {
    self.messages.info("Save aborted");
  }

  /// Enter search, remembering where to return to on cancel.
  pub fn begin_search(&mut self) {
    self.saved_view = Some(SavedView {
      cursor:     self.cursor,
      row_offset: self.viewport.row_offset,
      col_offset: self.viewport.col_offset,
    });
    self.search.begin();
  }

  /// Forward one search-prompt keystroke with the current `query`.
  pub fn search(&mut self, query: &str, input: SearchInput) -> SearchOutcome {
    if !self.search.is_active() {
      self.begin_search();
    }
    let outcome = self
      .search
      .update(&mut self.document, query.as_bytes(), input);

    match outcome {
      SearchOutcome::Match(hit) => {
        self.cursor = Position::new(hit.row, hit.raw_col);
        // Past the end, so the next scroll() puts the match on the top row.
        self.viewport.row_offset = self.document.len();
      },
      SearchOutcome::Finished { confirmed } => {
        let saved = self.saved_view.take();
        if let (false, Some(saved)) = (confirmed, saved) {
          self.cursor = saved.cursor;
          self.viewport.row_offset = saved.row_offset;
          self.viewport.col_offset = saved.col_offset;
        }
      },
      SearchOutcome::NoMatch => {},
    }
    outcome
  }

  pub fn status_line(&self) -> StatusLine {
    let name = self.document.display_name();
    let name: String = name.chars().take(20).collect();
    let modified = if self.document.is_modified() {
      " (modified)"
    } else {
      ""
    };
    let filetype = self
      .document
      .profile()
      .map_or("no ft", |profile| profile.name);
    StatusLine {
      left:  format!("{name} - {} lines{modified}", self.document.len()),
      right: format!("{filetype} | {}/{}", self.cursor.row + 1, self.document.len()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::Highlight;

  fn editor(text: &str) -> Editor {
    let mut editor = Editor::new(
      Document::from_bytes(text.as_bytes(), Some("t.c".into())),
      &EditorConfig::default(),
    );
    editor.resize(10, 40);
    editor
  }

  fn lines(editor: &Editor) -> Vec<String> {
    editor
      .document()
      .rows()
      .iter()
      .map(|row| String::from_utf8_lossy(row.raw()).into_owned())
      .collect()
  }

  fn press(editor: &mut Editor, key: Key) -> EditorOutcome {
    editor.handle_key(KeyEvent::new(key))
  }

  fn type_str(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
      press(editor, Key::Char(ch));
    }
  }

  #[test]
  fn typing_into_empty_document_creates_row() {
    let mut editor = editor("");
    type_str(&mut editor, "hi");
    assert_eq!(lines(&editor), ["hi"]);
    assert_eq!(editor.cursor(), Position::new(0, 2));
    assert!(editor.document().is_modified());
  }

  #[test]
  fn newline_splits_and_backspace_joins() {
    let mut editor = editor("hello world\n");
    editor.set_cursor(Position::new(0, 5));
    press(&mut editor, Key::Enter);
    assert_eq!(lines(&editor), ["hello", " world"]);
    assert_eq!(editor.cursor(), Position::new(1, 0));

    press(&mut editor, Key::Backspace);
    assert_eq!(lines(&editor), ["hello world"]);
    assert_eq!(editor.cursor(), Position::new(0, 5));
  }

  #[test]
  fn newline_on_append_line_adds_row() {
    let mut editor = editor("a\n");
    editor.set_cursor(Position::new(1, 0));
    press(&mut editor, Key::Enter);
    assert_eq!(lines(&editor), ["a", ""]);
    assert_eq!(editor.cursor(), Position::new(2, 0));
  }

  #[test]
  fn backspace_at_origin_and_append_line_is_noop() {
    let mut editor = editor("ab\n");
    press(&mut editor, Key::Backspace);
    editor.set_cursor(Position::new(1, 0));
    press(&mut editor, Key::Backspace);
    assert_eq!(lines(&editor), ["ab"]);
    assert!(!editor.document().is_modified());
  }

  #[test]
  fn delete_key_removes_under_cursor() {
    let mut editor = editor("abc\nd\n");
    editor.set_cursor(Position::new(0, 1));
    press(&mut editor, Key::Delete);
    assert_eq!(lines(&editor), ["ac", "d"]);
    editor.set_cursor(Position::new(0, 2));
    press(&mut editor, Key::Delete);
    assert_eq!(lines(&editor), ["acd"]);
    assert_eq!(editor.cursor(), Position::new(0, 2));
  }

  #[test]
  fn ctrl_h_is_backspace_and_tab_inserts_tab() {
    let mut editor = editor("ab\n");
    editor.set_cursor(Position::new(0, 2));
    editor.handle_key(KeyEvent::ctrl('h'));
    press(&mut editor, Key::Tab);
    assert_eq!(lines(&editor), ["a\t"]);
    editor.scroll();
    assert_eq!(editor.render_col(), 8);
  }

  #[test]
  fn quit_requires_confirmation_when_modified() {
    let mut editor = editor("x\n");
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Quit);

    type_str(&mut editor, "y");
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Continue);
    assert!(editor.messages().latest().unwrap().text.contains("2 more times"));
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Continue);
    assert!(editor.messages().latest().unwrap().text.contains("1 more time "));

    press(&mut editor, Key::Left);
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Continue);
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Continue);
    assert_eq!(editor.handle_key(KeyEvent::ctrl('q')), EditorOutcome::Quit);
  }

  #[test]
  fn save_protocol() {
    let mut editor = editor("");
    type_str(&mut editor, "1");
    assert_eq!(editor.handle_key(KeyEvent::ctrl('s')), EditorOutcome::SaveRequested);
    editor.save_failed("disk full");
    assert!(editor.document().is_modified());
    assert_eq!(
      editor.messages().latest().unwrap().text,
      "Can't save! I/O error: disk full"
    );
    editor.save_succeeded(2);
    assert!(!editor.document().is_modified());
    assert_eq!(editor.messages().latest().unwrap().text, "2 bytes written to disk");
  }

  #[test]
  fn renaming_reselects_profile() {
    let mut editor = editor("x = 1\n");
    editor.set_file_path("notes.txt".into());
    assert!(editor.document().profile().is_none());
    assert!(editor.document().rows()[0].highlight().iter().all(|&h| h == Highlight::Normal));
    editor.set_file_path("a.py".into());
    assert_eq!(editor.document().rows()[0].highlight()[4], Highlight::Number);
  }

  #[test]
  fn scroll_follows_cursor() {
    let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let mut editor = editor(&text);
    editor.set_cursor(Position::new(25, 3));
    editor.scroll();
    assert_eq!(editor.viewport().row_offset, 16);
    assert_eq!(editor.screen_cursor(), Position::new(9, 3));
  }

  #[test]
  fn page_down_and_up() {
    let text: String = (0..30).map(|i| format!("{i}\n")).collect();
    let mut editor = editor(&text);
    press(&mut editor, Key::PageDown);
    assert_eq!(editor.cursor().row, 19);
    editor.scroll();
    press(&mut editor, Key::PageUp);
    assert_eq!(editor.cursor().row, 0);
  }

  #[test]
  fn search_moves_cursor_and_cancel_restores() {
    let mut editor = editor("alpha\nbeta\n\tgamma\n");
    editor.set_cursor(Position::new(1, 2));
    editor.scroll();

    assert_eq!(editor.handle_key(KeyEvent::ctrl('f')), EditorOutcome::SearchRequested);
    let outcome = editor.search("gam", SearchInput::Edit);
    assert!(matches!(outcome, SearchOutcome::Match(_)));
    assert_eq!(editor.cursor(), Position::new(2, 1));
    editor.scroll();
    assert_eq!(editor.viewport().row_offset, 2);
    assert_eq!(editor.render_col(), 8);

    editor.search("gam", SearchInput::Cancel);
    assert_eq!(editor.cursor(), Position::new(1, 2));
    assert_eq!(editor.viewport().row_offset, 0);
    assert!(
      editor
        .document()
        .rows()
        .iter()
        .all(|row| !row.highlight().contains(&Highlight::Match))
    );
  }

  #[test]
  fn search_confirm_keeps_cursor() {
    let mut editor = editor("one\ntwo\n");
    editor.begin_search();
    editor.search("two", SearchInput::Edit);
    let outcome = editor.search("two", SearchInput::Confirm);
    assert_eq!(outcome, SearchOutcome::Finished { confirmed: true });
    assert_eq!(editor.cursor(), Position::new(1, 0));
    assert!(!editor.search_engine().is_active());
  }

  #[test]
  fn status_line_contents() {
    let mut editor = editor("a\nb\n");
    let status = editor.status_line();
    assert_eq!(status.left, "t.c - 2 lines");
    assert_eq!(status.right, "c | 1/2");
    type_str(&mut editor, "z");
    assert_eq!(editor.status_line().left, "t.c - 2 lines (modified)");

    let unnamed = Editor::new(Document::new(), &EditorConfig::default());
    assert_eq!(unnamed.status_line().left, "[No Name] - 0 lines");
    assert_eq!(unnamed.status_line().right, "no ft | 1/0");
  }
}

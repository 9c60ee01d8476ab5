//! Incremental substring search over a document's render form.
//!
//! The engine is driven one keystroke at a time while a search prompt is
//! open. Each call first takes back the match overlay left by the previous
//! call, then scans for the query and paints [`Highlight::Match`] over the
//! new hit, so at most one row carries the overlay at any moment.
//!
//! # Scan order
//!
//! A fresh search starts at row 0. Navigation keys continue from the last
//! matching row in the chosen direction and wrap around either end. The
//! first occurrence of the query inside a row's render bytes wins.
//!
//! ```
//! use kite_lib::{
//!   document::Document,
//!   search::{
//!     SearchEngine,
//!     SearchInput,
//!     SearchOutcome,
//!   },
//! };
//!
//! let mut doc = Document::from_bytes(b"foo\nbar\nfoo\n", None);
//! let mut search = SearchEngine::new();
//! search.begin();
//!
//! let SearchOutcome::Match(hit) = search.update(&mut doc, b"foo", SearchInput::Edit) else {
//!   panic!("expected a match");
//! };
//! assert_eq!(hit.row, 0);
//!
//! let SearchOutcome::Match(hit) = search.update(&mut doc, b"foo", SearchInput::Next) else {
//!   panic!("expected a match");
//! };
//! assert_eq!(hit.row, 2);
//! ```

use crate::{
  document::{
    Document,
    HighlightSnapshot,
  },
  movement::Direction,
  syntax::Highlight,
};

/// Keystroke classes the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
  /// The query changed (or any other non-navigation key).
  Edit,
  /// Right/Down: next match.
  Next,
  /// Left/Up: previous match.
  Prev,
  /// Enter: keep the cursor on the match and leave search.
  Confirm,
  /// Escape: leave search; the caller restores its saved cursor.
  Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
  #[default]
  Idle,
  Searching,
}

/// Location of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
  pub row:        usize,
  /// Render column of the first matched byte.
  pub render_col: usize,
  /// Raw column the match starts at, for placing the cursor.
  pub raw_col:    usize,
  /// Length of the match in render bytes.
  pub len:        usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
  /// A row matched; the caller should scroll it into view.
  Match(SearchMatch),
  NoMatch,
  /// Search ended through [`SearchInput::Confirm`] or
  /// [`SearchInput::Cancel`].
  Finished { confirmed: bool },
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
  state:      SearchState,
  last_match: Option<usize>,
  direction:  Direction,
  saved:      Option<HighlightSnapshot>,
}

impl SearchEngine {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> SearchState {
    self.state
  }

  pub fn is_active(&self) -> bool {
    self.state == SearchState::Searching
  }

  pub fn last_match(&self) -> Option<usize> {
    self.last_match
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  /// Start a search interaction from scratch.
  pub fn begin(&mut self) {
    self.state = SearchState::Searching;
    self.last_match = None;
    self.direction = Direction::Forward;
  }

  /// Feed one keystroke with the prompt's current `query`.
  pub fn update(&mut self, doc: &mut Document, query: &[u8], input: SearchInput) -> SearchOutcome {
    self.restore(doc);

    match input {
      SearchInput::Confirm | SearchInput::Cancel => {
        self.finish();
        return SearchOutcome::Finished {
          confirmed: input == SearchInput::Confirm,
        };
      },
      SearchInput::Next => self.direction = Direction::Forward,
      SearchInput::Prev => self.direction = Direction::Backward,
      SearchInput::Edit => {
        self.last_match = None;
        self.direction = Direction::Forward;
      },
    }
    self.state = SearchState::Searching;

    if self.last_match.is_none() {
      self.direction = Direction::Forward;
    }
    if query.is_empty() || doc.is_empty() {
      return SearchOutcome::NoMatch;
    }

    let rows = doc.len();
    let mut current = self.last_match.map(|row| row.min(rows - 1));
    for _ in 0..rows {
      let row = match (current, self.direction) {
        (None, _) => 0,
        (Some(row), Direction::Forward) => (row + 1) % rows,
        (Some(0), Direction::Backward) => rows - 1,
        (Some(row), Direction::Backward) => row - 1,
      };
      current = Some(row);

      let Some(target) = doc.row(row) else {
        continue;
      };
      let Some(render_col) = find(target.render(), query) else {
        continue;
      };

      let hit = SearchMatch {
        row,
        render_col,
        raw_col: target.render_to_raw_column(render_col),
        len: query.len(),
      };
      self.last_match = Some(row);
      self.saved = doc.overlay_match(row, render_col..render_col + hit.len);
      log::trace!("search match at row {row}, render column {render_col}");
      return SearchOutcome::Match(hit);
    }

    log::trace!("search: no match");
    SearchOutcome::NoMatch
  }

  /// Put back any pending overlay and return to [`SearchState::Idle`].
  ///
  /// Calling this again has no further effect.
  pub fn cancel(&mut self, doc: &mut Document) {
    self.restore(doc);
    self.finish();
  }

  fn finish(&mut self) {
    self.state = SearchState::Idle;
    self.last_match = None;
    self.direction = Direction::Forward;
  }

  fn restore(&mut self, doc: &mut Document) {
    if let Some(snapshot) = self.saved.take() {
      doc.restore_highlight(snapshot);
    }
  }
}

/// Offset of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  if needle.len() > haystack.len() {
    return None;
  }
  haystack
    .windows(needle.len())
    .position(|window| window == needle)
}

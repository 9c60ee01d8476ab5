//! Viewport over the document in render space.

use crate::position::Position;

/// Visible window: scroll offsets plus the size of the text area.
///
/// `rows`/`cols` cover document text only; status and message bars are the
/// client's business.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
  /// First visible document row.
  pub row_offset: usize,
  /// First visible render column.
  pub col_offset: usize,
  pub rows:       usize,
  pub cols:       usize,
}

impl Viewport {
  pub fn new(rows: usize, cols: usize) -> Self {
    Self {
      row_offset: 0,
      col_offset: 0,
      rows,
      cols,
    }
  }

  /// Shift the offsets just enough to bring `cursor` (row, render column)
  /// into view.
  pub fn scroll_to(&mut self, cursor: Position) {
    if cursor.row < self.row_offset {
      self.row_offset = cursor.row;
    }
    if cursor.row >= self.row_offset + self.rows {
      self.row_offset = (cursor.row + 1).saturating_sub(self.rows);
    }
    if cursor.col < self.col_offset {
      self.col_offset = cursor.col;
    }
    if cursor.col >= self.col_offset + self.cols {
      self.col_offset = (cursor.col + 1).saturating_sub(self.cols);
    }
  }

  /// Screen coordinates of `cursor`, relative to the text area.
  pub fn to_screen(&self, cursor: Position) -> Position {
    Position::new(
      cursor.row.saturating_sub(self.row_offset),
      cursor.col.saturating_sub(self.col_offset),
    )
  }

  /// Document rows currently on screen, paired with their screen row.
  pub fn visible_rows(&self) -> impl Iterator<Item = (usize, usize)> {
    let offset = self.row_offset;
    (0..self.rows).map(move |screen_row| (screen_row, offset + screen_row))
  }

  /// Render columns currently on screen.
  pub fn visible_cols(&self) -> std::ops::Range<usize> {
    self.col_offset..self.col_offset + self.cols
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scrolls_down_and_up() {
    let mut view = Viewport::new(10, 80);
    view.scroll_to(Position::new(15, 0));
    assert_eq!(view.row_offset, 6);
    view.scroll_to(Position::new(9, 0));
    assert_eq!(view.row_offset, 6);
    view.scroll_to(Position::new(2, 0));
    assert_eq!(view.row_offset, 2);
  }

  #[test]
  fn scrolls_horizontally() {
    let mut view = Viewport::new(10, 20);
    view.scroll_to(Position::new(0, 25));
    assert_eq!(view.col_offset, 6);
    view.scroll_to(Position::new(0, 3));
    assert_eq!(view.col_offset, 3);
  }

  #[test]
  fn screen_position() {
    let view = Viewport {
      row_offset: 4,
      col_offset: 8,
      rows:       10,
      cols:       20,
    };
    assert_eq!(view.to_screen(Position::new(5, 10)), Position::new(1, 2));
    assert_eq!(view.visible_cols(), 8..28);
    assert_eq!(view.visible_rows().nth(2), Some((2, 6)));
  }

  #[test]
  fn zero_sized_viewport_does_not_underflow() {
    let mut view = Viewport::new(0, 0);
    view.scroll_to(Position::new(3, 3));
    assert_eq!(view.row_offset, 4);
    assert_eq!(view.col_offset, 4);
  }
}

//! Cursor movement over a document.
//!
//! The cursor is a raw `(row, col)` pair. `row` may sit one past the last row
//! (the line new text gets appended to), `col` never exceeds the length of
//! the row it is on.

use crate::{
  document::Document,
  position::Position,
};

/// The direction of cursor movement or search.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  /// Moving toward the end of the document (increasing positions).
  #[default]
  Forward,
  /// Moving toward the start of the document (decreasing positions).
  Backward,
}

/// Single-step cursor motions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
  Left,
  Right,
  Up,
  Down,
  LineStart,
  LineEnd,
}

/// Apply `movement` to `cursor`.
///
/// Left and Right wrap across row boundaries; Up and Down keep the column
/// and snap it back inside the destination row.
pub fn move_cursor(doc: &Document, cursor: Position, movement: Movement) -> Position {
  let Position { mut row, mut col } = cursor;
  let on_row = row < doc.len();

  match movement {
    Movement::Left => {
      if col > 0 {
        col -= 1;
      } else if row > 0 {
        row -= 1;
        col = doc.row_len(row);
      }
    },
    Movement::Right => {
      if on_row {
        if col < doc.row_len(row) {
          col += 1;
        } else {
          row += 1;
          col = 0;
        }
      }
    },
    Movement::Up => row = row.saturating_sub(1),
    Movement::Down => {
      if row < doc.len() {
        row += 1;
      }
    },
    Movement::LineStart => col = 0,
    Movement::LineEnd => {
      if on_row {
        col = doc.row_len(row);
      }
    },
  }

  Position::new(row, col.min(doc.row_len(row)))
}

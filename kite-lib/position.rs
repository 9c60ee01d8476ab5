/// A raw cursor position: row index and byte column within that row.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self::new(0, 0)
  }
}

impl From<(usize, usize)> for Position {
  fn from((row, col): (usize, usize)) -> Self {
    Self::new(row, col)
  }
}

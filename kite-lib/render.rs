//! Render form of a row and raw/render column mapping.
//!
//! The render form is what ends up on screen and what search scans: every
//! byte of the raw line is copied through, except tabs, which expand to
//! spaces up to the next multiple of [`TAB_STOP`].
//!
//! Columns are byte indices. A raw column `cx` indexes into the raw bytes, a
//! render column `rx` indexes into the render bytes. They only differ to the
//! right of a tab.
//!
//! ```
//! use kite_lib::render::{
//!   raw_to_render_column,
//!   render_line,
//!   render_to_raw_column,
//! };
//!
//! let rendered = render_line(b"a\tb");
//! assert_eq!(rendered.text, b"a       b");
//! assert_eq!(raw_to_render_column(b"a\tb", 2), 8);
//! assert_eq!(render_to_raw_column(b"a\tb", 5), 1);
//! ```

use std::ops::Range;

use crate::syntax::Highlight;

/// Width of a tab stop in render columns.
pub const TAB_STOP: usize = 8;

/// Render form of a raw line plus the render column every raw byte starts at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLine {
  pub text:    Vec<u8>,
  /// `columns[cx]` is the render column of raw byte `cx`. Has one extra
  /// trailing entry holding the total render width.
  pub columns: Vec<usize>,
}

/// Render width contributed by `byte` when it starts at render column `rx`.
#[inline]
fn byte_width(byte: u8, rx: usize) -> usize {
  if byte == b'\t' {
    TAB_STOP - rx % TAB_STOP
  } else {
    1
  }
}

/// Expand tabs in `raw` and record the raw-to-render column map.
pub fn render_line(raw: &[u8]) -> RenderedLine {
  let tabs = raw.iter().filter(|&&b| b == b'\t').count();
  let mut text = Vec::with_capacity(raw.len() + tabs * (TAB_STOP - 1));
  let mut columns = Vec::with_capacity(raw.len() + 1);

  for &byte in raw {
    columns.push(text.len());
    if byte == b'\t' {
      text.push(b' ');
      while text.len() % TAB_STOP != 0 {
        text.push(b' ');
      }
    } else {
      text.push(byte);
    }
  }
  columns.push(text.len());

  RenderedLine { text, columns }
}

/// Render column of raw column `cx`.
///
/// `cx` past the end of `raw` is clamped to `raw.len()`.
pub fn raw_to_render_column(raw: &[u8], cx: usize) -> usize {
  let cx = cx.min(raw.len());
  raw[..cx]
    .iter()
    .fold(0, |rx, &byte| rx + byte_width(byte, rx))
}

/// Raw column that render column `rx` falls on.
///
/// A render column inside a tab's expansion maps to the tab itself. A render
/// column past the end of the line maps to `raw.len()`.
pub fn render_to_raw_column(raw: &[u8], rx: usize) -> usize {
  let mut cur_rx = 0;
  for (cx, &byte) in raw.iter().enumerate() {
    cur_rx += byte_width(byte, cur_rx);
    if cur_rx > rx {
      return cx;
    }
  }
  raw.len()
}

/// A horizontal window into one row's render form, ready for a compositor.
///
/// `text` and `highlight` always have the same length and are index-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSpan<'a> {
  pub text:      &'a [u8],
  pub highlight: &'a [Highlight],
}

impl<'a> RenderSpan<'a> {
  /// Clip `text`/`highlight` to `cols`, clamping both ends to the line.
  pub fn clip(text: &'a [u8], highlight: &'a [Highlight], cols: Range<usize>) -> Self {
    let len = text.len().min(highlight.len());
    let start = cols.start.min(len);
    let end = cols.end.clamp(start, len);
    Self {
      text:      &text[start..end],
      highlight: &highlight[start..end],
    }
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Iterate over maximal runs of bytes sharing one highlight class.
  pub fn runs(&self) -> impl Iterator<Item = (Highlight, &'a [u8])> + 'a {
    let text = self.text;
    let highlight = self.highlight;
    let mut start = 0;
    std::iter::from_fn(move || {
      if start >= text.len() {
        return None;
      }
      let class = highlight[start];
      let end = highlight[start..]
        .iter()
        .position(|&hl| hl != class)
        .map_or(text.len(), |offset| start + offset);
      let run = (class, &text[start..end]);
      start = end;
      Some(run)
    })
  }
}

//! One line of the document with its derived render and highlight caches.

use std::ops::Range;

use crate::{
  render::{
    RenderSpan,
    raw_to_render_column,
    render_line,
    render_to_raw_column,
  },
  syntax::{
    Highlight,
    Profile,
    highlight_line,
  },
};

/// A line of raw bytes plus its render form and per-render-byte highlight.
///
/// Every mutation regenerates `render` and `highlight` before returning, so
/// `highlight.len() == render.len()` holds whenever a `Row` is observable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
  raw:       Vec<u8>,
  render:    Vec<u8>,
  highlight: Vec<Highlight>,
}

impl Row {
  pub fn new(raw: impl Into<Vec<u8>>, profile: Option<&Profile>) -> Self {
    let mut row = Self {
      raw:       raw.into(),
      render:    Vec::new(),
      highlight: Vec::new(),
    };
    row.update(profile);
    row
  }

  pub fn raw(&self) -> &[u8] {
    &self.raw
  }

  pub fn render(&self) -> &[u8] {
    &self.render
  }

  pub fn highlight(&self) -> &[Highlight] {
    &self.highlight
  }

  /// Length of the raw bytes.
  pub fn len(&self) -> usize {
    self.raw.len()
  }

  pub fn is_empty(&self) -> bool {
    self.raw.is_empty()
  }

  pub fn render_len(&self) -> usize {
    self.render.len()
  }

  pub fn raw_to_render_column(&self, cx: usize) -> usize {
    raw_to_render_column(&self.raw, cx)
  }

  pub fn render_to_raw_column(&self, rx: usize) -> usize {
    render_to_raw_column(&self.raw, rx)
  }

  /// Render bytes and highlight classes for render columns `cols`.
  pub fn span(&self, cols: Range<usize>) -> RenderSpan<'_> {
    RenderSpan::clip(&self.render, &self.highlight, cols)
  }

  /// Regenerate render form and highlight from the raw bytes.
  pub(crate) fn update(&mut self, profile: Option<&Profile>) {
    self.render = render_line(&self.raw).text;
    self.rehighlight(profile);
  }

  pub(crate) fn rehighlight(&mut self, profile: Option<&Profile>) {
    self.highlight = highlight_line(&self.render, profile);
    debug_assert_eq!(self.highlight.len(), self.render.len());
  }

  pub(crate) fn insert_byte(&mut self, at: usize, byte: u8, profile: Option<&Profile>) {
    let at = at.min(self.raw.len());
    self.raw.insert(at, byte);
    self.update(profile);
  }

  /// Remove the raw byte at `at`. Returns `false` when `at` is out of range.
  pub(crate) fn remove_byte(&mut self, at: usize, profile: Option<&Profile>) -> bool {
    if at >= self.raw.len() {
      return false;
    }
    self.raw.remove(at);
    self.update(profile);
    true
  }

  pub(crate) fn append(&mut self, bytes: &[u8], profile: Option<&Profile>) {
    self.raw.extend_from_slice(bytes);
    self.update(profile);
  }

  /// Truncate at `at` (clamped) and hand back the cut-off tail.
  pub(crate) fn split_off(&mut self, at: usize, profile: Option<&Profile>) -> Vec<u8> {
    let at = at.min(self.raw.len());
    let tail = self.raw.split_off(at);
    self.update(profile);
    tail
  }

  pub(crate) fn into_raw(self) -> Vec<u8> {
    self.raw
  }

  /// Paint `class` over render columns `cols`, clamped to the row.
  pub(crate) fn paint(&mut self, cols: Range<usize>, class: Highlight) {
    let start = cols.start.min(self.highlight.len());
    let end = cols.end.clamp(start, self.highlight.len());
    self.highlight[start..end].fill(class);
  }

  /// Put back a highlight array captured earlier.
  ///
  /// Returns `false`, leaving the row untouched, when `saved` no longer lines
  /// up with the render form.
  pub(crate) fn restore_highlight(&mut self, saved: Vec<Highlight>) -> bool {
    if saved.len() != self.render.len() {
      return false;
    }
    self.highlight = saved;
    true
  }
}

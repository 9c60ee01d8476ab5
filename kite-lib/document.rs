//! Document: the ordered rows of one file plus its modification state.
//!
//! Every mutating operation leaves each row's render and highlight caches
//! consistent with its raw bytes before returning.
//!
//! # Index policy
//!
//! Out-of-range indices never fail. Columns are clamped to the row, an
//! insertion position is clamped to `[0, len]`, and an operation addressing a
//! row that does not exist is a no-op that leaves `dirty` untouched.
//!
//! # Example
//!
//! ```
//! use kite_lib::document::Document;
//!
//! let mut doc = Document::from_bytes(b"int x;\n", Some("main.c".into()));
//! assert!(!doc.is_modified());
//!
//! doc.insert_char(0, 3, b'2');
//! assert_eq!(doc.to_flat_text(), b"int2 x;\n");
//! assert!(doc.is_modified());
//! ```

use std::{
  borrow::Cow,
  ops::Range,
  path::{
    Path,
    PathBuf,
  },
};

use crate::{
  render::RenderSpan,
  row::Row,
  syntax::{
    Highlight,
    Profile,
    select_profile,
  },
};

#[derive(Debug, Default)]
pub struct Document {
  rows:     Vec<Row>,
  path:     Option<PathBuf>,
  profile:  Option<&'static Profile>,
  /// Modification counter, zero when unmodified since load or save.
  dirty:    u64,
  /// Bumped by every edit and profile switch; never reset.
  revision: u64,
}

/// A row's highlight array as it was before [`Document::overlay_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HighlightSnapshot {
  row:       usize,
  revision:  u64,
  highlight: Vec<Highlight>,
}

impl Document {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a document from pre-split lines (no trailing newlines).
  ///
  /// The profile is picked from `path` before the rows are inserted, and the
  /// result starts out unmodified.
  pub fn from_lines<I, L>(lines: I, path: Option<PathBuf>) -> Self
  where
    I: IntoIterator<Item = L>,
    L: Into<Vec<u8>>,
  {
    let mut doc = Self::new();
    doc.set_path(path);
    for line in lines {
      doc.insert_row(doc.len(), line);
    }
    doc.dirty = 0;
    doc
  }

  /// Build a document from file contents.
  ///
  /// Lines are split on `\n`; trailing `\r`s are stripped from each line. A
  /// final newline does not produce an extra empty row.
  pub fn from_bytes(bytes: &[u8], path: Option<PathBuf>) -> Self {
    Self::from_lines(split_lines(bytes), path)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn row(&self, at: usize) -> Option<&Row> {
    self.rows.get(at)
  }

  /// Raw length of row `at`, or 0 past the end.
  pub fn row_len(&self, at: usize) -> usize {
    self.rows.get(at).map_or(0, Row::len)
  }

  pub fn dirty(&self) -> u64 {
    self.dirty
  }

  pub fn is_modified(&self) -> bool {
    self.dirty != 0
  }

  /// Record a successful write of [`Self::to_flat_text`].
  pub fn mark_saved(&mut self) {
    self.dirty = 0;
  }

  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  pub fn display_name(&self) -> Cow<'_, str> {
    match &self.path {
      Some(path) => path.to_string_lossy(),
      None => Cow::Borrowed("[No Name]"),
    }
  }

  /// Bind the document to `path` and pick the profile it matches.
  pub fn set_path(&mut self, path: Option<PathBuf>) {
    let profile = path
      .as_deref()
      .and_then(|path| select_profile(&path.to_string_lossy()));
    self.path = path;
    self.set_profile(profile);
  }

  pub fn profile(&self) -> Option<&'static Profile> {
    self.profile
  }

  /// Switch the active profile and rehighlight every row under it.
  pub fn set_profile(&mut self, profile: Option<&'static Profile>) {
    log::debug!(
      "highlight profile: {}",
      profile.map_or("none", |profile| profile.name)
    );
    self.profile = profile;
    self.revision = self.revision.wrapping_add(1);
    for row in &mut self.rows {
      row.rehighlight(profile);
    }
  }

  fn touch(&mut self) {
    self.dirty = self.dirty.saturating_add(1);
    self.revision = self.revision.wrapping_add(1);
  }

  /// Insert a row at `at`, clamped to `[0, len]`.
  pub fn insert_row(&mut self, at: usize, bytes: impl Into<Vec<u8>>) {
    let at = at.min(self.rows.len());
    self.rows.insert(at, Row::new(bytes, self.profile));
    self.touch();
  }

  /// Remove the row at `at`. Returns `false` when there is no such row.
  pub fn delete_row(&mut self, at: usize) -> bool {
    if at >= self.rows.len() {
      return false;
    }
    self.rows.remove(at);
    self.touch();
    true
  }

  /// Insert `byte` into row `row` at raw column `col` (clamped to the row
  /// length, so appending is allowed).
  ///
  /// A `row` past the end is not clamped: nothing changes, `dirty` included,
  /// and `false` is returned.
  pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) -> bool {
    let profile = self.profile;
    let Some(target) = self.rows.get_mut(row) else {
      return false;
    };
    target.insert_byte(col, byte, profile);
    self.touch();
    true
  }

  /// Remove the raw byte at `col` from row `row` if both exist.
  pub fn delete_char(&mut self, row: usize, col: usize) -> bool {
    let profile = self.profile;
    let Some(target) = self.rows.get_mut(row) else {
      return false;
    };
    if !target.remove_byte(col, profile) {
      return false;
    }
    self.touch();
    true
  }

  /// Cut row `row` at `col` (clamped) and insert the tail as a new row right
  /// after it.
  ///
  /// A `row` past the end is not clamped: nothing changes, `dirty` included,
  /// and `false` is returned.
  pub fn split_row(&mut self, row: usize, col: usize) -> bool {
    let profile = self.profile;
    let Some(target) = self.rows.get_mut(row) else {
      return false;
    };
    let tail = target.split_off(col, profile);
    self.rows.insert(row + 1, Row::new(tail, profile));
    self.touch();
    true
  }

  /// Append row `row` onto the previous row and remove it.
  ///
  /// Returns the previous row's length before the merge, which is where the
  /// joined content starts. `None` for row 0 or a row that does not exist.
  pub fn merge_with_previous(&mut self, row: usize) -> Option<usize> {
    if row == 0 || row >= self.rows.len() {
      return None;
    }
    let profile = self.profile;
    let removed = self.rows.remove(row).into_raw();
    let prev = &mut self.rows[row - 1];
    let join_at = prev.len();
    prev.append(&removed, profile);
    self.touch();
    Some(join_at)
  }

  /// Every row's raw bytes, each followed by `\n`.
  pub fn to_flat_text(&self) -> Vec<u8> {
    let total = self.rows.iter().map(|row| row.len() + 1).sum();
    let mut out = Vec::with_capacity(total);
    for row in &self.rows {
      out.extend_from_slice(row.raw());
      out.push(b'\n');
    }
    out
  }

  /// Render bytes and highlight classes of row `row` within render columns
  /// `cols`. `None` past the last row.
  pub fn render_span(&self, row: usize, cols: Range<usize>) -> Option<RenderSpan<'_>> {
    self.rows.get(row).map(|target| target.span(cols))
  }

  /// Render column of raw column `col` on row `row`; 0 past the last row.
  pub fn raw_to_render_column(&self, row: usize, col: usize) -> usize {
    self
      .rows
      .get(row)
      .map_or(0, |target| target.raw_to_render_column(col))
  }

  pub fn render_to_raw_column(&self, row: usize, rx: usize) -> usize {
    self
      .rows
      .get(row)
      .map_or(0, |target| target.render_to_raw_column(rx))
  }

  /// Paint [`Highlight::Match`] over `cols` on row `row` and return what
  /// the highlight array was before.
  pub(crate) fn overlay_match(&mut self, row: usize, cols: Range<usize>) -> Option<HighlightSnapshot> {
    let revision = self.revision;
    let target = self.rows.get_mut(row)?;
    let highlight = target.highlight().to_vec();
    target.paint(cols, Highlight::Match);
    Some(HighlightSnapshot {
      row,
      revision,
      highlight,
    })
  }

  /// Undo [`Self::overlay_match`].
  ///
  /// If the document was edited since the snapshot was taken, the painted row
  /// may have moved or changed, so every row is highlighted afresh instead.
  pub(crate) fn restore_highlight(&mut self, snapshot: HighlightSnapshot) {
    let HighlightSnapshot {
      row,
      revision,
      highlight,
    } = snapshot;
    let profile = self.profile;

    if revision != self.revision {
      log::debug!("document edited under a search overlay, rehighlighting");
      for target in &mut self.rows {
        target.rehighlight(profile);
      }
      return;
    }

    if let Some(target) = self.rows.get_mut(row) {
      if !target.restore_highlight(highlight) {
        log::warn!("stale highlight snapshot for row {row}, rehighlighting");
        target.rehighlight(profile);
      }
    }
  }
}

/// Split file contents into lines, dropping `\n` and trailing `\r`s.
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
  if bytes.is_empty() {
    return Vec::new();
  }
  let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
  body
    .split(|&b| b == b'\n')
    .map(|line| {
      let end = line
        .iter()
        .rposition(|&b| b != b'\r')
        .map_or(0, |idx| idx + 1);
      &line[..end]
    })
    .collect()
}

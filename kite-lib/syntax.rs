//! Single-line lexical highlighting.
//!
//! [`highlight_line`] scans one row's render form left to right and assigns
//! a [`Highlight`] class to every byte. State never carries across rows:
//! comments and strings end at end of line.
//!
//! Per byte, in order of precedence:
//!
//! 1. a comment marker outside a string turns the rest of the row into a
//!    comment;
//! 2. with string detection on, quotes open/close strings and a backslash
//!    inside a string swallows the next byte;
//! 3. with number detection on, a digit after a separator or a number
//!    continues a number, as does a `.` right after a number;
//! 4. anything else stays [`Highlight::Normal`] and only decides whether the
//!    next byte follows a separator.

pub mod profile;

pub use profile::{
  PROFILES,
  Profile,
  ProfileFlags,
  select_profile,
};

/// Highlight class of one rendered byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Highlight {
  #[default]
  Normal,
  Comment,
  String,
  Number,
  /// Transient class painted over the current search match.
  Match,
}

impl Highlight {
  pub const ALL: [Highlight; 5] = [
    Highlight::Normal,
    Highlight::Comment,
    Highlight::String,
    Highlight::Number,
    Highlight::Match,
  ];

  /// ANSI SGR foreground code used to display this class.
  pub const fn ansi_fg(self) -> u8 {
    match self {
      Highlight::Comment => 36,
      Highlight::String => 35,
      Highlight::Number => 31,
      Highlight::Match => 34,
      Highlight::Normal => 37,
    }
  }

  pub const fn scope(self) -> &'static str {
    match self {
      Highlight::Normal => "normal",
      Highlight::Comment => "comment",
      Highlight::String => "string",
      Highlight::Number => "number",
      Highlight::Match => "match",
    }
  }
}

/// Bytes that end a word for number detection.
#[inline]
pub fn is_separator(byte: u8) -> bool {
  byte.is_ascii_whitespace()
    // vertical tab is whitespace to C's isspace but not to Rust
    || byte == 0x0b
    || byte == b'\0'
    || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Highlight classes for `render`, one per byte.
///
/// Without a profile every byte is [`Highlight::Normal`].
pub fn highlight_line(render: &[u8], profile: Option<&Profile>) -> Vec<Highlight> {
  let mut hl = vec![Highlight::Normal; render.len()];
  let Some(profile) = profile else {
    return hl;
  };

  let comment = profile
    .comment_start
    .map(str::as_bytes)
    .filter(|marker| !marker.is_empty());
  let strings = profile.highlights_strings();
  let numbers = profile.highlights_numbers();

  let mut prev_sep = true;
  let mut in_string: Option<u8> = None;
  let mut i = 0;

  while i < render.len() {
    let byte = render[i];
    let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

    if let Some(marker) = comment {
      if in_string.is_none() && render[i..].starts_with(marker) {
        hl[i..].fill(Highlight::Comment);
        break;
      }
    }

    if strings {
      if let Some(quote) = in_string {
        hl[i] = Highlight::String;
        if byte == b'\\' && i + 1 < render.len() {
          hl[i + 1] = Highlight::String;
          i += 2;
          continue;
        }
        if byte == quote {
          in_string = None;
        }
        i += 1;
        prev_sep = true;
        continue;
      } else if byte == b'"' || byte == b'\'' {
        in_string = Some(byte);
        hl[i] = Highlight::String;
        i += 1;
        continue;
      }
    }

    if numbers
      && ((byte.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
        || (byte == b'.' && prev_hl == Highlight::Number))
    {
      hl[i] = Highlight::Number;
      i += 1;
      prev_sep = false;
      continue;
    }

    prev_sep = is_separator(byte);
    i += 1;
  }

  hl
}

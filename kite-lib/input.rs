//! Logical key events, decoded by the client from whatever the terminal
//! sends.

use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct Modifiers: u8 {
    const CTRL  = 1 << 0;
    const ALT   = 1 << 1;
    const SHIFT = 1 << 2;
  }
}

impl Modifiers {
  pub const fn ctrl(self) -> bool {
    self.contains(Self::CTRL)
  }

  pub const fn alt(self) -> bool {
    self.contains(Self::ALT)
  }

  pub const fn shift(self) -> bool {
    self.contains(Self::SHIFT)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Enter,
  Escape,
  Backspace,
  Tab,
  Delete,
  Home,
  End,
  PageUp,
  PageDown,
  Left,
  Right,
  Up,
  Down,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
  pub key:       Key,
  pub modifiers: Modifiers,
}

impl KeyEvent {
  pub const fn new(key: Key) -> Self {
    Self {
      key,
      modifiers: Modifiers::empty(),
    }
  }

  pub const fn ctrl(ch: char) -> Self {
    Self {
      key:       Key::Char(ch),
      modifiers: Modifiers::CTRL,
    }
  }

  /// The letter of a Ctrl chord (`Ctrl-Q` → `'q'`), lowercased.
  pub fn ctrl_char(&self) -> Option<char> {
    match self.key {
      Key::Char(ch) if self.modifiers.ctrl() => Some(ch.to_ascii_lowercase()),
      _ => None,
    }
  }

  /// The character this key types, if any. Shift is part of the character;
  /// Ctrl and Alt chords type nothing.
  pub fn text(&self) -> Option<char> {
    match self.key {
      Key::Char(ch) if !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => Some(ch),
      _ => None,
    }
  }

  /// Like [`Self::text`], restricted to printable ASCII.
  pub fn printable_ascii(&self) -> Option<char> {
    self
      .text()
      .filter(|ch| ch.is_ascii() && !ch.is_ascii_control())
  }
}

impl From<Key> for KeyEvent {
  fn from(key: Key) -> Self {
    Self::new(key)
  }
}

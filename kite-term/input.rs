//! Maps crossterm key events onto kite's logical keys.

use crossterm::event::{
  KeyCode,
  KeyEvent as CrosstermKeyEvent,
  KeyEventKind,
  KeyModifiers,
};
use kite_lib::input::{
  Key,
  KeyEvent,
  Modifiers,
};

/// `None` for key releases, which the editor never acts on.
pub fn to_key_event(event: CrosstermKeyEvent) -> Option<KeyEvent> {
  if event.kind == KeyEventKind::Release {
    return None;
  }
  Some(KeyEvent {
    key:       to_key(event.code),
    modifiers: to_modifiers(event.modifiers),
  })
}

fn to_key(code: KeyCode) -> Key {
  match code {
    KeyCode::Char(c) => Key::Char(c),
    KeyCode::Enter => Key::Enter,
    KeyCode::Tab => Key::Tab,
    KeyCode::Esc => Key::Escape,
    KeyCode::Backspace => Key::Backspace,
    KeyCode::Delete => Key::Delete,
    KeyCode::Home => Key::Home,
    KeyCode::End => Key::End,
    KeyCode::PageUp => Key::PageUp,
    KeyCode::PageDown => Key::PageDown,
    KeyCode::Left => Key::Left,
    KeyCode::Right => Key::Right,
    KeyCode::Up => Key::Up,
    KeyCode::Down => Key::Down,
    _ => Key::Other,
  }
}

fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
  let mut out = Modifiers::empty();
  if modifiers.contains(KeyModifiers::CONTROL) {
    out.insert(Modifiers::CTRL);
  }
  if modifiers.contains(KeyModifiers::ALT) {
    out.insert(Modifiers::ALT);
  }
  if modifiers.contains(KeyModifiers::SHIFT) {
    out.insert(Modifiers::SHIFT);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_ctrl_chords() {
    let event = CrosstermKeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert_eq!(to_key_event(event), Some(KeyEvent::ctrl('q')));
  }

  #[test]
  fn unknown_keys_become_other() {
    let event = CrosstermKeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
    assert_eq!(to_key_event(event).map(|e| e.key), Some(Key::Other));
  }

  #[test]
  fn releases_are_dropped() {
    let mut event = CrosstermKeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    event.kind = KeyEventKind::Release;
    assert_eq!(to_key_event(event), None);
  }
}

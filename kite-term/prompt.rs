//! Single-line prompt shown in the message bar.

use kite_lib::input::{
  Key,
  KeyEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
  SaveAs,
  Search,
}

/// What a key did to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
  /// Key consumed; the buffer may or may not have changed.
  Edited,
  /// Enter on a non-empty buffer.
  Accepted,
  Cancelled,
}

#[derive(Debug, Clone)]
pub struct Prompt {
  pub kind:  PromptKind,
  pub input: String,
}

impl Prompt {
  pub fn new(kind: PromptKind) -> Self {
    Self {
      kind,
      input: String::new(),
    }
  }

  pub fn handle_key(&mut self, event: KeyEvent) -> PromptEvent {
    if event.ctrl_char() == Some('h') {
      self.input.pop();
      return PromptEvent::Edited;
    }

    match event.key {
      Key::Escape => PromptEvent::Cancelled,
      Key::Enter if !self.input.is_empty() => PromptEvent::Accepted,
      Key::Backspace | Key::Delete => {
        self.input.pop();
        PromptEvent::Edited
      },
      _ => {
        if let Some(ch) = event.printable_ascii() {
          self.input.push(ch);
        }
        PromptEvent::Edited
      },
    }
  }

  /// Text for the message bar.
  pub fn label(&self) -> String {
    match self.kind {
      PromptKind::SaveAs => format!("Save as: {} (ESC to cancel)", self.input),
      PromptKind::Search => format!("Search: {} (Use ESC/Arrows/Enter)", self.input),
    }
  }
}

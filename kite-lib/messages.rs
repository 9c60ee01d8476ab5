//! Status-bar message with an expiry.

use std::time::{
  Duration,
  Instant,
};

pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
  pub level:        MessageLevel,
  pub text:         String,
  pub published_at: Instant,
}

/// Holds the one message the message bar shows.
#[derive(Debug, Clone)]
pub struct MessageCenter {
  active:  Option<Message>,
  timeout: Duration,
}

impl Default for MessageCenter {
  fn default() -> Self {
    Self::with_timeout(DEFAULT_MESSAGE_TIMEOUT)
  }
}

impl MessageCenter {
  pub fn with_timeout(timeout: Duration) -> Self {
    Self {
      active: None,
      timeout,
    }
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  pub fn publish(&mut self, level: MessageLevel, text: impl Into<String>) {
    let text = text.into();
    match level {
      MessageLevel::Error => log::warn!("status: {text}"),
      _ => log::debug!("status: {text}"),
    }
    self.active = Some(Message {
      level,
      text,
      published_at: Instant::now(),
    });
  }

  pub fn info(&mut self, text: impl Into<String>) {
    self.publish(MessageLevel::Info, text);
  }

  pub fn warning(&mut self, text: impl Into<String>) {
    self.publish(MessageLevel::Warning, text);
  }

  pub fn error(&mut self, text: impl Into<String>) {
    self.publish(MessageLevel::Error, text);
  }

  pub fn clear(&mut self) {
    self.active = None;
  }

  /// The latest message, including an expired one.
  pub fn latest(&self) -> Option<&Message> {
    self.active.as_ref()
  }

  /// The message to show at `now`, if it has not timed out yet.
  pub fn visible_at(&self, now: Instant) -> Option<&Message> {
    self
      .active
      .as_ref()
      .filter(|message| now.saturating_duration_since(message.published_at) < self.timeout)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_expires() {
    let mut center = MessageCenter::with_timeout(Duration::from_secs(5));
    center.info("hello");
    let published = center.latest().unwrap().published_at;
    assert_eq!(center.visible_at(published).map(|m| m.text.as_str()), Some("hello"));
    assert!(center.visible_at(published + Duration::from_secs(5)).is_none());
  }

  #[test]
  fn newer_message_replaces_older() {
    let mut center = MessageCenter::default();
    center.info("a");
    center.error("b");
    let latest = center.latest().unwrap();
    assert_eq!(latest.text, "b");
    assert_eq!(latest.level, MessageLevel::Error);
    center.clear();
    assert!(center.latest().is_none());
  }
}

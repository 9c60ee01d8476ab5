//! Typed editor configuration.
//!
//! The on-disk format is TOML with kebab-case keys:
//!
//! ```toml
//! [editor]
//! quit-times = 3
//! message-timeout = 5
//!
//! [log]
//! level = "warn"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("editor.quit-times must be at least 1")]
  ZeroQuitTimes,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub editor: EditorConfig,
  pub log:    LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EditorConfig {
  /// Quit presses needed to discard unsaved changes.
  pub quit_times:      u8,
  /// Seconds a status message stays visible.
  pub message_timeout: u64,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self {
      quit_times:      3,
      message_timeout: 5,
    }
  }
}

impl EditorConfig {
  pub fn message_timeout(&self) -> Duration {
    Duration::from_secs(self.message_timeout)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Off,
  Error,
  #[default]
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LogLevel> for log::LevelFilter {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Off => log::LevelFilter::Off,
      LogLevel::Error => log::LevelFilter::Error,
      LogLevel::Warn => log::LevelFilter::Warn,
      LogLevel::Info => log::LevelFilter::Info,
      LogLevel::Debug => log::LevelFilter::Debug,
      LogLevel::Trace => log::LevelFilter::Trace,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
  pub level: LogLevel,
}

impl Config {
  pub fn from_toml_str(source: &str) -> Result<Self> {
    let config: Config = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_toml_value(value: toml::Value) -> Result<Self> {
    let config: Config = value.try_into()?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if self.editor.quit_times == 0 {
      return Err(ConfigError::ZeroQuitTimes);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_is_default() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
  }

  #[test]
  fn parses_kebab_case_keys() {
    let config = Config::from_toml_str(
      r#"
        [editor]
        quit-times = 1
        message-timeout = 10

        [log]
        level = "debug"
      "#,
    )
    .unwrap();
    assert_eq!(config.editor.quit_times, 1);
    assert_eq!(config.editor.message_timeout(), Duration::from_secs(10));
    assert_eq!(config.log.level, LogLevel::Debug);
    assert_eq!(log::LevelFilter::from(config.log.level), log::LevelFilter::Debug);
  }

  #[test]
  fn partial_tables_keep_defaults() {
    let config = Config::from_toml_str("[editor]\nmessage-timeout = 2\n").unwrap();
    assert_eq!(config.editor.quit_times, 3);
    assert_eq!(config.log.level, LogLevel::Warn);
  }

  #[test]
  fn rejects_zero_quit_times() {
    let err = Config::from_toml_str("[editor]\nquit-times = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ZeroQuitTimes));
  }

  #[test]
  fn rejects_unknown_keys_and_bad_types() {
    assert!(matches!(
      Config::from_toml_str("[editor]\ntab-stop = 4\n"),
      Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
      Config::from_toml_str("[log]\nlevel = \"loud\"\n"),
      Err(ConfigError::Parse(_))
    ));
  }
}

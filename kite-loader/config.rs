use std::path::Path;

use eyre::{
  Context,
  Result,
};
use kite_lib::config::Config;

/// Built-in config.toml.
pub fn default_config() -> Result<toml::Value> {
  let default_config = include_str!("config.toml");
  toml::from_str(default_config).context("failed to parse built-in config.toml")
}

/// The user's config file at `path` merged over the built-in defaults.
///
/// A missing file is not an error; the defaults are used as they are.
pub fn user_config(path: &Path) -> Result<Config> {
  let default = default_config()?;

  let merged = match std::fs::read_to_string(path) {
    Ok(source) => {
      let user: toml::Value =
        toml::from_str(&source).with_context(|| format!("failed to parse {}", path.display()))?;
      crate::merge_toml_values(default, user, 3)
    },
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
      log::debug!("no config file at {}", path.display());
      default
    },
    Err(err) => {
      return Err(err).with_context(|| format!("failed to read {}", path.display()));
    },
  };

  Config::from_toml_value(merged).with_context(|| format!("invalid config in {}", path.display()))
}

/// Load the registered config file, see [`crate::config_file`].
pub fn load_config() -> Result<Config> {
  user_config(&crate::config_file())
}

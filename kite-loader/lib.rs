//! Where kite keeps its files, and how its configuration is assembled.

pub mod config;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

/// `$KITE_CONFIG_DIR`, or the platform config directory joined with `kite`.
pub fn config_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("KITE_CONFIG_DIR") {
    return PathBuf::from(dir);
  }
  let mut path = match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir(),
    Err(err) => {
      log::warn!("no home directory ({err}), using the working directory");
      PathBuf::from(".")
    },
  };
  path.push("kite");
  path
}

/// `$KITE_CACHE_DIR`, or the platform cache directory joined with `kite`.
pub fn cache_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("KITE_CACHE_DIR") {
    return PathBuf::from(dir);
  }
  let mut path = match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir(),
    Err(err) => {
      log::warn!("no home directory ({err}), using the working directory");
      PathBuf::from(".")
    },
  };
  path.push("kite");
  path
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE.get_or_init(default_config_file).clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("kite.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`.
///
/// Tables present on both sides are merged key by key down to `merge_depth`
/// levels; below that, and for every non-table value, `right` replaces
/// `left`.
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    // Catch everything else we didn't handle, and use the right value
    (_, value) => value,
  }
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}

#[cfg(test)]
mod merge_toml_tests {
  use toml::Value;

  use super::merge_toml_values;

  fn parse(source: &str) -> Value {
    toml::from_str(source).unwrap()
  }

  #[test]
  fn user_keys_override_defaults() {
    let base = parse("[editor]\nquit-times = 3\nmessage-timeout = 5\n");
    let user = parse("[editor]\nquit-times = 1\n");

    let merged = merge_toml_values(base, user, 3);
    let editor = merged.get("editor").unwrap();
    assert_eq!(editor.get("quit-times").unwrap().as_integer(), Some(1));
    assert_eq!(editor.get("message-timeout").unwrap().as_integer(), Some(5));
  }

  #[test]
  fn new_tables_are_added() {
    let base = parse("[editor]\nquit-times = 3\n");
    let user = parse("[log]\nlevel = \"debug\"\n");

    let merged = merge_toml_values(base, user, 3);
    assert!(merged.get("editor").is_some());
    assert_eq!(
      merged.get("log").unwrap().get("level").unwrap().as_str(),
      Some("debug")
    );
  }

  #[test]
  fn depth_zero_replaces_wholesale() {
    let base = parse("[editor]\nquit-times = 3\nmessage-timeout = 5\n");
    let user = parse("[editor]\nquit-times = 1\n");

    let merged = merge_toml_values(base, user.clone(), 0);
    assert_eq!(merged, user);
  }
}

//! Runtime settings: optional TOML file, then `RECAST_*` environment
//! variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "recast.toml";

const DEFAULT_STORE_PATH: &str = "~/.local/share/recast/recast.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file; created with its parent directories on first run.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Fixed seed for sentence selection. System randomness when unset.
  #[serde(default)]
  pub seed: Option<u64>,

  /// Where the interactive form writes its log. Defaults to the database
  /// path with a `.log` extension.
  #[serde(default)]
  pub log_file: Option<PathBuf>,
}

fn default_store_path() -> PathBuf { PathBuf::from(DEFAULT_STORE_PATH) }

impl Settings {
  /// Load settings from `config_path` (required only when given explicitly)
  /// layered under `RECAST_*` environment variables.
  pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
    let (path, required) = match config_path {
      Some(p) => (p.to_path_buf(), true),
      None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let settings = config::Config::builder()
      .add_source(config::File::from(path.clone()).required(required))
      .add_source(config::Environment::with_prefix("RECAST"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.store_path = expand_tilde(&settings.store_path);
    settings.log_file = settings.log_file.as_deref().map(expand_tilde);
    Ok(settings)
  }

  pub fn log_path(&self) -> PathBuf {
    self
      .log_file
      .clone()
      .unwrap_or_else(|| self.store_path.with_extension("log"))
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn non_tilde_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
    assert_eq!(expand_tilde(Path::new("rel/x.db")), PathBuf::from("rel/x.db"));
  }

  #[test]
  fn explicit_config_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("recast.toml");
    std::fs::write(&file, "store_path = \"/data/sentences.db\"\nseed = 9\n").unwrap();

    let settings = Settings::load(Some(file.as_path())).unwrap();
    assert_eq!(settings.store_path, PathBuf::from("/data/sentences.db"));
    assert_eq!(settings.seed, Some(9));
    assert_eq!(settings.log_path(), PathBuf::from("/data/sentences.log"));
  }

  #[test]
  fn missing_explicit_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Settings::load(Some(dir.path().join("absent.toml").as_path())).is_err());
  }
}

//! Server configuration, resolved once at start-up.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fleet_core::service::DEFAULT_WRITE_ATTEMPTS;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// argon2 PHC string for the deployment API key. See `--hash-key`.
  pub api_key_hash:   String,
  /// Read-modify-write attempts before a write surfaces as a conflict.
  #[serde(default = "default_write_attempts")]
  pub write_attempts: u32,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("fleet.db") }

fn default_write_attempts() -> u32 { DEFAULT_WRITE_ATTEMPTS }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `FLEET_*` environment
  /// variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FLEET"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
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
  use config::{Config, File, FileFormat};

  use super::*;

  fn parse(toml: &str) -> Result<ServerConfig, config::ConfigError> {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()?
      .try_deserialize()
  }

  #[test]
  fn defaults_fill_everything_but_the_key() {
    let cfg = parse(r#"api_key_hash = "$argon2id$stub""#).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.store_path, PathBuf::from("fleet.db"));
    assert_eq!(cfg.write_attempts, DEFAULT_WRITE_ATTEMPTS);
  }

  #[test]
  fn key_hash_is_required() {
    assert!(parse("port = 9000").is_err());
  }

  #[test]
  fn explicit_values_win() {
    let cfg = parse(
      r#"
        host = "0.0.0.0"
        port = 9300
        store_path = "/var/lib/fleet/fleet.db"
        api_key_hash = "$argon2id$stub"
        write_attempts = 5
      "#,
    )
    .unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:9300");
    assert_eq!(cfg.write_attempts, 5);
  }

  #[test]
  fn tilde_only_expands_as_a_prefix() {
    let plain = Path::new("/tmp/fleet.db");
    assert_eq!(expand_tilde(plain), plain);
    let odd = Path::new("data/~/fleet.db");
    assert_eq!(expand_tilde(odd), odd);
  }
}

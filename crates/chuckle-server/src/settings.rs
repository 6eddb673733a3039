//! Runtime configuration.
//!
//! Read from an optional TOML file, then overridden by `CHUCKLE_*`
//! environment variables (e.g. `CHUCKLE_DATABASE_PATH`). Every key has a
//! default, so the server starts with no configuration at all.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, ensure};
use chuckle_ingest::source::DEFAULT_JOKE_API_URL;
use chuckle_store_sqlite::RetryPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                     String,
  pub port:                     u16,
  pub database_path:            PathBuf,
  pub joke_api_url:             String,
  pub fetch_interval_secs:      u64,
  pub connect_attempts:         u32,
  pub connect_retry_delay_secs: u64,
  pub http_timeout_secs:        u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                     "0.0.0.0".to_string(),
      port:                     5000,
      database_path:            PathBuf::from("chuckle.db"),
      joke_api_url:             DEFAULT_JOKE_API_URL.to_string(),
      fetch_interval_secs:      120,
      connect_attempts:         10,
      connect_retry_delay_secs: 5,
      http_timeout_secs:        30,
    }
  }
}

impl ServerConfig {
  /// Load from `path` (missing file is fine) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CHUCKLE"))
      .build()
      .context("failed to read config file")?;
    Self::from_settings(settings)
  }

  fn from_settings(settings: config::Config) -> anyhow::Result<Self> {
    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    ensure!(cfg.fetch_interval_secs > 0, "fetch_interval_secs must be positive");
    ensure!(cfg.http_timeout_secs > 0, "http_timeout_secs must be positive");
    Ok(cfg)
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy::new(
      self.connect_attempts,
      Duration::from_secs(self.connect_retry_delay_secs),
    )
  }

  pub fn fetch_interval(&self) -> Duration { Duration::from_secs(self.fetch_interval_secs) }

  pub fn http_timeout(&self) -> Duration { Duration::from_secs(self.http_timeout_secs) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(toml: &str) -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()?;
    ServerConfig::from_settings(settings)
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = from_toml("").unwrap();
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.joke_api_url, "https://api.chucknorris.io/jokes/random");
    assert_eq!(cfg.fetch_interval(), Duration::from_secs(120));
    assert_eq!(cfg.retry_policy(), RetryPolicy::default());
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        port = 8080
        database_path = "/var/lib/chuckle/jokes.db"
        fetch_interval_secs = 30
        connect_attempts = 3
        connect_retry_delay_secs = 1
      "#,
    )
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.database_path, PathBuf::from("/var/lib/chuckle/jokes.db"));
    assert_eq!(cfg.fetch_interval(), Duration::from_secs(30));
    assert_eq!(cfg.retry_policy(), RetryPolicy::new(3, Duration::from_secs(1)));
  }

  #[test]
  fn zero_interval_is_rejected() {
    let err = from_toml("fetch_interval_secs = 0").unwrap_err();
    assert!(err.to_string().contains("fetch_interval_secs"), "{err}");
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/chuckle.toml")).unwrap();
    assert_eq!(cfg.connect_attempts, 10);
  }
}

//! Client configuration.

use std::{fmt, time::Duration};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use skyacct_core::{Error, Result};

fn default_timeout_secs() -> u64 { 30 }
fn default_token_ttl_hours() -> i64 { 24 }

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

/// Immutable connection settings, passed explicitly to [`crate::ApiClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
  /// Root of the account service, e.g. `https://accounts.example.com/api`.
  pub base_url:        String,
  /// Sent as `Authorization: Bearer <token>`. Omitted when empty.
  #[serde(default)]
  pub bearer_token:    String,
  /// Sent as `X-Api-Key`. Omitted when empty.
  #[serde(default)]
  pub api_key:         String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:    u64,
  /// Lifetime of tokens issued without an explicit expiry.
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours: i64,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url:        base_url.into(),
      bearer_token:    String::new(),
      api_key:         String::new(),
      timeout_secs:    default_timeout_secs(),
      token_ttl_hours: default_token_ttl_hours(),
    }
  }

  pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
    self.bearer_token = token.into();
    self
  }

  pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
    self.api_key = key.into();
    self
  }

  pub fn validate(&self) -> Result<()> {
    let invalid_url = || {
      Error::InvalidConfig(format!(
        "base_url must be an http(s) URL with a host, got {:?}",
        self.base_url
      ))
    };
    let url = Url::parse(self.base_url.trim()).map_err(|_| invalid_url())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
      return Err(invalid_url());
    }
    if self.timeout_secs == 0 {
      return Err(Error::InvalidConfig("timeout_secs must be positive".into()));
    }
    if self.token_ttl_hours <= 0 {
      return Err(Error::InvalidConfig(
        "token_ttl_hours must be positive".into(),
      ));
    }
    if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
      return Err(Error::InvalidConfig(format!(
        "token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
      )));
    }
    Ok(())
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  /// The configured token lifetime. Fails only for settings that
  /// [`validate`](Self::validate) would also reject.
  pub fn token_ttl(&self) -> Result<chrono::Duration> {
    chrono::Duration::try_hours(self.token_ttl_hours).ok_or_else(|| {
      Error::Validation(format!(
        "token_ttl_hours {} is out of range",
        self.token_ttl_hours
      ))
    })
  }

  /// Absolute URL for `path`, which must start with `/`.
  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim().trim_end_matches('/'), path)
  }
}

impl fmt::Debug for ClientConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn redact(s: &str) -> &'static str {
      if s.is_empty() { "" } else { "<redacted>" }
    }
    f.debug_struct("ClientConfig")
      .field("base_url", &self.base_url)
      .field("bearer_token", &redact(&self.bearer_token))
      .field("api_key", &redact(&self.api_key))
      .field("timeout_secs", &self.timeout_secs)
      .field("token_ttl_hours", &self.token_ttl_hours)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_without_doubling_slashes() {
    let config = ClientConfig::new("http://localhost:8080/api/");
    assert_eq!(config.url("/agency"), "http://localhost:8080/api/agency");
  }

  #[test]
  fn rejects_bad_settings() {
    assert!(ClientConfig::new("localhost").validate().is_err());
    let mut config = ClientConfig::new("https://accounts.test");
    assert!(config.validate().is_ok());
    config.timeout_secs = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn base_url_needs_a_scheme_and_host() {
    for bad in ["http://", "https://", "ftp://accounts.test", "://accounts.test", ""] {
      assert!(
        matches!(ClientConfig::new(bad).validate(), Err(Error::InvalidConfig(_))),
        "{bad:?} should be rejected"
      );
    }
    assert!(ClientConfig::new("http://localhost:8080/api").validate().is_ok());
    assert!(ClientConfig::new(" https://accounts.test ").validate().is_ok());
  }

  #[test]
  fn token_ttl_is_bounded() {
    let mut config = ClientConfig::new("https://accounts.test");
    config.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
    assert!(config.validate().is_ok());
    assert_eq!(
      config.token_ttl().unwrap(),
      chrono::Duration::hours(MAX_TOKEN_TTL_HOURS)
    );

    config.token_ttl_hours = 3_000_000_000;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    assert!(matches!(config.token_ttl(), Err(Error::Validation(_))));

    config.token_ttl_hours = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn deserializes_with_defaults() {
    let config: ClientConfig =
      serde_json::from_str(r#"{ "base_url": "https://accounts.test" }"#).unwrap();
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.token_ttl_hours, 24);
    assert!(config.bearer_token.is_empty());
  }

  #[test]
  fn debug_redacts_credentials() {
    let config = ClientConfig::new("https://accounts.test")
      .with_bearer_token("tok-123")
      .with_api_key("key-456");
    let debug = format!("{config:?}");
    assert!(!debug.contains("tok-123"));
    assert!(!debug.contains("key-456"));
  }
}

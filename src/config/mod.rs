//! Client configuration.
//!
//! The API key is held as a [`SecretString`] so it never shows up in
//! `Debug` output or logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{LettrError, LettrResult};

/// Default base URL for the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://app.lettr.com/api/";

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for a [`Lettr`](crate::client::Lettr) client.
#[derive(Debug, Clone)]
pub struct LettrConfig {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl LettrConfig {
    /// Config with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> LettrResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Starts a config builder.
    pub fn builder() -> LettrConfigBuilder {
        LettrConfigBuilder::default()
    }

    /// Reads configuration from the environment.
    ///
    /// `LETTR_API_KEY` is required; `LETTR_BASE_URL`, `LETTR_TIMEOUT`, and
    /// `LETTR_CONNECT_TIMEOUT` (both in seconds) override the defaults.
    pub fn from_env() -> LettrResult<Self> {
        let mut builder = Self::builder();

        match std::env::var("LETTR_API_KEY") {
            Ok(key) => builder = builder.api_key(key),
            Err(_) => {
                return Err(LettrError::Configuration {
                    message: "LETTR_API_KEY is not set".into(),
                })
            }
        }

        if let Ok(base_url) = std::env::var("LETTR_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        if let Ok(timeout) = std::env::var("LETTR_TIMEOUT") {
            builder = builder.timeout(Duration::from_secs(parse_secs("LETTR_TIMEOUT", &timeout)?));
        }
        if let Ok(timeout) = std::env::var("LETTR_CONNECT_TIMEOUT") {
            builder = builder
                .connect_timeout(Duration::from_secs(parse_secs("LETTR_CONNECT_TIMEOUT", &timeout)?));
        }

        builder.build()
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// The base URL, always with a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whole-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

fn parse_secs(name: &str, value: &str) -> LettrResult<u64> {
    value.parse().map_err(|_| LettrError::Configuration {
        message: format!("{name} must be a number of seconds, got {value:?}"),
    })
}

/// Builder for [`LettrConfig`].
#[derive(Debug, Default)]
pub struct LettrConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl LettrConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Validates and produces the config.
    pub fn build(self) -> LettrResult<LettrConfig> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LettrError::Configuration {
                message: "an API key is required".into(),
            })?;

        let mut base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // relative endpoint paths only join correctly against a
        // slash-terminated base
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(LettrConfig {
            api_key: SecretString::new(api_key),
            base_url,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = LettrConfig::new("key-123").unwrap();

        assert_eq!(config.api_key(), "key-123");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = LettrConfig::builder()
            .api_key("key")
            .base_url("https://staging.lettr.test/api")
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "https://staging.lettr.test/api/");
    }

    #[test]
    fn missing_or_blank_api_key_is_rejected() {
        assert!(matches!(
            LettrConfig::builder().build(),
            Err(LettrError::Configuration { .. })
        ));
        assert!(LettrConfig::new("   ").is_err());
    }

    #[test]
    fn debug_does_not_leak_the_key() {
        let config = LettrConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret"));
    }
}

//! Backend configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_METADATA_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_THEME_API_URL: &str = "http://localhost:3002/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A base URL is not an absolute http(s) URL.
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub metadata_api_url: String,
    pub theme_api_url: String,
    pub timeouts: Timeouts,
}

impl BackendConfig {
    /// Build typed backend config from environment variables.
    ///
    /// Optional:
    /// - `METADATA_API_URL`: default `http://localhost:3001/api`
    /// - `THEME_API_URL`: default `http://localhost:3002/api`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 120
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BackendConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is not an absolute http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let metadata_api_url = parse_url(
            "METADATA_API_URL",
            lookup("METADATA_API_URL").as_deref().unwrap_or(DEFAULT_METADATA_API_URL),
        )?;
        let theme_api_url =
            parse_url("THEME_API_URL", lookup("THEME_API_URL").as_deref().unwrap_or(DEFAULT_THEME_API_URL))?;
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("BACKEND_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("BACKEND_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { metadata_api_url, theme_api_url, timeouts })
    }

    /// Replace the metadata URL, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute http(s) URL.
    pub fn with_metadata_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.metadata_api_url = parse_url("METADATA_API_URL", url)?;
        Ok(self)
    }

    /// Replace the theme URL, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute http(s) URL.
    pub fn with_theme_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.theme_api_url = parse_url("THEME_API_URL", url)?;
        Ok(self)
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn parse_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let valid = reqwest::Url::parse(trimmed)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
    if !valid {
        return Err(ConfigError::InvalidUrl { var, value: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

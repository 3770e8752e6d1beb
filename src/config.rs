//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const STORAGE_DIR_NAME: &str = ".quill";
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is not an absolute `http`/`https` URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A numeric setting could not be parsed.
    #[error("config parse failed: {key}={value}")]
    Parse { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL with no trailing slash; every request path is
    /// appended to it.
    pub base_url: String,
    /// File backing durable client storage (the credential lives here).
    pub storage_path: PathBuf,
    /// Optional transport connect timeout. No overall request timeout is set.
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Build a config for `base_url` with default storage location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is not absolute
    /// `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            storage_path: default_storage_path(std::env::var("HOME").ok().as_deref()),
            connect_timeout: None,
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `QUILL_API_URL`: default `http://localhost:8000/api/v1`
    /// - `QUILL_STORAGE_PATH`: default `$HOME/.quill/storage.json`
    /// - `QUILL_CONNECT_TIMEOUT_SECS`: unset means transport default
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or timeout is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or timeout is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_base_url(
            lookup("QUILL_API_URL")
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .unwrap_or(DEFAULT_API_URL),
        )?;

        let storage_path = lookup("QUILL_STORAGE_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map_or_else(|| default_storage_path(lookup("HOME").as_deref()), PathBuf::from);

        let connect_timeout = match lookup("QUILL_CONNECT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Parse { key: "QUILL_CONNECT_TIMEOUT_SECS", value: raw.clone() })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { base_url, storage_path, connect_timeout })
    }

    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn default_storage_path(home: Option<&str>) -> PathBuf {
    let root = home.filter(|h| !h.is_empty()).map_or_else(|| PathBuf::from("."), PathBuf::from);
    root.join(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

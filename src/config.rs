//! Client configuration loaded from `~/.config/second-brain/config.toml`.
//!
//! Every field has a default, so a missing file is not an error. The
//! `BRAIN_CONFIG_DIR` environment variable relocates the whole directory
//! (config and session), and `BRAIN_API_URL` overrides the API base URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const CONFIG_DIR_ENV: &str = "BRAIN_CONFIG_DIR";
pub const API_URL_ENV: &str = "BRAIN_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
/// Third-party favicon lookup keyed by hostname.
pub const DEFAULT_FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Client settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Upper bound for each favicon or embed load.
    pub resource_timeout_secs: u64,
    pub favicon_service: String,
    /// Session lifetime. Unset means the session lasts until the server rejects it.
    pub session_ttl_hours: Option<u32>,
    /// Terminal width in characters; also picks the grid's column band.
    pub viewport_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            resource_timeout_secs: 5,
            favicon_service: DEFAULT_FAVICON_SERVICE.to_string(),
            session_ttl_hours: None,
            viewport_width: 100,
        }
    }
}

impl Config {
    /// Load from the config directory, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&config_dir().join("config.toml"))?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        Ok(config)
    }

    /// Load from a specific file. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// API base as a URL ending in `/`, so relative endpoints join under it.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.trim();
        let with_slash = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        Url::parse(&with_slash).map_err(|source| ConfigError::BaseUrl {
            url: raw.to_string(),
            source,
        })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn resource_timeout(&self) -> Duration {
        Duration::from_secs(self.resource_timeout_secs)
    }

    #[must_use]
    pub fn session_ttl(&self) -> Option<chrono::Duration> {
        self.session_ttl_hours
            .map(|h| chrono::Duration::hours(i64::from(h)))
    }
}

/// Directory holding `config.toml` and the session file.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("second-brain")
}

//! Configuration management for Skytrace.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Main application configuration.
///
/// This is loaded from `~/.config/skytrace/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URLs of the scraped sites
    pub sources: SourcesConfig,
    /// HTTP client settings
    pub http: HttpConfig,
    /// Default query counts
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SKYTRACE_FLIGHTRADAR_URL`: Override the flight data base URL
    /// - `SKYTRACE_JETPHOTOS_URL`: Override the photo site base URL
    /// - `SKYTRACE_TIMEOUT_SECS`: Override the HTTP request timeout
    /// - `SKYTRACE_USER_AGENT`: Override the HTTP user agent
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Like [`AppConfig::load_with_env`] but reads an explicit file.
    pub fn load_with_env_from(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `SKYTRACE_*` overrides looked up through `lookup`.
    ///
    /// Values that fail to parse are ignored and the configured value is kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SKYTRACE_FLIGHTRADAR_URL") {
            tracing::debug!("Override sources.flightradar_url from env: {}", val);
            self.sources.flightradar_url = val;
        }

        if let Some(val) = lookup("SKYTRACE_JETPHOTOS_URL") {
            tracing::debug!("Override sources.jetphotos_url from env: {}", val);
            self.sources.jetphotos_url = val;
        }

        if let Some(val) = lookup("SKYTRACE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.http.timeout_secs = secs;
                tracing::debug!("Override http.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("SKYTRACE_USER_AGENT") {
            tracing::debug!("Override http.user_agent from env");
            self.http.user_agent = val;
        }
    }

    /// Check that the configured values are usable.
    ///
    /// Base URLs must be absolute `http`/`https` URLs and the timeout must be non-zero.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_base_url("sources.flightradar_url", &self.sources.flightradar_url)?;
        validate_base_url("sources.jetphotos_url", &self.sources.jetphotos_url)?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/skytrace/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "skytrace", "skytrace").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn validate_base_url(field: &str, value: &str) -> ConfigResult<()> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(())
}

/// Base URLs of the two scraped sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Flight data site, aircraft pages live under `/data/aircraft/<reg>`
    pub flightradar_url: String,
    /// Photo site, listings live under `/photo/keyword/<reg>`
    pub jetphotos_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            flightradar_url: "https://www.flightradar24.com".to_string(),
            jetphotos_url: "https://www.jetphotos.com".to_string(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Skytrace/0.1.0".to_string(),
        }
    }
}

/// Counts used when a query doesn't specify them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of recent flights to request
    pub default_flights: usize,
    /// Number of photos to request
    pub default_photos: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_flights: 5,
            default_photos: 3,
        }
    }
}

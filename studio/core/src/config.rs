//! Studio Configuration
//!
//! Centralized configuration for the studio: where the generation service
//! lives, how long the pipeline animation dwells per stage, and how long a
//! request may run before failing visibly.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file (`~/.config/adgenius/studio.toml`)
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:5000"
//! request_timeout_secs = 60
//!
//! [pipeline]
//! stage_dwell_ms = 700
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::DEFAULT_STAGE_DWELL;

/// Default base URL of the local dev service
const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Resolved studio configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudioConfig {
    /// Base URL of the generation service
    pub backend_base_url: String,
    /// How long the pipeline animation holds each stage
    pub stage_dwell: Duration,
    /// Timeout applied to every service request
    pub request_timeout: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            stage_dwell: DEFAULT_STAGE_DWELL,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl StudioConfig {
    /// Create configuration from environment variables over defaults
    ///
    /// Reads `ADGENIUS_BACKEND_URL`, `ADGENIUS_STAGE_DWELL_MS`, and
    /// `ADGENIUS_REQUEST_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment-variable overrides to this configuration
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("ADGENIUS_BACKEND_URL") {
            self.backend_base_url = url;
        }
        if let Some(ms) = env_u64("ADGENIUS_STAGE_DWELL_MS") {
            self.stage_dwell = Duration::from_millis(ms);
        }
        if let Some(secs) = env_u64("ADGENIUS_REQUEST_TIMEOUT_SECS") {
            self.request_timeout = Duration::from_secs(secs);
        }
        self
    }
}

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Base URL of the generation service
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

/// Pipeline section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineToml {
    /// Per-stage animation dwell in milliseconds
    pub stage_dwell_ms: Option<u64>,
}

/// Raw TOML configuration file contents
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioToml {
    /// Backend section
    pub backend: BackendToml,
    /// Pipeline section
    pub pipeline: PipelineToml,
}

impl StudioToml {
    /// Fold file values over defaults, producing a resolved configuration
    #[must_use]
    pub fn into_config(self) -> StudioConfig {
        let mut config = StudioConfig::default();
        if let Some(url) = self.backend.base_url {
            config.backend_base_url = url;
        }
        if let Some(secs) = self.backend.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.pipeline.stage_dwell_ms {
            config.stage_dwell = Duration::from_millis(ms);
        }
        config
    }
}

/// Get the default config file path (`~/.config/adgenius/studio.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("adgenius").join("studio.toml"))
}

/// Load configuration with env > file > default priority
///
/// With an explicit `path`, the file must exist and parse. Without one, the
/// default path is used if present and silently skipped otherwise.
///
/// # Errors
///
/// Returns [`ConfigError`] when an explicitly given file cannot be read, or
/// when any file fails to parse.
pub fn load_config(path: Option<&Path>) -> Result<StudioConfig, ConfigError> {
    let file_config = match path {
        Some(path) => Some(load_toml(path)?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(load_toml(&path)?),
            _ => None,
        },
    };

    let config = file_config
        .map(StudioToml::into_config)
        .unwrap_or_default()
        .with_env_overrides();

    let dwell_ms = config.stage_dwell.as_millis();
    tracing::debug!(
        backend = %config.backend_base_url,
        dwell_ms,
        "studio configuration resolved"
    );

    Ok(config)
}

fn load_toml(path: &Path) -> Result<StudioToml, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

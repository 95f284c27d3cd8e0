//! Store configuration
//!
//! Configuration only shapes what the store reports about itself. It never
//! changes which inserts succeed or what a scan returns.
//!
//! Loaded from a JSON file:
//!
//! ```json
//! { "log_level": "info", "warn_on_unindexable_keys": true, "metrics_enabled": true }
//! ```
//!
//! Every field is optional; unknown fields are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::LogLevel;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "AERO_KV_CONFIG_READ",
            ConfigError::Parse(_) => "AERO_KV_CONFIG_INVALID",
        }
    }
}

/// Configuration for a `Store` instance.
///
/// # Example
///
/// ```rust
/// use aerokv::{LogLevel, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_log_level(LogLevel::Off)
///     .with_metrics(false);
/// assert!(!config.metrics_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Minimum severity written to the log (default: warn)
    pub log_level: LogLevel,
    /// Log a warning when a key cannot be prefix-indexed (default: true)
    pub warn_on_unindexable_keys: bool,
    /// Maintain operation counters (default: true)
    pub metrics_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            warn_on_unindexable_keys: true,
            metrics_enabled: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that logs nothing.
    pub fn quiet() -> Self {
        Self::default().with_log_level(LogLevel::Off)
    }

    /// Sets the minimum log severity
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Enables or disables the un-indexable key warning
    pub fn with_unindexable_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_unindexable_keys = enabled;
        self
    }

    /// Enables or disables operation counters
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Parse configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

//! CLI-specific error types
//!
//! Error codes:
//! - AERO_KV_CLI_CONFIG_ERROR
//! - AERO_KV_CLI_IO_ERROR
//!
//! All CLI errors end the process with a non-zero exit code. Errors in a
//! single request line do not: they become error responses.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Errors that stop the binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("AERO_KV_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("AERO_KV_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("AERO_KV_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "AERO_KV_CLI_CONFIG_ERROR",
            CliError::Io(_) | CliError::Json(_) => "AERO_KV_CLI_IO_ERROR",
        }
    }
}

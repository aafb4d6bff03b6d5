//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Default chat server address (the reference server's development port).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("server.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("server.base_url must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("connect_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("history_size cannot be 0")]
    InvalidHistorySize,
}

/// Raw server configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL the chat endpoints are resolved against
    pub base_url: String,
    /// Connect timeout in seconds; reads never time out
    pub connect_timeout_seconds: Option<u64>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_seconds: None,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    pub history_file: Option<PathBuf>,
    /// Number of entries kept in the history file
    pub history_size: usize,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            history_size: 1000,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file, in addition to stderr
    pub file: Option<PathBuf>,
    /// JSONL conversation transcript
    pub conversation_log: Option<PathBuf>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat server settings
    pub server: FileServerConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let url = reqwest::Url::parse(&self.server.base_url)
            .map_err(|e| ConfigValidationError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigValidationError::UnsupportedScheme(
                url.scheme().to_string(),
            ));
        }

        if let Some(0) = self.server.connect_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.repl.history_size == 0 {
            return Err(ConfigValidationError::InvalidHistorySize);
        }

        Ok(())
    }
}

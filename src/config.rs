//! Application configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a
//! valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./carlot.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Config file already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to write config '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate().map_err(ConfigError::Invalid)?;
        self.logging.validate().map_err(ConfigError::Invalid)?;

        Ok(())
    }

    /// Write the default configuration, refusing to overwrite
    pub fn write_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }

        let config = AppConfig::default();
        let content = serde_json::to_string_pretty(&config)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;

        Ok(config)
    }
}

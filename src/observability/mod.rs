//! Logging setup
//!
//! Structured logs through `tracing`. One subscriber per process,
//! installed by the CLI before anything else runs:
//!
//! - `pretty`: human-readable lines for development
//! - `json`: one JSON object per event, for log shippers
//!
//! `RUST_LOG` overrides the configured level when set.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Accepted level names
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Line format (default: pretty)
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Checks the level name
    pub fn validate(&self) -> Result<(), String> {
        let level = self.level.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "Invalid log level '{}'. Expected one of: {}",
                self.level,
                LOG_LEVELS.join(", ")
            ))
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_lowercase()))
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(false);

    // Ignore error if already initialized (tests, embedded use)
    let _ = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            format: LogFormat::Json,
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("loud"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(&LoggingConfig::default());
        init_logging(&LoggingConfig::default());
    }
}

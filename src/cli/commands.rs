//! CLI command implementations

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::schema::Clock;
use crate::validation::CarValidation;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{accepted_line, read_request, rejected_line, write_line};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(config.as_deref()),
        Command::Validate { at } => validate(at.as_deref()),
    }
}

/// Write the default configuration file
pub fn init(config_path: &Path) -> CliResult<()> {
    AppConfig::write_default(config_path)?;
    write_line(&serde_json::json!({
        "status": "ok",
        "config": config_path.display().to_string()
    }))
}

/// Start the HTTP server and block until it stops
///
/// Without `--config` the built-in defaults are used.
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = match config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.logging);
    info!(
        host = %config.server.host,
        port = config.server.port,
        log_format = %config.logging.format,
        "starting carlot"
    );

    let server = HttpServer::new(config.server);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// Validate one car document from stdin and print the outcome
pub fn validate(at: Option<&str>) -> CliResult<()> {
    let clock = match at {
        Some(raw) => Clock::Fixed(parse_instant(raw)?),
        None => Clock::System,
    };

    let candidate = read_request()?;
    let line = validate_document(&candidate, clock)?;
    write_line(&line)
}

/// Outcome line for one candidate
pub fn validate_document(candidate: &Value, clock: Clock) -> CliResult<Value> {
    match CarValidation::new(clock).check(candidate) {
        Ok(record) => accepted_line(&record),
        Err(errors) => rejected_line(&errors),
    }
}

fn parse_instant(raw: &str) -> CliResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| CliError::invalid_argument(format!("--at must be RFC 3339 ({}): {}", e, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixed() -> Clock {
        Clock::Fixed(Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_validate_document_accepts() {
        let candidate = json!({
            "brand": "Fiat",
            "model": "Uno",
            "color": "PRETO",
            "year_manufacture": 2015,
            "imported": false,
            "plates": "ABC1D234"
        });

        let line = validate_document(&candidate, fixed()).unwrap();
        assert_eq!(line["status"], "ok");
        assert_eq!(line["data"]["brand"], "Fiat");
        assert_eq!(line["data"]["selling_price"], Value::Null);
    }

    #[test]
    fn test_validate_document_rejects() {
        let candidate = json!({
            "brand": "Fiat",
            "model": "Uno",
            "color": "branco",
            "year_manufacture": 2015,
            "imported": false,
            "plates": "ABC1D234"
        });

        let line = validate_document(&candidate, fixed()).unwrap();
        assert_eq!(line["status"], "rejected");
        assert_eq!(line["errors"], json!({"color": "The selected color is invalid."}));
    }

    #[test]
    fn test_parse_instant() {
        let instant = parse_instant("2024-07-15T10:00:00-03:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 7, 15, 13, 0, 0).unwrap());
        assert!(parse_instant("yesterday").is_err());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carlot.json");

        init(&path).unwrap();
        assert!(path.exists());

        let err = init(&path).unwrap_err();
        assert_eq!(err.code(), super::super::errors::CliErrorCode::ConfigError);
    }
}

//! CLI module for carlot
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Run the HTTP inventory service
//! - validate: One-shot validation of a car document from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, validate, validate_document};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, read_request, write_line};

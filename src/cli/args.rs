//! CLI argument definitions using clap
//!
//! Commands:
//! - carlot init --config <path>
//! - carlot serve --config <path>
//! - carlot validate [--at <rfc3339>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// carlot - car inventory service
#[derive(Parser, Debug)]
#[command(name = "carlot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate one car record read from stdin
    Validate {
        /// Instant to validate against (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

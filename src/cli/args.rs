//! CLI argument definitions using clap
//!
//! Commands:
//! - aerokv demo
//! - aerokv serve [--config <path>] [--log-level <level>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogLevel;

/// aerokv - An embeddable key/field/value store with version history and TTL
#[derive(Parser, Debug)]
#[command(name = "aerokv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a few inserts and print a prefix scan
    Demo,

    /// Read JSON-line requests from stdin and answer on stdout
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured log level (trace, info, warn, error, off)
        #[arg(long)]
        log_level: Option<LogLevel>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

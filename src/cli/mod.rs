//! CLI module for aerokv
//!
//! Provides command-line interface for:
//! - demo: Fixed insert/scan walkthrough
//! - serve: JSON-lines request loop over stdin/stdout

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{demo, handle_request, run, run_command, serve, serve_stream, Request, BAD_REQUEST};
pub use errors::{CliError, CliResult};
pub use io::{error_response, ok_response, write_line};

//! CLI module for hitrows
//!
//! Provides command-line interface for:
//! - rows: Flatten one search response from stdin
//! - validate: Check a configuration file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{rows, run, run_command, run_rows, run_validate, validate};
pub use config::{ColumnConfig, ColumnKind, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};

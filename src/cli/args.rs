//! CLI argument definitions using clap
//!
//! Commands:
//! - hitrows rows --config <path> [--limit N] [--delivered N]
//! - hitrows validate --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hitrows - flatten search hits and their nested matches into rows
#[derive(Parser, Debug)]
#[command(name = "hitrows")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flatten one search response read from stdin
    Rows {
        /// Path to configuration file
        #[arg(long, default_value = "./hitrows.json")]
        config: PathBuf,

        /// Row limit, overrides the configured one (negative is unbounded)
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i64>,

        /// Top-level hits delivered by earlier pages of the same scroll
        #[arg(long, default_value_t = 0)]
        delivered: u64,
    },

    /// Check a configuration file and exit
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./hitrows.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

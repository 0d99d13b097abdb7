//! CLI command implementations
//!
//! `rows` reads one search response from stdin and prints its rows together
//! with the continuation decision for the next page. `validate` only checks
//! the configuration.

use std::path::Path;

use serde_json::{json, Value};

use crate::response::SearchPage;
use crate::rowset::SearchHitRowSet;

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_input, write_response};

/// Run the CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Rows {
            config,
            limit,
            delivered,
        } => rows(&config, limit, delivered),
        Command::Validate { config } => validate(&config),
    }
}

/// Flatten the response on stdin
pub fn rows(config_path: &Path, limit: Option<i64>, delivered: u64) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let input = read_input()?;

    let data = run_rows(&config, &input, limit, delivered)?;
    write_response(data)
}

/// Flattens one response document into the `rows` payload.
///
/// `limit` overrides the configured limit. `delivered` is the number of
/// top-level hits returned by earlier pages of the same scroll.
pub fn run_rows(
    config: &Config,
    input: &str,
    limit: Option<i64>,
    delivered: u64,
) -> CliResult<Value> {
    let page = SearchPage::from_json(input)?.with_delivered_before(delivered);
    let (extractors, mask) = config.extractors();
    let limit = limit.unwrap_or(config.limit);

    let mut row_set = SearchHitRowSet::with_mask(&page, extractors, &mask, limit)?;

    let mut rows = Vec::with_capacity(row_set.size());
    row_set.for_each_row(|row| {
        rows.push(Value::Array(row.row_values()?));
        Ok(())
    })?;

    let continuation = row_set.continuation();
    let token = match continuation.token() {
        Some(token) => serde_json::to_value(token)?,
        None => Value::Null,
    };

    Ok(json!({
        "columns": config.column_names(),
        "rows": rows,
        "size": row_set.size(),
        "raw_size": row_set.raw_size(),
        "relation": row_set.relation(),
        "continuation": token,
        "withheld": continuation.withheld().map(|reason| reason.as_str()),
        "limit_reached": continuation.limit_reached(),
        "source_exhausted": continuation.source_exhausted(),
        "truncated": continuation.truncated(),
    }))
}

/// Check a configuration file
pub fn validate(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data = run_validate(&config)?;
    write_response(data)
}

/// Builds the extractors of a loaded configuration and checks that they
/// flatten at most one nested relation.
pub fn run_validate(config: &Config) -> CliResult<Value> {
    let (extractors, mask) = config.extractors();
    let relation = SearchHitRowSet::check_extractors(&extractors, &mask)?;

    Ok(json!({
        "columns": config.column_names(),
        "relation": relation,
        "limit": config.limit,
    }))
}

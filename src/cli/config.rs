//! Configuration file for the hitrows CLI
//!
//! ```json
//! {
//!   "columns": [
//!     {"type": "field", "path": "name"},
//!     {"type": "nested_field", "relation": "address", "path": "city"},
//!     {"type": "score", "hidden": true}
//!   ],
//!   "limit": -1,
//!   "array_leniency": false,
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::rowset::{
    FieldExtractor, HitExtractor, IdExtractor, OffsetExtractor, ScoreExtractor, UNBOUNDED_LIMIT,
};

use super::errors::{CliError, CliResult};

/// What a column reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Top-level `_source` field
    Field { path: String },
    /// `_source` field of a nested record
    NestedField { relation: String, path: String },
    /// Top-level match score
    Score,
    /// Match score of a nested record
    NestedScore { relation: String },
    /// Top-level `_id`
    Id,
    /// Offset of a nested record
    NestedOffset { relation: String },
}

/// One configured column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(flatten)]
    pub kind: ColumnKind,

    /// Output name (optional, derived from the kind)
    #[serde(default)]
    pub name: Option<String>,

    /// Hidden columns still count for nested relation discovery
    #[serde(default)]
    pub hidden: bool,
}

impl ColumnConfig {
    /// Output name of the column
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            ColumnKind::Field { path } => path.clone(),
            ColumnKind::NestedField { relation, path } => format!("{}.{}", relation, path),
            ColumnKind::Score => "_score".to_string(),
            ColumnKind::NestedScore { relation } => format!("{}._score", relation),
            ColumnKind::Id => "_id".to_string(),
            ColumnKind::NestedOffset { relation } => format!("{}._offset", relation),
        }
    }

    fn extractor(&self, array_leniency: bool) -> HitExtractor {
        match &self.kind {
            ColumnKind::Field { path } => {
                HitExtractor::hit(FieldExtractor::new(path).with_array_leniency(array_leniency))
            }
            ColumnKind::NestedField { relation, path } => HitExtractor::nested(
                relation,
                FieldExtractor::new(path).with_array_leniency(array_leniency),
            ),
            ColumnKind::Score => HitExtractor::hit(ScoreExtractor),
            ColumnKind::NestedScore { relation } => HitExtractor::nested(relation, ScoreExtractor),
            ColumnKind::Id => HitExtractor::hit(IdExtractor),
            ColumnKind::NestedOffset { relation } => {
                HitExtractor::nested(relation, OffsetExtractor)
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        let (relation, path) = match &self.kind {
            ColumnKind::Field { path } => (None, Some(path)),
            ColumnKind::NestedField { relation, path } => (Some(relation), Some(path)),
            ColumnKind::NestedScore { relation } | ColumnKind::NestedOffset { relation } => {
                (Some(relation), None)
            }
            ColumnKind::Score | ColumnKind::Id => (None, None),
        };

        if relation.is_some_and(|r| r.trim().is_empty()) {
            return Err(CliError::config_error(format!(
                "column '{}' has an empty relation",
                self.display_name()
            )));
        }
        if path.is_some_and(|p| p.trim().is_empty()) {
            return Err(CliError::config_error("field column has an empty path"));
        }
        Ok(())
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Columns in output order (required)
    pub columns: Vec<ColumnConfig>,

    /// Row limit (optional, default unbounded)
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Return the first value of multi-valued fields instead of failing
    #[serde(default)]
    pub array_leniency: bool,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_limit() -> i64 {
    UNBOUNDED_LIMIT
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and apply its log level
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config = Self::from_json(&content)?;
        Logger::set_min_severity(config.severity()?);

        let columns = config.columns.len().to_string();
        let path = path.to_string_lossy();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("columns", columns.as_str()), ("path", &*path)],
        );

        Ok(config)
    }

    /// Parse and validate configuration
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.columns.is_empty() {
            return Err(CliError::config_error("at least one column is required"));
        }
        if self.columns.iter().all(|column| column.hidden) {
            return Err(CliError::config_error("at least one column must be visible"));
        }
        for column in &self.columns {
            column.validate()?;
        }
        self.severity()?;

        Ok(())
    }

    /// Parsed minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)
    }

    /// Extractors in column order plus the visibility mask
    pub fn extractors(&self) -> (Vec<HitExtractor>, Vec<bool>) {
        self.columns
            .iter()
            .map(|column| (column.extractor(self.array_leniency), !column.hidden))
            .unzip()
    }

    /// Names of the visible columns
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| !column.hidden)
            .map(ColumnConfig::display_name)
            .collect()
    }
}

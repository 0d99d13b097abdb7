//! `_source` field extraction
//!
//! Paths are dotted (`address.city`). A source may store either the nested
//! object form (`{"address": {"city": ..}}`) or the flattened key form
//! (`{"address.city": ..}`); both resolve. Arrays met along the path are
//! traversed element by element.
//!
//! Multi-valued results are rejected unless array leniency is enabled, in
//! which case the first value is returned.

use serde_json::Value;

use super::errors::{RowSetError, RowSetResult};
use super::extractor::{ExtractValue, HitSource};

/// Reads a dotted path from the hit's `_source`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExtractor {
    path: String,
    array_leniency: bool,
}

impl FieldExtractor {
    /// Creates a strict extractor for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            array_leniency: false,
        }
    }

    /// Returns the first value instead of failing on multi-valued fields
    pub fn with_array_leniency(mut self, lenient: bool) -> Self {
        self.array_leniency = lenient;
        self
    }

    /// Returns the field path
    pub fn path(&self) -> &str {
        &self.path
    }

    fn unwrap_multi_value(&self, values: Vec<Value>) -> RowSetResult<Value> {
        let mut values = values.into_iter();
        match (values.next(), values.next()) {
            (None, _) => Ok(Value::Null),
            (Some(single), None) => Ok(single),
            (Some(first), Some(_)) if self.array_leniency => Ok(first),
            (Some(_), Some(_)) => Err(RowSetError::extraction_failed(format!(
                "field '{}' holds multiple values; array leniency is disabled",
                self.path
            ))),
        }
    }
}

impl ExtractValue for FieldExtractor {
    fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value> {
        let mut found = Vec::new();
        collect_path(hit.source(), &self.path, &mut found);

        let mut flat = Vec::with_capacity(found.len());
        for value in found {
            match value {
                Value::Array(items) => flat.extend(items.iter().cloned()),
                other => flat.push(other.clone()),
            }
        }

        self.unwrap_multi_value(flat)
    }
}

// Collects every value reachable under `path`.
fn collect_path<'v>(value: &'v Value, path: &str, out: &mut Vec<&'v Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_path(item, path, out);
            }
        }
        Value::Object(map) => {
            if let Some(direct) = map.get(path) {
                out.push(direct);
                return;
            }
            for (split, _) in path.match_indices('.') {
                if let Some(child) = map.get(&path[..split]) {
                    collect_path(child, &path[split + 1..], out);
                }
            }
        }
        _ => {}
    }
}

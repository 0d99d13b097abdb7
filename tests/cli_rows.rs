//! CLI Rows Tests
//!
//! Tests for the `rows` payload built from a config file and a raw response:
//! - Columns follow config order, hidden columns omitted
//! - Paging across two responses with a bounded limit

use hitrows::cli::{run_rows, Config};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn make_config(dir: &TempDir, config: Value) -> Config {
    let path = dir.path().join("hitrows.json");
    fs::write(&path, config.to_string()).unwrap();
    Config::load(&path).unwrap()
}

fn make_response(scroll_id: Option<&str>, total: u64, ids: &[&str]) -> String {
    let hits: Vec<Value> = ids
        .iter()
        .map(|id| json!({"_id": id, "_score": 1.0, "_source": {"name": id}}))
        .collect();
    let mut response = json!({"hits": {"total": {"value": total, "relation": "eq"}, "hits": hits}});
    if let Some(scroll_id) = scroll_id {
        response["_scroll_id"] = json!(scroll_id);
    }
    response.to_string()
}

// =============================================================================
// Rows Payload
// =============================================================================

/// Hidden columns are computed but not printed.
#[test]
fn test_hidden_columns_omitted() {
    let dir = TempDir::new().unwrap();
    let config = make_config(
        &dir,
        json!({"columns": [
            {"type": "id"},
            {"type": "score", "hidden": true},
            {"type": "field", "path": "name", "name": "who"}
        ]}),
    );

    let data = run_rows(&config, &make_response(None, 2, &["x", "y"]), None, 0).unwrap();

    assert_eq!(data["columns"], json!(["_id", "who"]));
    assert_eq!(data["rows"], json!([["x", "x"], ["y", "y"]]));
    assert_eq!(data["relation"], Value::Null);
    assert_eq!(data["withheld"], "no_scroll");
}

/// Second page is built with the remaining limit of the first.
#[test]
fn test_paging_with_limit() {
    let dir = TempDir::new().unwrap();
    let config = make_config(&dir, json!({"columns": [{"type": "id"}], "limit": 5}));

    let first = run_rows(&config, &make_response(Some("s1"), 10, &["a", "b", "c"]), None, 0)
        .unwrap();
    assert_eq!(
        first["continuation"],
        json!({"scroll_id": "s1", "remaining_limit": 2})
    );

    let remaining = first["continuation"]["remaining_limit"].as_i64();
    let second = run_rows(
        &config,
        &make_response(Some("s2"), 10, &["d", "e", "f"]),
        remaining,
        3,
    )
    .unwrap();

    assert_eq!(second["rows"], json!([["d"], ["e"]]));
    assert_eq!(second["continuation"], Value::Null);
    assert_eq!(second["limit_reached"], true);
    assert_eq!(second["truncated"], true);
    assert_eq!(second["source_exhausted"], false);
}

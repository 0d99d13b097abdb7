//! Row Set Iteration Tests
//!
//! Tests for row flattening:
//! - Without nested columns rows equal top-level hits
//! - With one nested relation rows equal the sum of nested matches
//! - Order is hit order, then nested offset order
//! - Reset returns to the same first row

use hitrows::response::{NestedHit, SearchHit, SearchPage};
use hitrows::rowset::{HitExtractor, SearchHitRowSet, UNBOUNDED_LIMIT};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn make_hit(id: &str, offsets: &[i32]) -> SearchHit {
    let nested = offsets
        .iter()
        .map(|offset| NestedHit::new("address", *offset, json!({ "offset": offset })))
        .collect();
    SearchHit::new(id, json!({ "id": id })).with_inner_hits("address_1", nested)
}

fn make_page(hits: &[(&str, Vec<i32>)]) -> SearchPage {
    SearchPage::new(hits.iter().map(|(id, offsets)| make_hit(id, offsets)).collect())
}

fn nested_extractors() -> Vec<HitExtractor> {
    vec![
        HitExtractor::field("id"),
        HitExtractor::nested_field("address", "offset"),
    ]
}

fn collect_rows(row_set: &mut SearchHitRowSet<'_>) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    row_set
        .for_each_row(|row| {
            rows.push(row.row_values()?);
            Ok(())
        })
        .unwrap();
    rows
}

// =============================================================================
// Top-Level Rows
// =============================================================================

/// Without nested extractors, one row per hit in page order.
#[test]
fn test_no_nesting_equivalence() {
    let page = make_page(&[("a", vec![1, 2]), ("b", vec![]), ("c", vec![5])]);
    let mut row_set =
        SearchHitRowSet::new(&page, vec![HitExtractor::field("id")], UNBOUNDED_LIMIT).unwrap();

    assert_eq!(row_set.levels(), 1);
    assert_eq!(row_set.size(), 3);
    assert_eq!(
        collect_rows(&mut row_set),
        vec![vec![json!("a")], vec![json!("b")], vec![json!("c")]]
    );
}

/// Empty page yields no rows.
#[test]
fn test_empty_page() {
    let page = SearchPage::new(vec![]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    assert!(!row_set.has_current());
    assert!(collect_rows(&mut row_set).is_empty());
}

// =============================================================================
// Nested Rows
// =============================================================================

/// Row count is the sum of nested matches per hit.
#[test]
fn test_cartesian_count() {
    let page = make_page(&[("a", vec![0, 1, 2]), ("b", vec![4]), ("c", vec![]), ("d", vec![0, 9])]);
    let row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    assert_eq!(row_set.raw_size(), 6);
    assert_eq!(row_set.size(), 6);
}

/// Rows follow hit order, then ascending offset; empty hits are skipped.
#[test]
fn test_end_to_end_order() {
    let page = make_page(&[("D0", vec![3, 1]), ("D1", vec![]), ("D2", vec![7])]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    assert_eq!(
        collect_rows(&mut row_set),
        vec![
            vec![json!("D0"), json!(1)],
            vec![json!("D0"), json!(3)],
            vec![json!("D2"), json!(7)],
        ]
    );
}

/// A leading hit with no matches does not become the first row.
#[test]
fn test_leading_empty_hit_skipped() {
    let page = make_page(&[("a", vec![]), ("b", vec![]), ("c", vec![2])]);
    let row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    assert!(row_set.has_current());
    assert_eq!(row_set.indices(), &[2, 0]);
    assert_eq!(row_set.current_hit().map(SearchHit::id), Some("c"));
}

/// Duplicate offsets across sections collapse, first seen wins.
#[test]
fn test_duplicate_offsets_deduplicated() {
    let hit = SearchHit::new("a", json!({ "id": "a" }))
        .with_inner_hits(
            "address_1",
            vec![
                NestedHit::new("address", 5, json!({ "offset": 5, "from": "first" })),
                NestedHit::new("address", 2, json!({ "offset": 2, "from": "first" })),
            ],
        )
        .with_inner_hits(
            "address_2",
            vec![
                NestedHit::new("address", 5, json!({ "offset": 5, "from": "second" })),
                NestedHit::new("address", 9, json!({ "offset": 9, "from": "second" })),
            ],
        );
    let page = SearchPage::new(vec![hit]);
    let mut row_set = SearchHitRowSet::new(
        &page,
        vec![
            HitExtractor::nested_field("address", "offset"),
            HitExtractor::nested_field("address", "from"),
        ],
        UNBOUNDED_LIMIT,
    )
    .unwrap();

    assert_eq!(
        collect_rows(&mut row_set),
        vec![
            vec![json!(2), json!("first")],
            vec![json!(5), json!("first")],
            vec![json!(9), json!("second")],
        ]
    );
}

/// A section named without a suffix flattens no rows.
#[test]
fn test_unsuffixed_section_yields_no_rows() {
    let hit = SearchHit::new("a", json!({ "id": "a" }))
        .with_inner_hits("address", vec![NestedHit::new("address", 0, json!({ "offset": 0 }))]);
    let page = SearchPage::new(vec![hit]);
    let row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    assert_eq!(row_set.raw_size(), 0);
    assert!(!row_set.has_current());
}

/// Advancing visits every path in lexicographic order.
#[test]
fn test_odometer_order() {
    let page = make_page(&[("a", vec![0, 1]), ("b", vec![0]), ("c", vec![0, 1, 2])]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();

    let mut paths = vec![row_set.indices().to_vec()];
    while row_set.advance() {
        paths.push(row_set.indices().to_vec());
    }

    assert_eq!(
        paths,
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![1, 0],
            vec![2, 0],
            vec![2, 1],
            vec![2, 2],
        ]
    );
    assert_eq!(row_set.row(), 5);
}

/// Reset is idempotent and restarts iteration.
#[test]
fn test_reset_idempotent() {
    let page = make_page(&[("a", vec![]), ("b", vec![4, 3])]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), UNBOUNDED_LIMIT).unwrap();
    let first = row_set.indices().to_vec();

    row_set.advance();
    row_set.reset();
    row_set.reset();

    assert_eq!(row_set.indices(), first.as_slice());
    assert_eq!(row_set.row(), 0);
    assert_eq!(collect_rows(&mut row_set), collect_rows(&mut row_set));
}

// =============================================================================
// Limits
// =============================================================================

/// Limit 0 produces no rows.
#[test]
fn test_limit_zero() {
    let page = make_page(&[("a", vec![1, 2])]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), 0).unwrap();

    assert_eq!(row_set.size(), 0);
    assert!(!row_set.has_current());
    assert!(!row_set.advance());
    assert!(collect_rows(&mut row_set).is_empty());
}

/// Limit cuts the row sequence mid-hit.
#[test]
fn test_limit_truncates_nested_rows() {
    let page = make_page(&[("a", vec![1, 2, 3]), ("b", vec![4])]);
    let mut row_set = SearchHitRowSet::new(&page, nested_extractors(), 2).unwrap();

    assert_eq!(row_set.raw_size(), 4);
    assert_eq!(
        collect_rows(&mut row_set),
        vec![vec![json!("a"), json!(1)], vec![json!("a"), json!(2)]]
    );
    assert!(row_set.continuation().truncated());
}

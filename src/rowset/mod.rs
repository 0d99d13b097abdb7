//! Row-set cursor for hitrows
//!
//! Turns one page of search hits into a flat sequence of rows.
//!
//! # Flow
//!
//! 1. Collect the nested relation referenced by the extractors (at most one)
//! 2. Resolve, deduplicate and sort the nested records of every hit
//! 3. Size the page: nested records (or hits) capped by the limit
//! 4. Decide the continuation for the next page
//! 5. Iterate rows with `has_current` / `advance`, extracting columns
//!
//! # Guarantees
//!
//! - Rows follow hit order, then nested offset order
//! - A hit without nested matches yields no rows when a relation is flattened
//! - Construction fails before iteration on configuration errors
//! - Extraction failures never move the cursor

mod continuation;
mod cursor;
mod errors;
mod extractor;
mod field;
mod odometer;
mod resolver;

pub use continuation::{
    Continuation, ContinuationCalculator, ContinuationToken, ScrollSignal, WithheldReason,
    UNBOUNDED_LIMIT,
};
pub use cursor::SearchHitRowSet;
pub use errors::{RowSetError, RowSetErrorCode, RowSetResult, Severity};
pub use extractor::{
    ExtractValue, ExtractorLevel, HitExtractor, HitSource, IdExtractor, OffsetExtractor,
    ScoreExtractor,
};
pub use field::FieldExtractor;
pub use odometer::Odometer;
pub use resolver::NestedHitResolver;

//! Column extractors
//!
//! An extractor turns the hit selected by the row set into one column value.
//! `HitExtractor` carries the level discriminant: top-level extractors read
//! the document itself, nested extractors read one record of a named nested
//! relation. The value computation is delegated to an `ExtractValue`.

use std::fmt;

use serde_json::{Number, Value};

use crate::response::{NestedHit, SearchHit};

use super::errors::{RowSetError, RowSetResult};
use super::field::FieldExtractor;

/// The hit an extractor reads from
#[derive(Debug, Clone, Copy)]
pub enum HitSource<'a> {
    /// A top-level document
    Hit(&'a SearchHit),
    /// A nested record of the current document
    Nested(&'a NestedHit),
}

impl<'a> HitSource<'a> {
    /// Returns the `_source` body
    pub fn source(&self) -> &'a Value {
        match self {
            HitSource::Hit(hit) => &hit.source,
            HitSource::Nested(nested) => &nested.source,
        }
    }

    /// Returns the match score
    pub fn score(&self) -> Option<f32> {
        match self {
            HitSource::Hit(hit) => hit.score,
            HitSource::Nested(nested) => nested.score,
        }
    }
}

/// Computes one value from a hit.
///
/// Implementations must be pure: the same hit always yields the same value.
pub trait ExtractValue: fmt::Debug {
    fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value>;
}

/// Level an extractor operates at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorLevel<'a> {
    /// Reads the top-level document
    Hit,
    /// Reads a record of the named nested relation
    Nested(&'a str),
}

/// A column extractor tagged with the level it reads from
#[derive(Debug)]
pub enum HitExtractor {
    /// Reads the top-level document
    Hit(Box<dyn ExtractValue>),
    /// Reads a record of `relation`
    Nested {
        relation: String,
        extractor: Box<dyn ExtractValue>,
    },
}

impl HitExtractor {
    /// Creates a top-level extractor
    pub fn hit(extractor: impl ExtractValue + 'static) -> Self {
        HitExtractor::Hit(Box::new(extractor))
    }

    /// Creates a nested extractor for `relation`
    pub fn nested(relation: impl Into<String>, extractor: impl ExtractValue + 'static) -> Self {
        HitExtractor::Nested {
            relation: relation.into(),
            extractor: Box::new(extractor),
        }
    }

    /// Top-level `_source` field
    pub fn field(path: impl Into<String>) -> Self {
        Self::hit(FieldExtractor::new(path))
    }

    /// `_source` field of a nested record
    pub fn nested_field(relation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::nested(relation, FieldExtractor::new(path))
    }

    /// Returns the level this extractor reads from
    pub fn level(&self) -> ExtractorLevel<'_> {
        match self {
            HitExtractor::Hit(_) => ExtractorLevel::Hit,
            HitExtractor::Nested { relation, .. } => ExtractorLevel::Nested(relation),
        }
    }

    /// Returns the nested relation, if any
    pub fn relation(&self) -> Option<&str> {
        match self.level() {
            ExtractorLevel::Hit => None,
            ExtractorLevel::Nested(relation) => Some(relation),
        }
    }

    /// Returns true for nested extractors
    pub fn is_nested(&self) -> bool {
        matches!(self, HitExtractor::Nested { .. })
    }

    /// Delegates to the wrapped extractor
    pub fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value> {
        match self {
            HitExtractor::Hit(extractor) => extractor.extract(hit),
            HitExtractor::Nested { extractor, .. } => extractor.extract(hit),
        }
    }
}

/// Match score of the hit, `null` when not scored
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreExtractor;

impl ScoreExtractor {
    // Widen through the shortest decimal form so 0.1f32 stays 0.1.
    fn widen(score: f32) -> Option<f64> {
        score.to_string().parse::<f64>().ok()
    }
}

impl ExtractValue for ScoreExtractor {
    fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value> {
        Ok(hit
            .score()
            .and_then(Self::widen)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null))
    }
}

/// Document `_id`; top-level hits only
#[derive(Debug, Clone, Copy, Default)]
pub struct IdExtractor;

impl ExtractValue for IdExtractor {
    fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value> {
        match hit {
            HitSource::Hit(hit) => Ok(Value::String(hit.id.clone())),
            HitSource::Nested(_) => Err(RowSetError::extraction_failed(
                "_id is only available on top-level hits",
            )),
        }
    }
}

/// Offset of a nested record, `null` when the identity is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetExtractor;

impl ExtractValue for OffsetExtractor {
    fn extract(&self, hit: HitSource<'_>) -> RowSetResult<Value> {
        match hit {
            HitSource::Nested(nested) => Ok(nested.offset().map(Value::from).unwrap_or(Value::Null)),
            HitSource::Hit(_) => Err(RowSetError::extraction_failed(
                "nested offset is only available on nested hits",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rowset::RowSetErrorCode;
    use serde_json::json;

    #[test]
    fn test_levels() {
        let top = HitExtractor::field("name");
        let nested = HitExtractor::nested_field("address", "city");

        assert_eq!(top.level(), ExtractorLevel::Hit);
        assert_eq!(top.relation(), None);
        assert!(!top.is_nested());

        assert_eq!(nested.level(), ExtractorLevel::Nested("address"));
        assert_eq!(nested.relation(), Some("address"));
        assert!(nested.is_nested());
    }

    #[test]
    fn test_score_extractor() {
        let hit = SearchHit::new("1", json!({})).with_score(2.5);
        let value = ScoreExtractor.extract(HitSource::Hit(&hit)).unwrap();
        assert_eq!(value, json!(2.5));

        let unscored = SearchHit::new("2", json!({}));
        let value = ScoreExtractor.extract(HitSource::Hit(&unscored)).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_score_keeps_shortest_decimal() {
        let hit = SearchHit::new("1", json!({})).with_score(0.1);
        assert_eq!(ScoreExtractor.extract(HitSource::Hit(&hit)).unwrap(), json!(0.1));

        let nested = NestedHit::new("address", 0, json!({})).with_score(0.3);
        assert_eq!(
            ScoreExtractor.extract(HitSource::Nested(&nested)).unwrap(),
            json!(0.3)
        );
    }

    #[test]
    fn test_id_extractor_rejects_nested() {
        let hit = SearchHit::new("doc-1", json!({}));
        assert_eq!(IdExtractor.extract(HitSource::Hit(&hit)).unwrap(), json!("doc-1"));

        let nested = NestedHit::new("address", 0, json!({}));
        let err = IdExtractor.extract(HitSource::Nested(&nested)).unwrap_err();
        assert_eq!(err.code(), RowSetErrorCode::ExtractionFailed);
    }

    #[test]
    fn test_offset_extractor() {
        let nested = NestedHit::new("address", 3, json!({}));
        assert_eq!(
            OffsetExtractor.extract(HitSource::Nested(&nested)).unwrap(),
            json!(3)
        );

        let anonymous = NestedHit::without_identity(json!({}));
        assert_eq!(
            OffsetExtractor.extract(HitSource::Nested(&anonymous)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_hit_extractor_delegates() {
        let nested = NestedHit::new("address", 0, json!({"city": "Oslo"}));
        let extractor = HitExtractor::nested_field("address", "city");
        assert_eq!(
            extractor.extract(HitSource::Nested(&nested)).unwrap(),
            json!("Oslo")
        );
    }
}

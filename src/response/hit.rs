//! Search hit model
//!
//! A top-level hit carries its `_source` body plus any inner-hit sections
//! surfaced by nested queries. Sections are named `<relation>_<suffix>`
//! because several query fragments may match the same nested relation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position of a nested record inside its parent document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedIdentity {
    /// Nested path the record was taken from
    pub field: String,
    /// Stable offset relative to the parent `_source`
    pub offset: i32,
}

impl NestedIdentity {
    /// Creates a nested identity
    pub fn new(field: impl Into<String>, offset: i32) -> Self {
        Self {
            field: field.into(),
            offset,
        }
    }
}

/// A nested record matched under a top-level hit
#[derive(Debug, Clone, PartialEq)]
pub struct NestedHit {
    /// Nested identity, absent when the response did not carry one
    pub identity: Option<NestedIdentity>,
    /// Match score
    pub score: Option<f32>,
    /// Nested record body
    pub source: Value,
}

impl NestedHit {
    /// Creates a nested hit at the given offset of `field`
    pub fn new(field: impl Into<String>, offset: i32, source: Value) -> Self {
        Self {
            identity: Some(NestedIdentity::new(field, offset)),
            score: None,
            source,
        }
    }

    /// Creates a nested hit without identity
    pub fn without_identity(source: Value) -> Self {
        Self {
            identity: None,
            score: None,
            source,
        }
    }

    /// Sets the match score
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Returns the nested offset if the identity is known
    pub fn offset(&self) -> Option<i32> {
        self.identity.as_ref().map(|id| id.offset)
    }
}

/// One named inner-hit section of a top-level hit
#[derive(Debug, Clone, PartialEq)]
pub struct InnerHits {
    name: String,
    relation: Option<String>,
    hits: Vec<NestedHit>,
}

impl InnerHits {
    /// Creates a section, deriving its relation from the section name
    pub fn new(name: impl Into<String>, hits: Vec<NestedHit>) -> Self {
        let name = name.into();
        let relation = Self::relation_of(&name).map(str::to_string);
        Self {
            name,
            relation,
            hits,
        }
    }

    /// Relation addressed by a section name.
    ///
    /// `address_1` -> `address`, `user_address_2` -> `user_address`.
    /// A name without `_` addresses no relation.
    pub fn relation_of(name: &str) -> Option<&str> {
        name.rfind('_').map(|end| &name[..end])
    }

    /// Returns the section name as it appeared in the response
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the relation this section belongs to, if its name has one
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Returns the nested records of this section
    pub fn hits(&self) -> &[NestedHit] {
        &self.hits
    }
}

/// A top-level search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Document ID
    pub id: String,
    /// Match score
    pub score: Option<f32>,
    /// Document body
    pub source: Value,
    /// Inner-hit sections in response order
    pub inner_hits: Vec<InnerHits>,
}

impl SearchHit {
    /// Creates a hit without score or inner hits
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            score: None,
            source,
            inner_hits: Vec::new(),
        }
    }

    /// Sets the match score
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Appends an inner-hit section
    pub fn with_inner_hits(mut self, name: impl Into<String>, hits: Vec<NestedHit>) -> Self {
        self.inner_hits.push(InnerHits::new(name, hits));
        self
    }

    /// Returns the document ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Iterates over the sections addressing `relation` exactly
    pub fn sections_for<'a, 'r>(
        &'a self,
        relation: &'r str,
    ) -> impl Iterator<Item = &'a InnerHits> + 'r
    where
        'a: 'r,
    {
        self.inner_hits
            .iter()
            .filter(move |section| section.relation() == Some(relation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relation_of_section_name() {
        assert_eq!(InnerHits::relation_of("address_1"), Some("address"));
        assert_eq!(InnerHits::relation_of("user_address_12"), Some("user_address"));
        assert_eq!(InnerHits::relation_of("address"), None);
        assert_eq!(InnerHits::relation_of("_1"), Some(""));
    }

    #[test]
    fn test_sections_match_exact_relation() {
        let hit = SearchHit::new("1", json!({}))
            .with_inner_hits("address_1", vec![NestedHit::new("address", 0, json!({}))])
            .with_inner_hits("address_line_1", vec![NestedHit::new("address_line", 0, json!({}))])
            .with_inner_hits("address_2", vec![])
            .with_inner_hits("address", vec![NestedHit::new("address", 1, json!({}))]);

        let names: Vec<&str> = hit.sections_for("address").map(|s| s.name()).collect();
        assert_eq!(names, vec!["address_1", "address_2"]);
    }

    #[test]
    fn test_nested_offset() {
        assert_eq!(NestedHit::new("a", 7, json!({})).offset(), Some(7));
        assert_eq!(NestedHit::without_identity(json!({})).offset(), None);
    }
}

//! Search response page
//!
//! A page is the unit a row set operates on: the top-level hits of one
//! fetch, the resume handle for the next fetch and the total hit count
//! reported by the source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::{log_event_with_fields, metrics, Event};

use super::errors::{ResponseError, ResponseResult};
use super::hit::{InnerHits, NestedHit, NestedIdentity, SearchHit};

/// How the total hit count relates to the real number of matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalHitsRelation {
    /// Count is exact
    #[default]
    Eq,
    /// Count is a lower bound
    Gte,
}

/// Total hit count reported by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    #[serde(default)]
    pub relation: TotalHitsRelation,
}

impl TotalHits {
    /// Creates an exact total
    pub fn exact(value: u64) -> Self {
        Self {
            value,
            relation: TotalHitsRelation::Eq,
        }
    }

    /// Creates a lower-bound total
    pub fn at_least(value: u64) -> Self {
        Self {
            value,
            relation: TotalHitsRelation::Gte,
        }
    }

    /// Returns the count only when it is exact
    pub fn exact_value(&self) -> Option<u64> {
        match self.relation {
            TotalHitsRelation::Eq => Some(self.value),
            TotalHitsRelation::Gte => None,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    /// Top-level hits in result order
    pub hits: Vec<SearchHit>,
    /// Resume handle for the next page, absent on the last page
    pub scroll_id: Option<String>,
    /// Total matches, absent when the source did not count
    pub total_hits: Option<TotalHits>,
    /// Top-level hits delivered by earlier pages of the same scroll
    pub delivered_before: u64,
}

impl SearchPage {
    /// Creates a final page (no resume handle, unknown total)
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    /// Sets the resume handle
    pub fn with_scroll_id(mut self, scroll_id: impl Into<String>) -> Self {
        self.scroll_id = Some(scroll_id.into());
        self
    }

    /// Sets the total hit count
    pub fn with_total_hits(mut self, total: TotalHits) -> Self {
        self.total_hits = Some(total);
        self
    }

    /// Sets the number of hits delivered by earlier pages
    pub fn with_delivered_before(mut self, delivered: u64) -> Self {
        self.delivered_before = delivered;
        self
    }

    /// Returns the number of top-level hits in this page
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if the page has no top-level hits
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Top-level hits delivered so far, this page included
    pub fn delivered(&self) -> u64 {
        self.delivered_before + self.hits.len() as u64
    }

    /// Parses a page from a search response document.
    ///
    /// Inner-hit sections are kept in name order so that duplicate nested
    /// matches resolve the same way on every run.
    pub fn from_json(input: &str) -> ResponseResult<Self> {
        if input.trim().is_empty() {
            return Err(ResponseError::EmptyInput);
        }

        let raw: RawResponse = serde_json::from_str(input)?;
        let page = raw.into_page();

        let hits = page.hits.len().to_string();
        let has_scroll = page.scroll_id.is_some().to_string();
        log_event_with_fields(
            Event::PageParsed,
            &[("hits", hits.as_str()), ("has_scroll", has_scroll.as_str())],
        );
        metrics().increment_pages_parsed();

        Ok(page)
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "_scroll_id", default)]
    scroll_id: Option<String>,
    #[serde(default)]
    hits: RawHits,
}

#[derive(Debug, Default, Deserialize)]
struct RawHits {
    #[serde(default)]
    total: Option<RawTotal>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

// Older responses report the total as a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Count(u64),
    Object(TotalHits),
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f32>,
    #[serde(rename = "_source", default)]
    source: Value,
    #[serde(rename = "_nested", default)]
    nested: Option<NestedIdentity>,
    #[serde(default)]
    inner_hits: BTreeMap<String, RawInnerHits>,
}

#[derive(Debug, Deserialize)]
struct RawInnerHits {
    #[serde(default)]
    hits: RawHits,
}

impl RawResponse {
    fn into_page(self) -> SearchPage {
        let total_hits = self.hits.total.map(|total| match total {
            RawTotal::Count(value) => TotalHits::exact(value),
            RawTotal::Object(total) => total,
        });

        let hits = self.hits.hits.into_iter().map(RawHit::into_search_hit).collect();

        SearchPage {
            hits,
            scroll_id: self.scroll_id,
            total_hits,
            delivered_before: 0,
        }
    }
}

impl RawHit {
    fn into_search_hit(self) -> SearchHit {
        let inner_hits = self
            .inner_hits
            .into_iter()
            .map(|(name, section)| {
                let nested = section
                    .hits
                    .hits
                    .into_iter()
                    .map(RawHit::into_nested_hit)
                    .collect();
                InnerHits::new(name, nested)
            })
            .collect();

        SearchHit {
            id: self.id,
            score: self.score,
            source: self.source,
            inner_hits,
        }
    }

    fn into_nested_hit(self) -> NestedHit {
        NestedHit {
            identity: self.nested,
            score: self.score,
            source: self.source,
        }
    }
}

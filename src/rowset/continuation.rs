//! Continuation of a paged row set
//!
//! After a page is flattened the caller needs to know whether another fetch
//! is worth making and with which remaining limit. The decision is made once,
//! when the row set is built, from the page sizes, the requested limit and
//! the exhaustion signal of the source.
//!
//! Token rules, first match wins:
//! 1. no resume handle              -> no token
//! 2. empty page (size 0)           -> no token
//! 3. bounded limit fully consumed  -> no token
//! 4. exact total == delivered hits -> no token
//! 5. otherwise token(handle, limit < 0 ? limit : limit - size)
//!
//! "limit reached" and "source exhausted" are reported separately so that a
//! caller can tell truncation apart from the end of the data.

use std::fmt;

use serde::Serialize;

use crate::response::{SearchPage, TotalHits};

/// Limit value meaning "no limit"; any negative limit is unbounded
pub const UNBOUNDED_LIMIT: i64 = -1;

/// What the source reported about data beyond the current page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollSignal {
    /// Resume handle, absent when the source has nothing more
    pub scroll_id: Option<String>,
    /// Total matches known to the source
    pub total_hits: Option<TotalHits>,
    /// Top-level hits delivered so far, current page included
    pub delivered: u64,
}

impl ScrollSignal {
    /// Reads the signal carried by a page
    pub fn from_page(page: &SearchPage) -> Self {
        Self {
            scroll_id: page.scroll_id.clone(),
            total_hits: page.total_hits,
            delivered: page.delivered(),
        }
    }

    /// Returns true if the source has no data beyond what was delivered
    pub fn is_exhausted(&self) -> bool {
        if self.scroll_id.is_none() {
            return true;
        }
        self.total_hits
            .and_then(|total| total.exact_value())
            .is_some_and(|total| total == self.delivered)
    }
}

/// Resume handle plus the limit the next page must be built with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinuationToken {
    pub scroll_id: String,
    /// Negative means unbounded
    pub remaining_limit: i64,
}

/// Why no token was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WithheldReason {
    /// Source returned no resume handle
    NoScroll,
    /// Page produced no rows
    EmptyPage,
    /// Caller limit fully consumed
    LimitReached,
    /// Source total already delivered
    SourceExhausted,
}

impl WithheldReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithheldReason::NoScroll => "no_scroll",
            WithheldReason::EmptyPage => "empty_page",
            WithheldReason::LimitReached => "limit_reached",
            WithheldReason::SourceExhausted => "source_exhausted",
        }
    }
}

impl fmt::Display for WithheldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the continuation decision for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Continuation {
    token: Option<ContinuationToken>,
    withheld: Option<WithheldReason>,
    limit_reached: bool,
    source_exhausted: bool,
    truncated: bool,
}

impl Continuation {
    /// Returns the token for the next fetch, if any
    pub fn token(&self) -> Option<&ContinuationToken> {
        self.token.as_ref()
    }

    /// Consumes the outcome and returns the token
    pub fn into_token(self) -> Option<ContinuationToken> {
        self.token
    }

    /// Returns why no token was produced
    pub fn withheld(&self) -> Option<WithheldReason> {
        self.withheld
    }

    /// True if a bounded limit was consumed by this page
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// True if the source has no data beyond what was delivered
    pub fn source_exhausted(&self) -> bool {
        self.source_exhausted
    }

    /// True if the page held more rows than the limit let through
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Decides whether a page is followed by another fetch
pub struct ContinuationCalculator;

impl ContinuationCalculator {
    /// Computes the continuation for a page.
    ///
    /// `raw_size` is the row count before the limit, `size` after it.
    pub fn compute(
        raw_size: usize,
        size: usize,
        limit: i64,
        signal: &ScrollSignal,
    ) -> Continuation {
        let bounded = limit >= 0;
        let size_i64 = size as i64;
        let limit_reached = bounded && limit - size_i64 == 0;
        let source_exhausted = signal.is_exhausted();

        let withheld = if signal.scroll_id.is_none() {
            Some(WithheldReason::NoScroll)
        } else if size == 0 {
            Some(WithheldReason::EmptyPage)
        } else if limit_reached {
            Some(WithheldReason::LimitReached)
        } else if source_exhausted {
            Some(WithheldReason::SourceExhausted)
        } else {
            None
        };

        let token = match (withheld, &signal.scroll_id) {
            (None, Some(scroll_id)) => Some(ContinuationToken {
                scroll_id: scroll_id.clone(),
                remaining_limit: if bounded { limit - size_i64 } else { limit },
            }),
            _ => None,
        };

        Continuation {
            token,
            withheld,
            limit_reached,
            source_exhausted,
            truncated: raw_size > size,
        }
    }
}

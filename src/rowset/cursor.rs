//! Row set over one page of search hits
//!
//! Hits may carry nested matches, so iteration works like an aggregation
//! walk: the nested records of every hit are discovered up front, then the
//! deepest level is incremented first and overflow carries into the top
//! level. A hit with no matching nested records contributes no rows when a
//! nested column is requested.
//!
//! Only one nested relation can be flattened per row set.

use serde_json::Value;

use crate::observability::{log_event_with_fields, metrics, Event};
use crate::response::{NestedHit, SearchHit, SearchPage};

use super::continuation::{Continuation, ContinuationCalculator, ContinuationToken, ScrollSignal};
use super::errors::{RowSetError, RowSetResult};
use super::extractor::{ExtractorLevel, HitExtractor, HitSource};
use super::odometer::Odometer;
use super::resolver::NestedHitResolver;

/// Flattens the hits of a page into rows
#[derive(Debug)]
pub struct SearchHitRowSet<'a> {
    hits: &'a [SearchHit],
    extractors: Vec<HitExtractor>,
    /// Extractor positions of the visible columns
    visible: Vec<usize>,
    relation: Option<String>,
    /// Nested records per hit position; empty without a nested relation
    flat_inner_hits: Vec<Vec<&'a NestedHit>>,
    raw_size: usize,
    size: usize,
    odometer: Odometer,
    row: usize,
    continuation: Continuation,
}

impl<'a> SearchHitRowSet<'a> {
    /// Builds a row set with every extractor visible
    pub fn new(page: &'a SearchPage, extractors: Vec<HitExtractor>, limit: i64) -> RowSetResult<Self> {
        let mask = vec![true; extractors.len()];
        Self::from_parts(&page.hits, extractors, &mask, limit, ScrollSignal::from_page(page))
    }

    /// Builds a row set whose visible columns are selected by `mask`.
    ///
    /// Hidden extractors still take part in nested relation discovery.
    pub fn with_mask(
        page: &'a SearchPage,
        extractors: Vec<HitExtractor>,
        mask: &[bool],
        limit: i64,
    ) -> RowSetResult<Self> {
        Self::from_parts(&page.hits, extractors, mask, limit, ScrollSignal::from_page(page))
    }

    /// Builds a row set from its parts.
    ///
    /// A negative `limit` is unbounded.
    pub fn from_parts(
        hits: &'a [SearchHit],
        extractors: Vec<HitExtractor>,
        mask: &[bool],
        limit: i64,
        signal: ScrollSignal,
    ) -> RowSetResult<Self> {
        let relation = Self::check_extractors(&extractors, mask).map_err(Self::rejected)?;

        let (levels, flat_inner_hits, raw_size) = match &relation {
            Some(relation) => {
                let flat: Vec<Vec<&'a NestedHit>> = hits
                    .iter()
                    .map(|hit| NestedHitResolver::resolve(hit, relation))
                    .collect();
                let raw_size: usize = flat.iter().map(Vec::len).sum();
                (2, flat, raw_size)
            }
            None => (1, Vec::new(), hits.len()),
        };

        let size = if limit < 0 {
            raw_size
        } else {
            raw_size.min(usize::try_from(limit).unwrap_or(usize::MAX))
        };

        let visible = mask
            .iter()
            .enumerate()
            .filter_map(|(position, &shown)| shown.then_some(position))
            .collect();

        let continuation = ContinuationCalculator::compute(raw_size, size, limit, &signal);

        let mut row_set = Self {
            hits,
            extractors,
            visible,
            relation,
            flat_inner_hits,
            raw_size,
            size,
            odometer: Odometer::new(levels),
            row: 0,
            continuation,
        };
        row_set.reset();
        row_set.log_open(limit);

        Ok(row_set)
    }

    /// Checks extractors and mask without building a row set.
    ///
    /// Returns the nested relation the extractors would flatten.
    pub fn check_extractors(
        extractors: &[HitExtractor],
        mask: &[bool],
    ) -> RowSetResult<Option<String>> {
        if mask.len() != extractors.len() {
            return Err(RowSetError::invalid_mask(mask.len(), extractors.len()));
        }
        Self::single_relation(extractors)
    }

    // Distinct nested relations, in first-seen order; at most one allowed.
    fn single_relation(extractors: &[HitExtractor]) -> RowSetResult<Option<String>> {
        let mut relations: Vec<&str> = Vec::new();
        for extractor in extractors {
            if let ExtractorLevel::Nested(relation) = extractor.level() {
                if !relations.contains(&relation) {
                    relations.push(relation);
                }
            }
        }

        if relations.len() > 1 {
            return Err(RowSetError::multi_nested(&relations));
        }
        Ok(relations.first().map(|relation| relation.to_string()))
    }

    fn rejected(err: RowSetError) -> RowSetError {
        log_event_with_fields(
            Event::RowSetRejected,
            &[("code", err.code().code()), ("message", err.message())],
        );
        metrics().increment_rowsets_rejected();
        err
    }

    fn log_open(&self, limit: i64) {
        let hits = self.hits.len().to_string();
        let raw_size = self.raw_size.to_string();
        let size = self.size.to_string();
        let levels = self.odometer.levels().to_string();
        let limit = limit.to_string();
        log_event_with_fields(
            Event::RowSetOpen,
            &[
                ("hits", hits.as_str()),
                ("raw_size", raw_size.as_str()),
                ("size", size.as_str()),
                ("levels", levels.as_str()),
                ("relation", self.relation.as_deref().unwrap_or("-")),
                ("limit", limit.as_str()),
            ],
        );
        metrics().increment_rowsets_opened();

        match self.continuation.token() {
            Some(token) => {
                let remaining = token.remaining_limit.to_string();
                log_event_with_fields(
                    Event::ContinuationIssued,
                    &[("remaining_limit", remaining.as_str())],
                );
                metrics().increment_continuations_issued();
            }
            None => {
                let reason = self
                    .continuation
                    .withheld()
                    .map(|reason| reason.as_str())
                    .unwrap_or("-");
                log_event_with_fields(Event::ContinuationWithheld, &[("reason", reason)]);
            }
        }
    }

    // Number of positions at `level` under the parents selected in `indices`.
    fn level_width(
        hits: usize,
        flat_inner_hits: &[Vec<&NestedHit>],
        level: usize,
        indices: &[usize],
    ) -> usize {
        match level {
            0 => hits,
            _ => flat_inner_hits.get(indices[0]).map_or(0, Vec::len),
        }
    }

    /// Returns true while a row is selected
    pub fn has_current(&self) -> bool {
        self.row < self.size
    }

    /// Moves to the next row.
    ///
    /// Returns false, leaving the position unchanged, on the last row.
    pub fn advance(&mut self) -> bool {
        if self.row + 1 >= self.size {
            return false;
        }
        self.row += 1;

        let hits = self.hits.len();
        let flat = &self.flat_inner_hits;
        self.odometer
            .advance(|level, indices| Self::level_width(hits, flat, level, indices))
    }

    /// Returns to the first row
    pub fn reset(&mut self) {
        self.row = 0;
        self.odometer.reset();

        let hits = self.hits.len();
        let flat = &self.flat_inner_hits;
        self.odometer
            .settle(|level, indices| Self::level_width(hits, flat, level, indices));
    }

    /// Rows in this page after the limit
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rows in this page before the limit
    pub fn raw_size(&self) -> usize {
        self.raw_size
    }

    /// Number of rows already stepped over
    pub fn row(&self) -> usize {
        self.row
    }

    /// 1 for top-level rows, 2 when a nested relation is flattened
    pub fn levels(&self) -> usize {
        self.odometer.levels()
    }

    /// The flattened nested relation, if any
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Current per-level path, top level first
    pub fn indices(&self) -> &[usize] {
        self.odometer.indices()
    }

    /// The hit of the current row
    pub fn current_hit(&self) -> Option<&'a SearchHit> {
        if !self.has_current() {
            return None;
        }
        self.hits.get(self.odometer.index(0))
    }

    /// The nested record of the current row, if a relation is flattened
    pub fn current_nested(&self) -> Option<&'a NestedHit> {
        if !self.has_current() || self.relation.is_none() {
            return None;
        }
        self.flat_inner_hits
            .get(self.odometer.index(0))
            .and_then(|nested| nested.get(self.odometer.index(1)))
            .copied()
    }

    /// Extracts a value of the current row.
    ///
    /// Extractor failures are returned unchanged and the position stays put.
    pub fn current_value(&self, extractor: &HitExtractor) -> RowSetResult<Value> {
        let hit = self.current_hit().ok_or_else(RowSetError::no_current_row)?;

        match extractor.level() {
            ExtractorLevel::Hit => extractor.extract(HitSource::Hit(hit)),
            ExtractorLevel::Nested(relation) => {
                if self.relation.as_deref() != Some(relation) {
                    return Err(RowSetError::unknown_relation(
                        relation,
                        self.relation.as_deref(),
                    ));
                }
                let nested = self
                    .current_nested()
                    .ok_or_else(RowSetError::no_current_row)?;
                extractor.extract(HitSource::Nested(nested))
            }
        }
    }

    /// Number of visible columns
    pub fn column_count(&self) -> usize {
        self.visible.len()
    }

    /// Extractor backing a visible column
    pub fn column_extractor(&self, column: usize) -> Option<&HitExtractor> {
        self.visible
            .get(column)
            .map(|position| &self.extractors[*position])
    }

    /// Value of a visible column in the current row
    pub fn column(&self, column: usize) -> RowSetResult<Value> {
        let extractor = self
            .column_extractor(column)
            .ok_or_else(|| RowSetError::column_out_of_range(column, self.visible.len()))?;
        self.current_value(extractor)
    }

    /// All visible column values of the current row
    pub fn row_values(&self) -> RowSetResult<Vec<Value>> {
        (0..self.column_count())
            .map(|column| self.column(column))
            .collect()
    }

    /// Resets, then calls `visit` on every row until it fails.
    ///
    /// Returns the number of rows visited.
    pub fn for_each_row<F>(&mut self, mut visit: F) -> RowSetResult<usize>
    where
        F: FnMut(&Self) -> RowSetResult<()>,
    {
        self.reset();

        let mut visited = 0;
        while self.has_current() {
            visit(self)?;
            visited += 1;
            if !self.advance() {
                break;
            }
        }

        metrics().add_rows_emitted(visited as u64);
        let rows = visited.to_string();
        log_event_with_fields(Event::RowSetExhausted, &[("rows", rows.as_str())]);

        Ok(visited)
    }

    /// Continuation decision made for this page
    pub fn continuation(&self) -> &Continuation {
        &self.continuation
    }

    /// Resume handle and remaining limit for the next page, if any
    pub fn next_scroll_data(&self) -> Option<&ContinuationToken> {
        self.continuation.token()
    }
}

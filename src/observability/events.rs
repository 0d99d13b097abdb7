//! Observable events for hitrows
//!
//! Events are explicit and typed. Every log line emitted by the crate names
//! one of these.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A search response page was parsed
    PageParsed,
    /// A row set was built over a page
    RowSetOpen,
    /// A row set was refused at construction
    RowSetRejected,
    /// A row set was fully iterated
    RowSetExhausted,
    /// A continuation token was produced for the next page
    ContinuationIssued,
    /// No continuation token was produced
    ContinuationWithheld,
    /// CLI configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the event name as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::PageParsed => "PAGE_PARSED",
            Event::RowSetOpen => "ROWSET_OPEN",
            Event::RowSetRejected => "ROWSET_REJECTED",
            Event::RowSetExhausted => "ROWSET_EXHAUSTED",
            Event::ContinuationIssued => "CONTINUATION_ISSUED",
            Event::ContinuationWithheld => "CONTINUATION_WITHHELD",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Returns true if the event reports a refused operation
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RowSetRejected)
    }

    /// Returns true for high-frequency events logged at TRACE
    pub fn is_verbose(&self) -> bool {
        matches!(self, Event::RowSetExhausted)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::RowSetOpen.as_str(), "ROWSET_OPEN");
        assert_eq!(Event::ContinuationIssued.to_string(), "CONTINUATION_ISSUED");
    }

    #[test]
    fn test_only_rejection_is_failure() {
        assert!(Event::RowSetRejected.is_failure());
        assert!(!Event::RowSetOpen.is_failure());
        assert!(!Event::ContinuationWithheld.is_failure());
    }
}

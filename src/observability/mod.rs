//! Observability for hitrows
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Process-wide counters
//!
//! Observability is read-only: nothing here changes how a row set iterates.
//!
//! # Usage
//!
//! ```ignore
//! use hitrows::observability::{log_event_with_fields, metrics, Event};
//!
//! log_event_with_fields(Event::RowSetOpen, &[("size", "42")]);
//! metrics().increment_rowsets_opened();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{metrics, MetricsRegistry, MetricsSnapshot};

fn event_severity(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Error
    } else if event.is_verbose() {
        Severity::Trace
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(event_severity(Event::RowSetRejected), Severity::Error);
        assert_eq!(event_severity(Event::RowSetExhausted), Severity::Trace);
        assert_eq!(event_severity(Event::RowSetOpen), Severity::Info);
    }

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event_with_fields(Event::ConfigLoaded, &[]);
        log_event_with_fields(Event::PageParsed, &[("hits", "3")]);
    }
}

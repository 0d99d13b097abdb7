//! Counters for hitrows
//!
//! - Counters only
//! - Monotonic increase
//! - Relaxed atomics; counters never influence row-set behavior

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of operational counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Pages parsed from response documents
    pages_parsed: AtomicU64,
    /// Row sets successfully built
    rowsets_opened: AtomicU64,
    /// Row sets refused at construction
    rowsets_rejected: AtomicU64,
    /// Rows handed out by row-set iteration
    rows_emitted: AtomicU64,
    /// Continuation tokens produced
    continuations_issued: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub const fn new() -> Self {
        Self {
            pages_parsed: AtomicU64::new(0),
            rowsets_opened: AtomicU64::new(0),
            rowsets_rejected: AtomicU64::new(0),
            rows_emitted: AtomicU64::new(0),
            continuations_issued: AtomicU64::new(0),
        }
    }

    pub fn increment_pages_parsed(&self) {
        self.pages_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rowsets_opened(&self) {
        self.rowsets_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rowsets_rejected(&self) {
        self.rowsets_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Add rows handed out by one iteration pass
    pub fn add_rows_emitted(&self, rows: u64) {
        self.rows_emitted.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_continuations_issued(&self) {
        self.continuations_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_parsed: self.pages_parsed.load(Ordering::Relaxed),
            rowsets_opened: self.rowsets_opened.load(Ordering::Relaxed),
            rowsets_rejected: self.rowsets_rejected.load(Ordering::Relaxed),
            rows_emitted: self.rows_emitted.load(Ordering::Relaxed),
            continuations_issued: self.continuations_issued.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub pages_parsed: u64,
    pub rowsets_opened: u64,
    pub rowsets_rejected: u64,
    pub rows_emitted: u64,
    pub continuations_issued: u64,
}

static GLOBAL: MetricsRegistry = MetricsRegistry::new();

/// Process-wide registry
pub fn metrics() -> &'static MetricsRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_increase() {
        let registry = MetricsRegistry::new();
        registry.increment_rowsets_opened();
        registry.increment_rowsets_opened();
        registry.add_rows_emitted(7);
        registry.increment_continuations_issued();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.rowsets_opened, 2);
        assert_eq!(snapshot.rows_emitted, 7);
        assert_eq!(snapshot.continuations_issued, 1);
        assert_eq!(snapshot.rowsets_rejected, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_pages_parsed();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["pages_parsed"], 1);
    }
}

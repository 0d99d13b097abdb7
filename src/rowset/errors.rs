//! Row-set error types
//!
//! Error codes:
//! - HITROWS_MULTI_NESTED_UNSUPPORTED (FATAL)
//! - HITROWS_INVALID_MASK (FATAL)
//! - HITROWS_NO_CURRENT_ROW (ERROR)
//! - HITROWS_UNKNOWN_RELATION (ERROR)
//! - HITROWS_COLUMN_OUT_OF_RANGE (ERROR)
//! - HITROWS_EXTRACTION_FAILED (ERROR)

use std::fmt;

/// Severity levels for row-set errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current call failed, the row set is still usable
    Error,
    /// The row set cannot be built with this configuration
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Row-set error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSetErrorCode {
    /// Extractors reference more than one nested relation
    MultiNestedUnsupported,
    /// Column mask does not cover the extractor list
    InvalidMask,
    /// Value requested while no row is current
    NoCurrentRow,
    /// Nested extractor for a relation the row set did not flatten
    UnknownRelation,
    /// Column index past the visible columns
    ColumnOutOfRange,
    /// Extractor could not produce a value
    ExtractionFailed,
}

impl RowSetErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RowSetErrorCode::MultiNestedUnsupported => "HITROWS_MULTI_NESTED_UNSUPPORTED",
            RowSetErrorCode::InvalidMask => "HITROWS_INVALID_MASK",
            RowSetErrorCode::NoCurrentRow => "HITROWS_NO_CURRENT_ROW",
            RowSetErrorCode::UnknownRelation => "HITROWS_UNKNOWN_RELATION",
            RowSetErrorCode::ColumnOutOfRange => "HITROWS_COLUMN_OUT_OF_RANGE",
            RowSetErrorCode::ExtractionFailed => "HITROWS_EXTRACTION_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            RowSetErrorCode::MultiNestedUnsupported | RowSetErrorCode::InvalidMask => {
                Severity::Fatal
            }
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for RowSetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Row-set error with full context
#[derive(Debug, Clone, PartialEq)]
pub struct RowSetError {
    code: RowSetErrorCode,
    message: String,
}

impl RowSetError {
    /// Create a multi-nested configuration error naming the relations
    pub fn multi_nested(relations: &[&str]) -> Self {
        Self {
            code: RowSetErrorCode::MultiNestedUnsupported,
            message: format!(
                "multiple simultaneous nested relations are not supported: [{}]",
                relations.join(", ")
            ),
        }
    }

    /// Create a mask length mismatch error
    pub fn invalid_mask(mask_len: usize, extractors: usize) -> Self {
        Self {
            code: RowSetErrorCode::InvalidMask,
            message: format!(
                "column mask covers {} extractors but {} were supplied",
                mask_len, extractors
            ),
        }
    }

    /// Create a no-current-row error
    pub fn no_current_row() -> Self {
        Self {
            code: RowSetErrorCode::NoCurrentRow,
            message: "no current row".to_string(),
        }
    }

    /// Create an unknown relation error
    pub fn unknown_relation(requested: &str, flattened: Option<&str>) -> Self {
        let message = match flattened {
            Some(relation) => format!(
                "relation '{}' is not flattened by this row set (flattening '{}')",
                requested, relation
            ),
            None => format!(
                "relation '{}' is not flattened by this row set (top level only)",
                requested
            ),
        };
        Self {
            code: RowSetErrorCode::UnknownRelation,
            message,
        }
    }

    /// Create a column out of range error
    pub fn column_out_of_range(column: usize, columns: usize) -> Self {
        Self {
            code: RowSetErrorCode::ColumnOutOfRange,
            message: format!("column {} out of range ({} columns)", column, columns),
        }
    }

    /// Create an extraction failure
    pub fn extraction_failed(reason: impl Into<String>) -> Self {
        Self {
            code: RowSetErrorCode::ExtractionFailed,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RowSetErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this error prevents the row set from being built
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for RowSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for RowSetError {}

/// Result type for row-set operations
pub type RowSetResult<T> = Result<T, RowSetError>;

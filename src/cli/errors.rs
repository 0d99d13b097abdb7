//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::response::ResponseError;
use crate::rowset::RowSetError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Search response could not be read
    InputError,
    /// Row set could not be built or iterated
    RowSetError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HITROWS_CLI_CONFIG_ERROR",
            Self::IoError => "HITROWS_CLI_IO_ERROR",
            Self::InputError => "HITROWS_CLI_INPUT_ERROR",
            Self::RowSetError => "HITROWS_CLI_ROWSET_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ResponseError> for CliError {
    fn from(e: ResponseError) -> Self {
        Self::new(CliErrorCode::InputError, format!("{}: {}", e.code(), e))
    }
}

impl From<RowSetError> for CliError {
    fn from(e: RowSetError) -> Self {
        Self::new(
            CliErrorCode::RowSetError,
            format!("{}: {}", e.code(), e.message()),
        )
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rowset_error_keeps_inner_code() {
        let err = CliError::from(RowSetError::multi_nested(&["a", "b"]));
        assert_eq!(err.code(), &CliErrorCode::RowSetError);
        assert!(err.message().starts_with("HITROWS_MULTI_NESTED_UNSUPPORTED"));
    }

    #[test]
    fn test_response_error_is_input_error() {
        let err = CliError::from(ResponseError::EmptyInput);
        assert_eq!(err.code_str(), "HITROWS_CLI_INPUT_ERROR");
        assert!(err.message().contains("HITROWS_RESPONSE_EMPTY"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad");
        assert_eq!(err.to_string(), "HITROWS_CLI_CONFIG_ERROR: bad");
    }
}

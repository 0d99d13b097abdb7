//! Errors raised while reading a search response page

use thiserror::Error;

/// Result type for response parsing
pub type ResponseResult<T> = Result<T, ResponseError>;

/// Response parsing errors
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Input was empty or whitespace only
    #[error("Empty search response")]
    EmptyInput,

    /// Input was not a valid search response document
    #[error("Invalid search response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ResponseError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ResponseError::EmptyInput => "HITROWS_RESPONSE_EMPTY",
            ResponseError::InvalidJson(_) => "HITROWS_RESPONSE_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ResponseError::EmptyInput.code(), "HITROWS_RESPONSE_EMPTY");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ResponseError::from(json_err);
        assert_eq!(err.code(), "HITROWS_RESPONSE_INVALID");
        assert!(err.to_string().starts_with("Invalid search response"));
    }
}

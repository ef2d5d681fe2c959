//! Error types for ramp-api.

use thiserror::Error;

/// API client error types.
///
/// `Rejected` carries the service's own message (non-"success" status field);
/// everything else is transport or decoding trouble.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether retrying the same request later could succeed.
    ///
    /// Transport errors are transient; an explicit rejection is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Http(_) | ApiError::Decode(_))
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

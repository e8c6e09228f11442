//! Error taxonomy for dispatched operations.
//!
//! Validation errors never reach the network. Network, timeout, cancellation
//! and parse failures all surface to users as the same generic message; API
//! errors surface the server's message verbatim.

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::FormErrors;

/// User-facing text for every failure that is not a structured API error.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again";

/// Errors that can occur while dispatching an operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// The request could not complete (connectivity, DNS, TLS...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not JSON or lacked the expected shape.
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// The caller cancelled the request before it settled.
    #[error("Request cancelled")]
    Cancelled,

    /// Persisting the session failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// Message suitable for an alert or inline banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Storage(err) => err.to_string(),
            ApiError::Network(_)
            | ApiError::Parse(_)
            | ApiError::Timeout { .. }
            | ApiError::Cancelled => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// Error type string for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Network(_) => "network_error",
            ApiError::Api { .. } => "api_error",
            ApiError::Parse(_) => "parse_error",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Cancelled => "cancelled",
            ApiError::Storage(_) => "storage_error",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

//! Error types for the release bot.
//!
//! `ApiError` carries typed platform failures, `Error` wraps them together
//! with transport, decoding and local validation failures.

use thiserror::Error;

/// Main error type for the release bot.
#[derive(Error, Debug)]
pub enum Error {
    /// Platform API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP transport error (connection refused, timeout, unreadable body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blob content could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested file does not exist at the given ref
    #[error("File not found: {path} at {reference}")]
    FileNotFound { path: String, reference: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the platform reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound { .. }) | Self::FileNotFound { .. })
    }

    /// Whether the platform rejected the write as conflicting.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api(ApiError::Conflict { .. }))
    }

    /// Whether the caller may reasonably retry the operation.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(e) => e.is_transient(),
            Self::Http(_) => true,
            _ => false,
        }
    }
}

/// Typed errors returned by the hosting platform.
///
/// Each variant corresponds to an HTTP status class.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Bad or missing credentials (401).
    #[error("authentication failed: {message}")]
    Authentication {
        message: String,
        request_id: Option<String>,
    },

    /// Token lacks permission (403).
    #[error("access denied: {message}")]
    Authorization {
        message: String,
        request_id: Option<String>,
    },

    /// Resource does not exist (404).
    #[error("not found: {message}")]
    NotFound {
        message: String,
        request_id: Option<String>,
    },

    /// Stale sha or duplicate resource (409, or 422 `already_exists`).
    #[error("conflict: {message}")]
    Conflict {
        message: String,
        request_id: Option<String>,
    },

    /// Request was understood but rejected (422).
    #[error("unprocessable: {message}")]
    Unprocessable {
        message: String,
        request_id: Option<String>,
    },

    /// Rate limit exhausted (429, or 403 with no remaining quota).
    #[error("rate limited: {message} (retry after {retry_after}s)")]
    RateLimited {
        message: String,
        retry_after: u64,
        request_id: Option<String>,
    },

    /// Platform failure (5xx).
    #[error("server error: {message}")]
    Server {
        message: String,
        request_id: Option<String>,
    },

    /// Any other unexpected status.
    #[error("unexpected status {status}: {message}")]
    Other {
        status: u16,
        message: String,
        request_id: Option<String>,
    },
}

impl ApiError {
    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Unprocessable { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Server { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    /// Get the platform request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Authentication { request_id, .. }
            | Self::Authorization { request_id, .. }
            | Self::NotFound { request_id, .. }
            | Self::Conflict { request_id, .. }
            | Self::Unprocessable { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::Server { request_id, .. }
            | Self::Other { request_id, .. } => request_id.as_deref(),
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error is transient. Nothing in this crate retries;
    /// the flag is for callers that own a retry policy.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }
}

//! Error types for the Lettr API client.

use crate::types::{RateLimit, SendingQuota};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Lettr operations.
pub type LettrResult<T> = Result<T, LettrError>;

/// Main error type for the Lettr API client.
///
/// `InvalidValue` and `Configuration` are raised before any request is made;
/// everything else maps an HTTP outcome. Callers are expected to branch on
/// the variant, e.g. back off on `RateLimit` using `retry_after` or stop
/// sending on `QuotaExceeded`.
#[derive(Error, Debug, Clone)]
pub enum LettrError {
    /// Configuration error (invalid settings, missing required fields)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// A value object or builder received input violating its contract.
    /// Never reaches the network.
    #[error("Invalid value: {message}")]
    InvalidValue {
        /// Human-readable description of the violated rule
        message: String,
    },

    /// Network or serialization failure: no HTTP response was obtained, or
    /// the response body could not be decoded.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message describing the transport issue
        message: String,
    },

    /// Authentication failed (401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// Resource not found (404).
    #[error("Not found: {message}")]
    NotFound {
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// Conflict, e.g. the resource already exists (409).
    #[error("Conflict: {message}")]
    Conflict {
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// The API rejected the request payload (422).
    #[error("Validation failed: {message}")]
    Validation {
        /// Server-provided message
        message: String,
        /// Per-field error messages from the body's `errors` key
        errors: HashMap<String, Vec<String>>,
    },

    /// Request throttled (429 without a quota error code).
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Server-provided message, or a generic fallback
        message: String,
        /// Rate limit state parsed from response headers, if present
        rate_limit: Option<RateLimit>,
        /// Seconds to wait, from the `Retry-After` header (absent means unknown)
        retry_after: Option<u64>,
    },

    /// Sending quota exhausted (429 with `quota_exceeded` or
    /// `daily_quota_exceeded` in the body).
    #[error("Sending quota exceeded: {message}")]
    QuotaExceeded {
        /// Server-provided message, or a generic fallback
        message: String,
        /// Quota state parsed from response headers, if present
        quota: Option<SendingQuota>,
    },

    /// Any other non-2xx HTTP response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or a generic fallback
        message: String,
    },
}

impl LettrError {
    /// Shorthand constructor for invalid-value failures.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        LettrError::InvalidValue {
            message: message.into(),
        }
    }

    /// Shorthand constructor for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        LettrError::Transport {
            message: message.into(),
        }
    }

    /// The HTTP status code this error maps, if it came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            LettrError::Unauthorized { .. } => Some(401),
            LettrError::NotFound { .. } => Some(404),
            LettrError::Conflict { .. } => Some(409),
            LettrError::Validation { .. } => Some(422),
            LettrError::RateLimit { .. } | LettrError::QuotaExceeded { .. } => Some(429),
            LettrError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Seconds to wait before retrying, when the API provided a
    /// `Retry-After` header on a rate-limited response.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            LettrError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Validation messages for a specific field (422 responses).
    pub fn errors_for(&self, field: &str) -> &[String] {
        match self {
            LettrError::Validation { errors, .. } => {
                errors.get(field).map(Vec::as_slice).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Whether a 422 response reported errors for the given field.
    pub fn has_error_for(&self, field: &str) -> bool {
        !self.errors_for(field).is_empty()
    }

    /// Returns true if the failure is transient and worth retrying with
    /// backoff: throttling, network failures, and 5xx responses. The client
    /// itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LettrError::RateLimit { .. }
                | LettrError::Transport { .. }
                | LettrError::Api {
                    status: 500..=599,
                    ..
                }
        )
    }
}

impl From<reqwest::Error> for LettrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LettrError::Transport {
                message: format!("Request timed out: {err}"),
            }
        } else if err.is_connect() {
            LettrError::Transport {
                message: format!("Connection failed: {err}"),
            }
        } else {
            LettrError::Transport {
                message: format!("Network error: {err}"),
            }
        }
    }
}

impl From<serde_json::Error> for LettrError {
    fn from(err: serde_json::Error) -> Self {
        LettrError::Transport {
            message: format!("Failed to decode API response: {err}"),
        }
    }
}

impl From<url::ParseError> for LettrError {
    fn from(err: url::ParseError) -> Self {
        LettrError::Configuration {
            message: format!("Invalid URL: {err}"),
        }
    }
}

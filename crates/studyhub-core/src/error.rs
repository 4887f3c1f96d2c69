//! Error types for studyhub.

use thiserror::Error;

/// Result type alias using studyhub's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for studyhub operations.
///
/// Provider failures (`MissingCredential` through `Validation`) are absorbed
/// by the fallback layer and never reach the user. `InvalidInput` is the only
/// variant meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// Provider credential is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// HTTP/network request failed (includes timeouts)
    #[error("Request error: {0}")]
    Request(String),

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Provider signalled rate limiting
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider payload could not be parsed
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Generated content failed shape validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid user input (empty topic, missing form field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted state could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation not supported by the current configuration
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the provider asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    /// True for every failure that originates at a provider boundary.
    pub fn is_adapter_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential(_)
                | Error::Request(_)
                | Error::Status { .. }
                | Error::RateLimited(_)
                | Error::MalformedResponse(_)
                | Error::Validation(_)
        )
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingCredential(_) => "missing_credential",
            Error::Request(_) => "request",
            Error::Status { .. } => "status",
            Error::RateLimited(_) => "rate_limited",
            Error::MalformedResponse(_) => "malformed_response",
            Error::Validation(_) => "validation",
            Error::InvalidInput(_) => "invalid_input",
            Error::Serialization(_) => "serialization",
            Error::Config(_) => "config",
            Error::Storage(_) => "storage",
            Error::Unsupported(_) => "unsupported",
            Error::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Error::MalformedResponse(e.to_string());
        }
        if let Some(status) = e.status() {
            if status.as_u16() == 429 {
                return Error::RateLimited(e.to_string());
            }
            return Error::Status {
                status: status.as_u16(),
                message: e.to_string(),
            };
        }
        Error::Request(e.to_string())
    }
}

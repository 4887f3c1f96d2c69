//! OpenAI-specific error handling.

use studyhub_core::Error;

/// OpenAI-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Request too large.
    ContextLengthExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl OpenAIErrorCode {
    /// Determine error code from HTTP status and error type.
    pub fn from_response(status: u16, error_type: &str) -> Self {
        match (status, error_type) {
            (401, _) => Self::AuthenticationError,
            (429, _) => Self::RateLimitExceeded,
            (404, _) | (_, "model_not_found") => Self::ModelNotFound,
            (400, _) if error_type.contains("context_length") => Self::ContextLengthExceeded,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Check if the caller's retry policy should consider this error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded)
    }
}

/// Convert an OpenAI error to a studyhub Error.
///
/// Only `RateLimitExceeded` becomes [`Error::RateLimited`]; server errors stay
/// plain status failures and go straight to the fallback path.
pub fn to_studyhub_error(code: OpenAIErrorCode, status: u16, message: &str) -> Error {
    match code {
        OpenAIErrorCode::AuthenticationError => {
            Error::MissingCredential(format!("Authentication failed: {}", message))
        }
        OpenAIErrorCode::RateLimitExceeded => Error::RateLimited(message.to_string()),
        OpenAIErrorCode::ModelNotFound => Error::Config(format!("Model not found: {}", message)),
        OpenAIErrorCode::ContextLengthExceeded => Error::Status {
            status,
            message: format!("Context too long: {}", message),
        },
        OpenAIErrorCode::ServerError | OpenAIErrorCode::Unknown => Error::Status {
            status,
            message: message.to_string(),
        },
    }
}

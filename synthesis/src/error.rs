//! Error types for answer synthesis.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Errors that can occur while synthesizing an answer.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// API key not configured.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    /// API request failed.
    #[error("synthesis API request failed: {0}")]
    ApiRequest(String),

    /// Response did not contain usable text.
    #[error("invalid synthesis response: {0}")]
    InvalidResponse(String),

    /// The call exceeded the caller's deadline.
    #[error("synthesis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

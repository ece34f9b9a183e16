//! Crate-level error types.
//!
//! [`AlertError`] unifies every error source (configuration, HTTP, JSON,
//! terminal, audio) behind a single enum so callers can match on the variant
//! they care about while still using the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlertError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request to the price API failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization of an API response failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a payload we cannot use.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Terminal setup, drawing, or teardown failed.
    #[error("io error: {0}")]
    Io(String),

    /// The alert sound could not be opened, decoded, or played.
    #[error("sound error: {0}")]
    Sound(String),
}

impl AlertError {
    /// Returns `true` for failures that mean the price API is unreachable:
    /// refused or dropped connections, timeouts, and redirect loops.
    ///
    /// These end the polling loop. Everything else only skips an iteration.
    pub fn is_network(&self) -> bool {
        match self {
            AlertError::Http(e) => e.is_connect() || e.is_timeout() || e.is_redirect(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for AlertError {
    fn from(e: std::io::Error) -> Self {
        AlertError::Io(e.to_string())
    }
}

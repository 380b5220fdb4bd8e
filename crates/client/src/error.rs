//! Search client error types.

use std::sync::Arc;

use searchkit_core::ConfigError;

/// Errors from the search clients.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Missing credential or invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the upstream API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}{}", detail(.message))]
    HttpError { status: u16, message: Option<String> },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

/// Coarse classification of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A credential or setting was missing; no request was sent.
    Configuration,
    /// The caller's input was rejected before sending.
    InvalidInput,
    /// The request failed on the wire or the upstream returned a non-success status.
    Transport,
    /// The response did not have the expected shape.
    Parsing,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Configuration(_) => ErrorKind::Configuration,
            SearchError::InvalidQuery(_) => ErrorKind::InvalidInput,
            SearchError::AuthError
            | SearchError::RateLimited
            | SearchError::HttpError { .. }
            | SearchError::Timeout
            | SearchError::Network(_) => ErrorKind::Transport,
            SearchError::Parse(_) => ErrorKind::Parsing,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_decode() {
            SearchError::Parse(err.to_string())
        } else {
            SearchError::Network(Arc::new(err))
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Parse(err.to_string())
    }
}

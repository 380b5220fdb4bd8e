//! SerpAPI request parameters.

use serde::Serialize;

use crate::error::SearchError;

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SerpRequest {
    /// Search query.
    pub q: String,
    pub api_key: String,
    /// Search engine selector.
    pub engine: &'static str,
    /// Number of results requested from the engine.
    pub num: usize,
}

impl SerpRequest {
    /// Google web search request.
    pub fn google(q: impl Into<String>, api_key: impl Into<String>, num: usize) -> Self {
        Self { q: q.into(), api_key: api_key.into(), engine: "google", num }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.q.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".to_string()));
        }

        Ok(())
    }
}

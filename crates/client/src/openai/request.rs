//! Responses API request types and validation.

use serde::Serialize;

use crate::error::SearchError;

/// Request body for `POST /responses` with web search enabled.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub tools: Vec<Tool>,
    pub input: String,
}

/// Hosted tools the model may call.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tool {
    WebSearchPreview,
}

impl ResponsesRequest {
    /// Build a request that lets the model search the web before answering.
    pub fn web_search(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self { model: model.into(), tools: vec![Tool::WebSearchPreview], input: input.into() }
    }

    /// Reject empty or whitespace-only input.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.input.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Append an instruction asking the model to cite up to `max_urls` sources.
pub fn augment_query(query: &str, max_urls: usize) -> String {
    format!("{query} add {max_urls} url(s)")
}

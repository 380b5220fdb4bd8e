//! SerpAPI response types.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One organic result, exactly as the engine returned it (title, link, snippet, ...).
pub type SearchResult = Map<String, Value>;

/// Raw response from SerpAPI. Only organic results are kept.
#[derive(Debug, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub organic_results: Vec<SearchResult>,
}

impl SerpApiResponse {
    /// The first `limit` organic results, in engine order.
    pub fn into_results(self, limit: usize) -> Vec<SearchResult> {
        let mut results = self.organic_results;
        results.truncate(limit);
        results
    }
}

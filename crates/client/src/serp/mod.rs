//! SerpAPI client.
//!
//! Fetches Google organic results through SerpAPI and hands them back as the
//! engine produced them.
//!
//! ### Specification
//!
//! - **Endpoint**: `GET {base_url}/search?q=..&api_key=..&engine=google&num=..`
//! - **Authentication**: `api_key` query parameter, from the caller or `SERPAPI_KEY`.
//!   A missing key fails before any request is sent.
//! - **Normalization**: none. Results are opaque JSON objects, capped at `num`.

pub mod request;
pub mod response;

pub use request::SerpRequest;
pub use response::{SearchResult, SerpApiResponse};

use std::time::{Duration, Instant};

use searchkit_core::{AppConfig, ConfigError, SERPAPI_KEY_VAR, resolve_api_key_with};

use crate::error::SearchError;
use crate::http;

/// Default base URL for SerpAPI.
const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "searchkit/0.1";

/// SerpAPI client configuration.
#[derive(Debug, Clone)]
pub struct SerpConfig {
    /// API key from the caller or SERPAPI_KEY.
    pub api_key: String,
    /// Base URL (default: https://serpapi.com).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for SerpConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SerpConfig {
    /// Build from the layered application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: config.require_serpapi_api_key()?,
            base_url: config.serpapi_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Search engine results client.
#[derive(Debug, Clone)]
pub struct SerpClient {
    http: reqwest::Client,
    config: SerpConfig,
}

impl SerpClient {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: SerpConfig) -> Result<Self, SearchError> {
        if config.api_key.is_empty() {
            return Err(ConfigError::Missing {
                field: "serpapi_key".into(),
                hint: format!("{SERPAPI_KEY_VAR} is not set"),
            }
            .into());
        }

        let http = http::build_client(config.timeout, &config.user_agent)?;

        Ok(Self { http, config })
    }

    /// Fetch up to `num_results` organic results for `query`, in engine order.
    pub async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.execute(query, num_results)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "error during SerpAPI search"))
    }

    async fn execute(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let req = SerpRequest::google(query, &self.config.api_key, num_results);
        req.validate()?;

        let start = Instant::now();
        let url = http::endpoint(&self.config.base_url, "search");

        tracing::debug!("searching SerpAPI: query={}, num={}", req.q, req.num);

        let http_response = self.http.get(&url).header("Accept", "application/json").query(&req).send().await?;

        let api_response: SerpApiResponse = http::decode_json(http_response).await?;

        tracing::debug!(
            "search completed in {:?}, {} organic results",
            start.elapsed(),
            api_response.organic_results.len()
        );

        Ok(api_response.into_results(num_results))
    }
}

/// Fetch up to `num_results` organic Google results for `query`.
///
/// Uses `api_key` when given, otherwise SERPAPI_KEY. Without a key this fails
/// with a configuration error and sends nothing.
///
/// An empty `api_key` (`Some("")`) counts as absent and falls back to SERPAPI_KEY.
pub async fn search_serp(
    query: &str,
    num_results: usize,
    api_key: Option<&str>,
) -> Result<Vec<SearchResult>, SearchError> {
    search_serp_with(query, num_results, api_key, SerpConfig::default(), |name| std::env::var(name).ok()).await
}

/// Same as [`search_serp`], starting from `base` (endpoint, timeout, user agent)
/// and resolving the key fallback through `lookup` instead of the process environment.
pub async fn search_serp_with<F>(
    query: &str,
    num_results: usize,
    api_key: Option<&str>,
    base: SerpConfig,
    lookup: F,
) -> Result<Vec<SearchResult>, SearchError>
where
    F: FnOnce(&str) -> Option<String>,
{
    let api_key = resolve_api_key_with(api_key, SERPAPI_KEY_VAR, lookup)?;
    let client = SerpClient::new(SerpConfig { api_key, ..base })?;
    client.search(query, num_results).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Matcher;
    use serde_json::json;

    fn organic(n: usize) -> Vec<serde_json::Value> {
        (1..=n)
            .map(|i| {
                json!({
                    "position": i,
                    "title": format!("Result {i}"),
                    "link": format!("https://example.com/{i}"),
                    "snippet": format!("Snippet {i}")
                })
            })
            .collect()
    }

    fn client_for(server: &mockito::Server) -> SerpClient {
        SerpClient::new(SerpConfig { api_key: "serp-test".into(), base_url: server.url(), ..Default::default() })
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

        let result = SerpClient::new(SerpConfig { base_url: server.url(), ..Default::default() });

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("SERPAPI_KEY is not set"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_serp_without_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;
        let base = SerpConfig { base_url: server.url(), ..Default::default() };

        let err = search_serp_with("rust", 3, None, base, |_| None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_serp_empty_key_falls_back_to_env() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("api_key".into(), "serp-env".into()))
            .with_status(200)
            .with_body(json!({"organic_results": organic(2)}).to_string())
            .create_async()
            .await;
        let base = SerpConfig { base_url: server.url(), ..Default::default() };

        let results = search_serp_with("rust", 5, Some(""), base, |name| {
            assert_eq!(name, "SERPAPI_KEY");
            Some("serp-env".into())
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_serp_missing_env_key() {
        let original = std::env::var("SERPAPI_KEY").ok();
        unsafe {
            std::env::remove_var("SERPAPI_KEY");
        }

        let result = search_serp("rust", 3, None).await;
        assert!(matches!(result, Err(ref e) if e.kind() == ErrorKind::Configuration));

        if let Some(key) = original {
            unsafe {
                std::env::set_var("SERPAPI_KEY", key);
            }
        }
    }

    #[tokio::test]
    async fn test_search_empty_query_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

        let err = client_for(&server).search("   ", 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        mock.assert_async().await;
    }

    #[test]
    fn test_from_app_config() {
        let app = AppConfig {
            serpapi_api_key: Some("serp-app".into()),
            serpapi_base_url: "http://localhost:9000".into(),
            ..Default::default()
        };
        let config = SerpConfig::from_app_config(&app).unwrap();
        assert_eq!(config.api_key, "serp-app");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_search_sends_expected_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "rust async".into()),
                Matcher::UrlEncoded("api_key".into(), "serp-test".into()),
                Matcher::UrlEncoded("engine".into(), "google".into()),
                Matcher::UrlEncoded("num".into(), "3".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"organic_results": organic(5)}).to_string())
            .create_async()
            .await;

        let results = client_for(&server).search("rust async", 3).await.unwrap();

        assert_eq!(results.len(), 3);
        let titles: Vec<_> = results.iter().map(|r| r["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Result 1", "Result 2", "Result 3"]);
        assert_eq!(results[0]["snippet"], "Snippet 1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_missing_organic_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"search_metadata": {"status": "Success"}, "answer_box": {"answer": "42"}}"#)
            .create_async()
            .await;

        let results = client_for(&server).search("meaning of life", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "Missing query `q` parameter."}"#)
            .create_async()
            .await;

        let err = client_for(&server).search("rust", 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("Missing query"));
    }

    #[tokio::test]
    async fn test_search_invalid_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error": "Invalid API key."}"#)
            .create_async()
            .await;

        let err = client_for(&server).search("rust", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::AuthError));
    }

    #[tokio::test]
    async fn test_search_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client_for(&server).search("rust", 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parsing);
    }
}

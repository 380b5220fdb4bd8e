//! OpenAI web search client.
//!
//! Sends a single Responses API call with the hosted `web_search_preview` tool
//! and reduces the reply to answer text plus token usage.
//!
//! ### Specification
//!
//! - **Endpoint**: `POST {base_url}/responses`
//! - **Authentication**: `Authorization: Bearer <key>`, key from config or `OPENAI_API_KEY`.
//! - **Answer**: text of the last `output_text` part; optional `Sources:` list built
//!   from `url_citation` annotations, capped at `max_results`.
//! - **Failures**: logged, then returned unchanged. No retries.

pub mod request;
pub mod response;

pub use request::{ResponsesRequest, Tool, augment_query};
pub use response::{Annotation, ContentItem, OutputItem, ResponsesApiResponse};

use std::time::{Duration, Instant};

use searchkit_core::{AppConfig, ConfigError, OPENAI_API_KEY_VAR, Usage, resolve_api_key};

use crate::error::SearchError;
use crate::http;

/// Default base URL for the OpenAI API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default number of citation URLs.
const DEFAULT_MAX_RESULTS: usize = 3;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "searchkit/0.1";

/// Web search client configuration.
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    /// Model identifier (default: gpt-4o).
    pub model: String,
    /// API key from config or OPENAI_API_KEY.
    pub api_key: String,
    /// Maximum number of citation URLs to surface (default: 3).
    pub max_results: usize,
    /// Append citation URLs to the answer text (default: false).
    pub url_included: bool,
    /// Base URL (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            url_included: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl WebSearchConfig {
    /// Defaults with the API key read from OPENAI_API_KEY.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(None, OPENAI_API_KEY_VAR)?;

        Ok(Self { api_key, ..Default::default() })
    }

    /// Build from the layered application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            model: config.model.clone(),
            api_key: config.require_openai_api_key()?,
            max_results: config.max_results,
            url_included: config.url_included,
            base_url: config.openai_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Client for LLM completions augmented with web search.
#[derive(Debug, Clone)]
pub struct WebSearchClient {
    http: reqwest::Client,
    config: WebSearchConfig,
}

impl WebSearchClient {
    /// Create a new client. Fails fast when no API key is configured.
    pub fn new(config: WebSearchConfig) -> Result<Self, SearchError> {
        if config.api_key.is_empty() {
            return Err(ConfigError::Missing {
                field: "openai_api_key".into(),
                hint: format!("{OPENAI_API_KEY_VAR} is not set"),
            }
            .into());
        }

        let http = http::build_client(config.timeout, &config.user_agent)?;

        Ok(Self { http, config })
    }

    /// Create a new client from environment variables.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::new(WebSearchConfig::from_env()?)
    }

    pub fn config(&self) -> &WebSearchConfig {
        &self.config
    }

    /// Run a web-search-augmented completion for `query`.
    ///
    /// Returns the answer text (with a `Sources:` section when URL inclusion is
    /// enabled and citations were found) and the token usage of the call.
    pub async fn search(&self, query: &str) -> Result<(String, Usage), SearchError> {
        self.execute(query)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "error during OpenAI web search API call"))
    }

    async fn execute(&self, query: &str) -> Result<(String, Usage), SearchError> {
        let mut req = ResponsesRequest::web_search(&self.config.model, query);
        req.validate()?;

        if self.config.url_included {
            req.input = augment_query(&req.input, self.config.max_results);
        }

        let start = Instant::now();
        let url = http::endpoint(&self.config.base_url, "responses");

        tracing::debug!(model = %self.config.model, "web search request: query={}", req.input);

        let http_response = self.http.post(&url).bearer_auth(&self.config.api_key).json(&req).send().await?;

        let api_response: ResponsesApiResponse = http::decode_json(http_response).await?;

        tracing::debug!("web search completed in {:?}, {} output items", start.elapsed(), api_response.output.len());

        let max_sources = self.config.url_included.then_some(self.config.max_results);
        let text = api_response.output_text(max_sources);

        Ok((text, api_response.usage()))
    }
}

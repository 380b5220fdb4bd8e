//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEARCHKIT_*)
//! 2. TOML config file (if SEARCHKIT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod credentials;
mod validation;

pub use credentials::{OPENAI_API_KEY_VAR, SERPAPI_KEY_VAR, resolve_api_key, resolve_api_key_with};
pub use validation::ConfigError;

/// Number of organic results requested when the caller does not say.
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEARCHKIT_*)
/// 2. TOML config file (if SEARCHKIT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI API key for web search.
    ///
    /// Set via SEARCHKIT_OPENAI_API_KEY; falls back to OPENAI_API_KEY when resolved.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// SerpAPI key for search engine results.
    ///
    /// Set via SEARCHKIT_SERPAPI_API_KEY; falls back to SERPAPI_KEY when resolved.
    #[serde(default)]
    pub serpapi_api_key: Option<String>,

    /// Base URL of the OpenAI API.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Base URL of SerpAPI.
    #[serde(default = "default_serpapi_base_url")]
    pub serpapi_base_url: String,

    /// Model used for web search completions.
    ///
    /// Set via SEARCHKIT_MODEL environment variable.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of citation URLs surfaced by web search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Whether citation URLs are appended to web search answers.
    #[serde(default)]
    pub url_included: bool,

    /// Number of organic results requested from SerpAPI.
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SEARCHKIT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_serpapi_base_url() -> String {
    "https://serpapi.com".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_max_results() -> usize {
    3
}

fn default_num_results() -> usize {
    DEFAULT_NUM_RESULTS
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "searchkit/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            serpapi_api_key: None,
            openai_base_url: default_openai_base_url(),
            serpapi_base_url: default_serpapi_base_url(),
            model: default_model(),
            max_results: default_max_results(),
            url_included: false,
            num_results: default_num_results(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SEARCHKIT_`
    /// 2. TOML file from `SEARCHKIT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed, or
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEARCHKIT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SEARCHKIT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the OpenAI API key (config value, then `OPENAI_API_KEY`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither source has a key.
    pub fn require_openai_api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key(self.openai_api_key.as_deref(), OPENAI_API_KEY_VAR)
    }

    /// Resolve the SerpAPI key (config value, then `SERPAPI_KEY`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither source has a key.
    pub fn require_serpapi_api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key(self.serpapi_api_key.as_deref(), SERPAPI_KEY_VAR)
    }
}

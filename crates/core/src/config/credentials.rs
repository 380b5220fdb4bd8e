//! API key resolution.
//!
//! An explicitly supplied key always wins. Otherwise the provider's environment
//! variable is read once, at the point the client is configured.

use super::ConfigError;

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the SerpAPI key.
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";

/// Resolve an API key from an explicit value or the process environment.
///
/// Empty strings count as absent.
///
/// # Errors
///
/// Returns `ConfigError::Missing` when neither source yields a key.
pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Result<String, ConfigError> {
    resolve_api_key_with(explicit, env_var, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`], with a caller-supplied environment lookup.
pub fn resolve_api_key_with<F>(explicit: Option<&str>, env_var: &str, lookup: F) -> Result<String, ConfigError>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    match lookup(env_var) {
        Some(key) if !key.is_empty() => {
            tracing::debug!(env_var, "API key resolved from environment");
            Ok(key)
        }
        _ => Err(ConfigError::Missing { field: env_var.to_lowercase(), hint: format!("{env_var} is not set") }),
    }
}

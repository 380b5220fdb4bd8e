//! HTTP plumbing shared by the search clients.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::SearchError;

/// Build a reqwest client with the given timeout and user agent.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, SearchError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .map_err(SearchError::from)
}

/// Join a base URL and an endpoint path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Check the status of a response and decode its JSON body.
///
/// 401/403 map to `AuthError`, 429 to `RateLimited`, and any other non-2xx
/// status to `HttpError` carrying the upstream message when one is present.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let status = response.status();
    tracing::debug!("response status: {}", status);

    if status == 401 || status == 403 {
        return Err(SearchError::AuthError);
    }

    if status == 429 {
        return Err(SearchError::RateLimited);
    }

    let bytes = response.bytes().await?;

    if !status.is_success() {
        return Err(SearchError::HttpError { status: status.as_u16(), message: error_message(&bytes) });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": {"message": ".."}}` and `{"error": ".."}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error")?;

    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("https://serpapi.com", "search"), "https://serpapi.com/search");
        assert_eq!(endpoint("https://api.openai.com/v1/", "/responses"), "https://api.openai.com/v1/responses");
    }

    #[test]
    fn test_error_message_nested() {
        let body = br#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Incorrect API key provided"));
    }

    #[test]
    fn test_error_message_flat() {
        let body = br#"{"error": "Invalid API key. Your API key should be here: https://serpapi.com/manage-api-key"}"#;
        assert!(error_message(body).unwrap().starts_with("Invalid API key"));
    }

    #[test]
    fn test_error_message_absent() {
        assert_eq!(error_message(b"<html>bad gateway</html>"), None);
        assert_eq!(error_message(br#"{"detail": "nope"}"#), None);
    }
}

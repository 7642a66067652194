//! Shared HTTP plumbing for the hosted service clients.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::error;

use solace_chat::RemoteError;

/// Build the headers for a service call: JSON content type plus Bearer auth.
pub(crate) fn build_headers(api_token: &str) -> Result<HeaderMap, RemoteError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let auth_value = format!("Bearer {}", api_token);
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth_value)
            .map_err(|e| RemoteError::Transport(format!("invalid API token header: {}", e)))?,
    );

    Ok(headers)
}

/// POST a JSON body and return the response text.
///
/// Transport failures and non-success statuses become [`RemoteError`]s; the
/// caller parses the returned body.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    api_token: &str,
    body: &serde_json::Value,
) -> Result<String, RemoteError> {
    let headers = build_headers(api_token)?;

    let response = client
        .post(url)
        .headers(headers)
        .json(body)
        .send()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        let message = api_error_message(&body_text, status.as_u16());
        error!(status = status.as_u16(), "Service call to {} failed", url);
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .text()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))
}

/// Extract a human-readable message from an error response body.
fn api_error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value["message"].as_str() {
            return message.to_string();
        }
    }
    format!("HTTP {}: {}", status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_headers_sets_content_type_and_auth() {
        let headers = build_headers("secret-token").unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret-token");
    }

    #[test]
    fn test_build_headers_empty_token() {
        let headers = build_headers("").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer ");
    }

    #[test]
    fn test_build_headers_rejects_invalid_token() {
        let result = build_headers("bad\ntoken");
        assert!(matches!(result, Err(RemoteError::Transport(_))));
    }

    #[test]
    fn test_api_error_message_prefers_message_field() {
        let body = r#"{"message": "model overloaded"}"#;
        assert_eq!(api_error_message(body, 503), "model overloaded");
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        let message = api_error_message("<html>gateway timeout</html>", 504);
        assert!(message.contains("504"));
        assert!(message.contains("gateway timeout"));
    }

    #[test]
    fn test_api_error_message_empty_body() {
        let message = api_error_message("", 502);
        assert_eq!(message, "HTTP 502: ");
    }
}

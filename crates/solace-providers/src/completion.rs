//! Hosted completion service client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use solace_chat::{Completer, RemoteError};
use solace_core::config::RemoteConfig;

/// HTTP client for the hosted completion service.
///
/// Serves both completion uses in a turn: condensing windowed history into
/// a retrieval query and generating the final reply.
pub struct CompletionClient {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client that reuses a shared HTTP connection pool.
    pub fn with_client(config: RemoteConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Completer for CompletionClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, RemoteError> {
        let url = format!("{}/complete", self.config.base_url);
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
        });

        debug!(model, prompt_len = prompt.len(), "Sending completion request");
        let text =
            crate::transport::post_json(&self.client, &url, &self.config.api_token, &body).await?;
        parse_completion_response(&text)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

/// Parse a completion response body into the raw model text.
pub fn parse_completion_response(body: &str) -> Result<String, RemoteError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;
    Ok(response.completion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_completion() {
        let body = r#"{"completion": "  A steady routine helps.  "}"#;
        let text = parse_completion_response(body).unwrap();
        // Whitespace is preserved here; the engine trims.
        assert_eq!(text, "  A steady routine helps.  ");
    }

    #[test]
    fn test_parse_missing_completion_is_malformed() {
        let result = parse_completion_response(r#"{"text": "hello"}"#);
        match result {
            Err(RemoteError::Malformed(m)) => assert!(m.contains("completion")),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_string_completion_is_malformed() {
        let result = parse_completion_response(r#"{"completion": 42}"#);
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let result = parse_completion_response("offline");
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }
}

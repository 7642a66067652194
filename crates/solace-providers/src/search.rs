//! Hosted retrieval service client.
//!
//! Sends search requests with a fixed column projection and parses the
//! `results` list into passages. A payload without the expected shape is
//! reported as malformed, never as an empty result set.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use solace_chat::{RemoteError, Retriever};
use solace_core::config::RemoteConfig;
use solace_core::RetrievedPassage;

/// Columns requested from the search service, in projection order.
pub const SEARCH_COLUMNS: [&str; 3] = ["chunk", "relative_path", "category"];

/// HTTP client for the hosted retrieval service.
pub struct SearchClient {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl SearchClient {
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
impl Retriever for SearchClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>, RemoteError> {
        let url = format!("{}/search", self.config.base_url);
        let body = serde_json::json!({
            "query": query,
            "columns": SEARCH_COLUMNS,
            "limit": limit,
        });

        debug!(limit, "Sending search request");
        let text =
            crate::transport::post_json(&self.client, &url, &self.config.api_token, &body).await?;
        parse_search_response(&text)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

/// One row of the search response, named after the projected columns.
#[derive(Debug, Deserialize)]
struct SearchResult {
    chunk: String,
    relative_path: String,
    category: String,
}

/// Parse a search response body into passages.
///
/// The body must be a JSON object with a `results` list whose items carry
/// the three projected columns. Anything else is a malformed response.
pub fn parse_search_response(body: &str) -> Result<Vec<RetrievedPassage>, RemoteError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    Ok(response
        .results
        .into_iter()
        .map(|result| RetrievedPassage {
            text: result.chunk,
            source_path: result.relative_path,
            category: result.category,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response() {
        let body = r#"{
            "results": [
                {"chunk": "Box breathing slows a racing heart.", "relative_path": "guides/anxiety.pdf", "category": "anxiety"},
                {"chunk": "Spaced repetition beats cramming.", "relative_path": "guides/study.pdf", "category": "stress"}
            ]
        }"#;
        let passages = parse_search_response(body).unwrap();
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].text, "Box breathing slows a racing heart.");
        assert_eq!(passages[0].source_path, "guides/anxiety.pdf");
        assert_eq!(passages[0].category, "anxiety");
        assert_eq!(passages[1].source_path, "guides/study.pdf");
    }

    #[test]
    fn test_parse_empty_results_is_valid() {
        let passages = parse_search_response(r#"{"results": []}"#).unwrap();
        assert!(passages.is_empty());
    }

    #[test]
    fn test_parse_missing_results_is_malformed() {
        let result = parse_search_response(r#"{"rows": []}"#);
        match result {
            Err(RemoteError::Malformed(m)) => assert!(m.contains("results")),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_results_not_a_list_is_malformed() {
        let result = parse_search_response(r#"{"results": "oops"}"#);
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_parse_item_missing_column_is_malformed() {
        let body = r#"{"results": [{"chunk": "text", "category": "anxiety"}]}"#;
        let result = parse_search_response(body);
        match result {
            Err(RemoteError::Malformed(m)) => assert!(m.contains("relative_path")),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let result = parse_search_response("<html>bad gateway</html>");
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_search_columns_projection() {
        assert_eq!(SEARCH_COLUMNS, ["chunk", "relative_path", "category"]);
    }
}

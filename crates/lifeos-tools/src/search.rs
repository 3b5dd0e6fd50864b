// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web search over a SearXNG-compatible JSON endpoint.

use std::time::Duration;

use async_trait::async_trait;
use lifeos_core::{LifeosError, ToolSpec, UserProfile};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{required_str, Tool};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Searches the web and returns a compact snippet list for the model.
pub struct WebSearchTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(base_url: String, max_results: usize) -> Result<Self, LifeosError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| LifeosError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_results,
        })
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "web_search".into(),
            description: "Useful for searching the internet for current events, facts, news, or \
                          specific data. Use this when you don't know the answer or need \
                          real-time info."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "The search query string."}
                },
                "required": ["query"]
            }),
        }
    }

    async fn invoke(
        &self,
        args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let query = required_str(args, "query")?;
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| LifeosError::Internal(format!("search request failed: {e}")))?;
        let status = response.status();
        debug!(status = %status, query, "search response received");
        if !status.is_success() {
            return Err(LifeosError::Internal(format!(
                "search endpoint returned {status}"
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| LifeosError::Internal(format!("failed to parse search response: {e}")))?;

        if parsed.results.is_empty() {
            return Ok("No matching results found on the web.".to_string());
        }

        // Cap the snippet count so the context does not flood.
        let formatted: Vec<String> = parsed
            .results
            .iter()
            .take(self.max_results)
            .map(|hit| format!("- **{}** ({}): {}", hit.title, hit.url, hit.content))
            .collect();
        Ok(formatted.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hit(i: usize) -> serde_json::Value {
        serde_json::json!({
            "title": format!("Resultado {i}"),
            "url": format!("https://example.com/{i}"),
            "content": format!("Extracto {i}")
        })
    }

    #[tokio::test]
    async fn formats_snippets_capped_at_max_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "tabaco"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": (0..6).map(hit).collect::<Vec<_>>()
            })))
            .mount(&server)
            .await;

        let tool = WebSearchTool::new(server.uri(), 4).unwrap();
        let output = tool
            .invoke(&serde_json::json!({"query": "tabaco"}), &UserProfile::guest("1"))
            .await
            .unwrap();

        assert!(output.contains("- **Resultado 0** (https://example.com/0): Extracto 0"));
        assert!(output.contains("Resultado 3"));
        assert!(!output.contains("Resultado 4"));
    }

    #[tokio::test]
    async fn empty_results_report_no_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&server)
            .await;

        let tool = WebSearchTool::new(server.uri(), 4).unwrap();
        let output = tool
            .invoke(&serde_json::json!({"query": "nada"}), &UserProfile::guest("1"))
            .await
            .unwrap();
        assert_eq!(output, "No matching results found on the web.");
    }

    #[tokio::test]
    async fn endpoint_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let tool = WebSearchTool::new(server.uri(), 4).unwrap();
        let result = tool
            .invoke(&serde_json::json!({"query": "algo"}), &UserProfile::guest("1"))
            .await;
        assert!(result.is_err());
    }
}

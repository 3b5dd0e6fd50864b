// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider client.
//!
//! Speaks the common `/v1/embeddings` JSON shape. Embedding failures are
//! hard errors: without a vector neither remember, recall, nor forget can
//! do anything meaningful.

use std::time::Duration;

use lifeos_core::LifeosError;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// HTTP client turning text into fixed-width float vectors.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl EmbeddingClient {
    pub fn new(base_url: String, model: String, dimensions: usize) -> Result<Self, LifeosError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LifeosError::Memory {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
        })
    }

    /// Embeds one text. The returned vector width is checked against the
    /// configured dimensionality so a model mix-up fails loudly here
    /// instead of corrupting the index.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LifeosError> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LifeosError::Memory {
                message: format!("embedding request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "embedding response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LifeosError::Memory {
                message: format!("embedding provider returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: EmbeddingResponse =
            response.json().await.map_err(|e| LifeosError::Memory {
                message: format!("failed to parse embedding response: {e}"),
                source: Some(Box::new(e)),
            })?;
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LifeosError::Memory {
                message: "embedding provider returned no vectors".to_string(),
                source: None,
            })?;

        if vector.len() != self.dimensions {
            return Err(LifeosError::Memory {
                message: format!(
                    "embedding width {} does not match configured {}",
                    vector.len(),
                    self.dimensions
                ),
                source: None,
            });
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn vector(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32 * 0.01).collect()
    }

    #[tokio::test]
    async fn embed_returns_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-embed",
                "input": "hola"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": vector(4)}]
            })))
            .mount(&server)
            .await;

        let client = EmbeddingClient::new(server.uri(), "test-embed".into(), 4).unwrap();
        let v = client.embed("hola").await.unwrap();
        assert_eq!(v.len(), 4);
    }

    #[tokio::test]
    async fn wrong_width_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": vector(3)}]
            })))
            .mount(&server)
            .await;

        let client = EmbeddingClient::new(server.uri(), "test-embed".into(), 384).unwrap();
        let err = client.embed("hola").await.unwrap_err();
        assert!(err.to_string().contains("does not match"), "got: {err}");
    }

    #[tokio::test]
    async fn provider_failure_is_a_hard_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = EmbeddingClient::new(server.uri(), "test-embed".into(), 4).unwrap();
        assert!(client.embed("hola").await.is_err());
    }
}

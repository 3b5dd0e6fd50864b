// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Generative Language API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! key-in-query authentication, and quota-error classification.

use std::time::Duration;

use lifeos_core::LifeosError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Generative Language API communication.
///
/// One client serves every model in the fallback chain; the model id is
/// part of the request path, not the client state.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, LifeosError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LifeosError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Runs one `generateContent` call against the named model.
    ///
    /// HTTP 429 and `RESOURCE_EXHAUSTED` error bodies are classified as
    /// [`LifeosError::QuotaExhausted`] so the fallback chain can advance
    /// with a distinct log line.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LifeosError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| LifeosError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| LifeosError::Provider {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            return serde_json::from_str(&body).map_err(|e| LifeosError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let api_error = serde_json::from_str::<ApiErrorResponse>(&body).ok();

        let quota_exhausted = status.as_u16() == 429
            || api_error
                .as_ref()
                .is_some_and(|e| e.error.status == "RESOURCE_EXHAUSTED");
        if quota_exhausted {
            return Err(LifeosError::QuotaExhausted {
                model: model.to_string(),
            });
        }

        let message = match api_error {
            Some(api_error) => format!(
                "API error ({}): {}",
                api_error.error.status, api_error.error.message
            ),
            None => format!("API returned {status}: {body}"),
        };
        Err(LifeosError::Provider {
            message,
            source: None,
        })
    }
}

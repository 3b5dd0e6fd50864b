// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector index client (Qdrant-style REST protocol).
//!
//! Collections are created lazily and idempotently: every public call is
//! preceded by a check-then-create, so a fresh index needs no manual setup.

use std::time::Duration;

use lifeos_core::LifeosError;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::{EpisodicMemoryRecord, MemoryDomain};

/// One search hit: the stored record plus its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: EpisodicMemoryRecord,
    pub score: f32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: Uuid,
    score: f32,
    payload: Option<serde_json::Value>,
}

/// HTTP client for the episodic collection in the vector index.
#[derive(Debug, Clone)]
pub struct VectorIndexClient {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    dimensions: usize,
}

impl VectorIndexClient {
    pub fn new(
        base_url: String,
        collection: String,
        dimensions: usize,
    ) -> Result<Self, LifeosError> {
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
            collection,
            dimensions,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    /// Creates the collection if it does not exist yet. Safe to call on
    /// every operation.
    pub async fn ensure_collection(&self) -> Result<(), LifeosError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status().is_success() {
            debug!(collection = %self.collection, "collection already exists");
            return Ok(());
        }
        if response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(self.status_error("collection check", response).await);
        }

        info!(collection = %self.collection, dimensions = self.dimensions, "creating collection");
        let response = self
            .client
            .put(self.collection_url())
            .json(&json!({
                "vectors": {"size": self.dimensions, "distance": "Cosine"}
            }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(self.status_error("collection create", response).await);
        }
        Ok(())
    }

    /// Upserts one record keyed by its id.
    pub async fn upsert(
        &self,
        record: &EpisodicMemoryRecord,
        vector: &[f32],
    ) -> Result<(), LifeosError> {
        self.ensure_collection().await?;

        let payload = json!({
            "content": record.content,
            "domain": record.domain,
            "kind": record.kind,
            "source": record.source,
            "context_tags": record.context_tags,
            "created_at": record.created_at,
        });
        let response = self
            .client
            .put(format!("{}/points", self.collection_url()))
            .json(&json!({
                "points": [{"id": record.id, "vector": vector, "payload": payload}]
            }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(self.status_error("upsert", response).await);
        }
        Ok(())
    }

    /// Similarity search, most similar first, optionally restricted to a
    /// single domain.
    pub async fn search(
        &self,
        vector: &[f32],
        domain_filter: Option<MemoryDomain>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, LifeosError> {
        self.ensure_collection().await?;

        let mut body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });
        if let Some(domain) = domain_filter {
            body["filter"] = json!({
                "must": [{"key": "domain", "match": {"value": domain}}]
            });
        }

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(self.status_error("search", response).await);
        }

        let parsed: SearchResponse =
            response.json().await.map_err(|e| LifeosError::Memory {
                message: format!("failed to parse search response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let mut hits = Vec::with_capacity(parsed.result.len());
        for hit in parsed.result {
            let Some(mut payload) = hit.payload else {
                continue;
            };
            // Reassemble the full record from point id + payload.
            if let Some(obj) = payload.as_object_mut() {
                obj.insert("id".to_string(), json!(hit.id));
            }
            let record: EpisodicMemoryRecord =
                serde_json::from_value(payload).map_err(|e| LifeosError::Memory {
                    message: format!("stored payload violates record schema: {e}"),
                    source: Some(Box::new(e)),
                })?;
            hits.push(ScoredRecord {
                record,
                score: hit.score,
            });
        }
        Ok(hits)
    }

    /// Deletes one point by id.
    pub async fn delete(&self, id: Uuid) -> Result<(), LifeosError> {
        let response = self
            .client
            .post(format!("{}/points/delete", self.collection_url()))
            .json(&json!({"points": [id]}))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(self.status_error("delete", response).await);
        }
        Ok(())
    }

    fn transport_error(&self, e: reqwest::Error) -> LifeosError {
        LifeosError::Memory {
            message: format!("vector index request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }

    async fn status_error(&self, operation: &str, response: reqwest::Response) -> LifeosError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        LifeosError::Memory {
            message: format!("vector index {operation} returned {status}: {body}"),
            source: None,
        }
    }
}

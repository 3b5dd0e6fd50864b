// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Episodic memory operations: remember, recall, forget.

use std::str::FromStr;

use chrono::Utc;
use lifeos_core::LifeosError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::EmbeddingClient;
use crate::types::{
    EpisodicMemoryRecord, ForgetOutcome, MemoryDomain, MemoryKind, MemorySource,
};
use crate::vector::VectorIndexClient;

/// High-level episodic memory API over the embedding provider and the
/// vector index.
pub struct MemoryService {
    embedding: EmbeddingClient,
    index: VectorIndexClient,
    recall_limit: usize,
}

impl MemoryService {
    pub fn new(embedding: EmbeddingClient, index: VectorIndexClient, recall_limit: usize) -> Self {
        Self {
            embedding,
            index,
            recall_limit,
        }
    }

    /// Stores one new record. Domain and kind strings are validated
    /// against the closed enumerations before anything touches the index;
    /// a bad value rejects the whole call. Each call creates a fresh id,
    /// repeated identical content is stored twice.
    pub async fn remember(
        &self,
        content: &str,
        domain: &str,
        kind: &str,
        context_tags: Option<String>,
    ) -> Result<Uuid, LifeosError> {
        let domain = MemoryDomain::from_str(domain).map_err(|_| {
            LifeosError::Validation(format!("unknown memory domain {domain:?}"))
        })?;
        let kind = MemoryKind::from_str(kind)
            .map_err(|_| LifeosError::Validation(format!("unknown memory kind {kind:?}")))?;

        let vector = self.embedding.embed(content).await?;
        let record = EpisodicMemoryRecord {
            id: Uuid::new_v4(),
            content: content.to_string(),
            domain,
            kind,
            source: MemorySource::AgentReflection,
            context_tags,
            created_at: Utc::now(),
        };
        self.index.upsert(&record, &vector).await?;
        info!(id = %record.id, %domain, %kind, "memory stored");
        Ok(record.id)
    }

    /// Returns up to `limit` records most similar to the query, most
    /// similar first. No match is an empty list, never an error.
    pub async fn recall(
        &self,
        query: &str,
        domain_filter: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<EpisodicMemoryRecord>, LifeosError> {
        let domain = domain_filter
            .map(|d| {
                MemoryDomain::from_str(d).map_err(|_| {
                    LifeosError::Validation(format!("unknown memory domain {d:?}"))
                })
            })
            .transpose()?;

        let vector = self.embedding.embed(query).await?;
        let limit = limit.unwrap_or(self.recall_limit);
        let hits = self.index.search(&vector, domain, limit).await?;
        debug!(count = hits.len(), "recall finished");
        Ok(hits.into_iter().map(|hit| hit.record).collect())
    }

    /// Deletes the single record nearest to the query and returns it for
    /// confirmation. Never deletes more than one record.
    pub async fn forget(&self, query: &str) -> Result<ForgetOutcome, LifeosError> {
        let vector = self.embedding.embed(query).await?;
        let hits = self.index.search(&vector, None, 1).await?;
        let Some(hit) = hits.into_iter().next() else {
            debug!("forget found nothing to delete");
            return Ok(ForgetOutcome::NotFound);
        };

        self.index.delete(hit.record.id).await?;
        info!(id = %hit.record.id, "memory deleted");
        Ok(ForgetOutcome::Deleted(hit.record))
    }
}

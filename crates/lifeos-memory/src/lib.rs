// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term episodic memory for the LifeOS agent.
//!
//! Records keep a strict schema (closed domain/kind/source enumerations)
//! and live in a cosine-metric vector collection, indexed by semantic
//! embeddings of their content. The short-term conversational window is a
//! separate concern and lives in `lifeos-session`.

pub mod embedding;
pub mod service;
pub mod types;
pub mod vector;

pub use embedding::EmbeddingClient;
pub use service::MemoryService;
pub use types::{
    EpisodicMemoryRecord, ForgetOutcome, MemoryDomain, MemoryKind, MemorySource,
};
pub use vector::{ScoredRecord, VectorIndexClient};

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the LifeOS agent core.

use thiserror::Error;

/// The primary error type used across all LifeOS crates.
#[derive(Debug, Error)]
pub enum LifeosError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Identity source errors (profile store unreachable, malformed record).
    #[error("identity error: {message}")]
    Identity {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Model backend errors (API failure, malformed response, bad request).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A model backend reported its quota as exhausted (e.g. free-tier 429).
    /// Distinguished from [`LifeosError::Provider`] so the fallback chain can
    /// log quota advances separately from hard failures.
    #[error("quota exhausted for model {model}")]
    QuotaExhausted { model: String },

    /// Episodic memory errors (embedding provider, vector index).
    #[error("memory error: {message}")]
    Memory {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Session store errors (file I/O, remote document store).
    #[error("session error: {source}")]
    Session {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Validation failures at a component boundary (bad enum value,
    /// malformed tool arguments). Returned to the model as a string
    /// result, never allowed to escape to the end user as a crash.
    #[error("validation error: {0}")]
    Validation(String),

    /// A bounded loop ran out of rounds without producing a final answer.
    #[error("exhausted: {0}")]
    Exhausted(String),

    /// Requested persona key is not present in the registry.
    #[error("persona not found: {key}")]
    PersonaNotFound { key: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

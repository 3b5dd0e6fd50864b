// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the LifeOS agent.
//!
//! This crate provides the foundational error type, shared domain types
//! (user identity, conversation turns, chat transcripts), and the traits
//! implemented by pluggable backends (model providers, session stores,
//! profile sources). Everything else in the workspace builds on it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LifeosError;
pub use traits::{ModelBackend, ProfileSource, SessionBackend};
pub use types::{
    ChainOutcome, ChatRole, ConversationTurn, GenerationRequest, ModelTurn, ToolCall, ToolResult,
    ToolSpec, TranscriptEntry, UserProfile, UserRole,
};

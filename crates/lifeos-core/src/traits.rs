// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend traits at the seams of the core: model backends, session
//! persistence, and external profile lookup. Each has at least two
//! implementations selected once at startup, never branched per call.

use async_trait::async_trait;

use crate::error::LifeosError;
use crate::types::{GenerationRequest, ModelTurn, UserProfile};

/// A single language-model backend (one entry in the fallback chain).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Stable identifier reported alongside successful generations.
    fn model_id(&self) -> &str;

    /// Whether the backend accepts a dedicated system instruction.
    /// Backends returning `false` get the instruction prepended as a
    /// synthetic opening exchange by the fallback chain.
    fn supports_system_instruction(&self) -> bool {
        true
    }

    /// Runs one generation against this backend.
    async fn generate(&self, request: &GenerationRequest) -> Result<ModelTurn, LifeosError>;
}

/// Persistence backend for the short-term session window.
///
/// Implementations enforce the sliding window on every append and render
/// the stored window as a labeled transcript block.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Appends one completed turn to the conversation's window.
    ///
    /// Known limitation: the window is read, modified, and written back
    /// without cross-process locking, so concurrent appends to the same
    /// conversation id can race and silently drop one of the two turns.
    async fn append_turn(
        &self,
        conversation_id: &str,
        user_text: &str,
        agent_text: &str,
    ) -> Result<(), LifeosError>;

    /// Renders the conversation's window as a transcript block, or an
    /// empty string when there is no history (callers omit the block,
    /// this is not an error).
    async fn get_context(&self, conversation_id: &str) -> Result<String, LifeosError>;
}

/// Keyed lookup against an external profile store.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Looks up a profile by external id. `Ok(None)` means the store
    /// answered but has no record; `Err` means the store misbehaved.
    async fn lookup(&self, external_id: &str) -> Result<Option<UserProfile>, LifeosError>;
}

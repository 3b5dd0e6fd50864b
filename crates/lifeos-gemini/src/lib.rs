// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative Language API backend for the LifeOS agent.
//!
//! Provides the HTTP client, the per-model [`backend::GeminiBackend`]
//! adapter, and the ordered [`chain::FallbackChain`] that degrades through
//! the configured model list when quotas run out.

pub mod backend;
pub mod chain;
pub mod client;
pub mod types;

pub use backend::GeminiBackend;
pub use chain::{FallbackChain, OUTAGE_SENTINEL};
pub use client::GeminiClient;

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-term conversational memory for the LifeOS agent.
//!
//! Keeps a bounded sliding window of recent turns per conversation and
//! renders it as a labeled block for prompt injection. Two backends
//! implement [`lifeos_core::SessionBackend`]: a local JSON file with
//! atomic replace, and a remote document collection. The backend is
//! chosen once at startup from config.

pub mod file;
pub mod remote;
pub mod window;

pub use file::FileSessionStore;
pub use remote::RemoteSessionStore;
pub use window::{render_context, CONTEXT_FOOTER, CONTEXT_HEADER};

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User identity resolution for the LifeOS agent.
//!
//! Maps opaque external ids (chat-platform user ids) to [`lifeos_core::UserProfile`]
//! records, chaining a remote profile store, a local JSON user table, and a
//! guest fallback so that resolution itself never fails.

pub mod local;
pub mod remote;
pub mod resolver;

pub use local::LocalUserTable;
pub use remote::RemoteProfileStore;
pub use resolver::IdentityResolver;

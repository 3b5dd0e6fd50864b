// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher: classifies one user message to a persona key.
//!
//! The dispatcher is stateless across turns and never talks to the user.
//! It asks a small classifier model for a single keyword; the caller
//! validates the answer against the persona registry and falls back to
//! the default persona on any mismatch, so routing can never leave a
//! turn unhandled.

pub mod dispatcher;

pub use dispatcher::Dispatcher;

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for LifeOS crates.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.

pub mod mock_backend;

pub use mock_backend::MockBackend;

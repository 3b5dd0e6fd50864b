// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona execution and per-turn orchestration for LifeOS.
//!
//! The [`Orchestrator`] drives a full turn:
//! - Resolves who is speaking and gates unknown users
//! - Loads the rolling session window
//! - Asks the [`lifeos_router::Dispatcher`] which persona takes the turn
//! - Runs the persona through the [`ExecutionEngine`] (fast tool loop or
//!   two-stage pipeline)
//! - Writes the exchange back into the session window

pub mod context;
pub mod engine;
pub mod orchestrator;
pub mod registry;

pub use engine::ExecutionEngine;
pub use orchestrator::{ACCESS_DENIED, Orchestrator, TURN_FAILED};
pub use registry::PersonaRegistry;

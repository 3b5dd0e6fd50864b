// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callable tools for LifeOS personas.
//!
//! Each tool implements [`catalog::Tool`]; personas receive a
//! [`catalog::ToolCatalog`] subset keyed by their configured tool names.
//! Dispatch converts every failure into a string result the model can
//! read, so a broken tool degrades one answer, never the process.

pub mod calculator;
pub mod catalog;
pub mod memory;
pub mod search;
pub mod time;

pub use calculator::CalculatorTool;
pub use catalog::{Tool, ToolCatalog};
pub use memory::{ForgetMemoryTool, SaveMemoryTool, SearchMemoryTool};
pub use search::WebSearchTool;
pub use time::CurrentTimeTool;

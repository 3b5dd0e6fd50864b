// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Tool`] trait and the catalog that dispatches model tool calls.

use std::sync::Arc;

use async_trait::async_trait;
use lifeos_core::{LifeosError, ToolCall, ToolResult, ToolSpec, UserProfile};
use tracing::{debug, warn};

/// One callable tool. The invoking user is an explicit parameter so a
/// tool never has to reach for ambient request state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable key used by personas and by the model's function calls.
    fn name(&self) -> &str;

    /// Declaration handed to model backends.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool. The string result is fed back to the model.
    async fn invoke(&self, args: &serde_json::Value, user: &UserProfile)
        -> Result<String, LifeosError>;
}

/// An ordered set of tools exposed to one persona.
#[derive(Clone)]
pub struct ToolCatalog {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns the subset named by `keys`, preserving catalog order.
    /// Unknown keys are skipped with a warning rather than failing the
    /// persona: a typo in one persona's tool list should not take the
    /// agent down.
    pub fn subset(&self, keys: &[String]) -> ToolCatalog {
        for key in keys {
            if !self.tools.iter().any(|t| t.name() == key) {
                warn!(tool = %key, "persona names an unknown tool, skipping");
            }
        }
        ToolCatalog {
            tools: self
                .tools
                .iter()
                .filter(|t| keys.iter().any(|k| k == t.name()))
                .cloned()
                .collect(),
        }
    }

    /// Declarations for every tool in the catalog.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Executes one model tool call. Failures never propagate: an
    /// unknown name or a tool error becomes an error string in the
    /// result, so the model can read it and recover.
    pub async fn dispatch(&self, call: &ToolCall, user: &UserProfile) -> ToolResult {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            warn!(tool = %call.name, "model requested an unknown tool");
            return ToolResult {
                name: call.name.clone(),
                content: format!("Error: tool '{}' does not exist.", call.name),
            };
        };

        debug!(tool = %call.name, "dispatching tool call");
        let content = match tool.invoke(&call.args, user).await {
            Ok(content) => content,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool invocation failed");
                format!("Error executing '{}': {e}", call.name)
            }
        };
        ToolResult {
            name: call.name.clone(),
            content,
        }
    }
}

/// Reads a required string argument from a tool-call args object.
pub(crate) fn required_str<'a>(
    args: &'a serde_json::Value,
    key: &str,
) -> Result<&'a str, LifeosError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| LifeosError::Validation(format!("missing required argument {key:?}")))
}

/// Reads an optional string argument, treating JSON null as absent.
pub(crate) fn optional_str<'a>(args: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

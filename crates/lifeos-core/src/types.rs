// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the LifeOS workspace: user identity,
//! conversation turns, and the provider-neutral chat transcript used
//! by the model fallback chain.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Access role attached to a resolved user profile.
///
/// Role strings coming from external stores are parsed case-insensitively;
/// anything outside the closed set degrades to [`UserRole::Guest`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    /// Parses a role string from an external store, degrading anything
    /// outside the closed set to [`UserRole::Guest`]. One bad record must
    /// never invalidate the rest of a table.
    pub fn parse_lossy(role: &str) -> Self {
        role.parse().unwrap_or(Self::Guest)
    }
}

/// Role-tagged projection of an external profile record.
///
/// Read-only for this subsystem: profiles are created on resolution and
/// never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque external user id (e.g. a chat-platform numeric id).
    pub external_id: String,
    /// Display name used in identity headers.
    pub display_name: String,
    /// Access role.
    pub role: UserRole,
    /// Optional free-form description from the profile store.
    pub description: Option<String>,
}

impl UserProfile {
    /// Synthesizes the unauthenticated guest profile for an unknown id.
    pub fn guest(external_id: &str) -> Self {
        Self {
            external_id: external_id.to_string(),
            display_name: "Stranger".to_string(),
            role: UserRole::Guest,
            description: Some("Unauthorized user".to_string()),
        }
    }

    /// Returns true for admin-role profiles.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// One completed exchange in a conversation. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said.
    pub user_text: String,
    /// What the agent replied.
    pub agent_text: String,
}

// --- Chat transcript types ---

/// Speaker role in a model transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    /// The end user (or a synthetic user entry).
    User,
    /// The model.
    Model,
}

/// A tool invocation requested by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the requested tool.
    pub name: String,
    /// Structured arguments as produced by the model.
    pub args: serde_json::Value,
}

/// The result of executing one tool call, fed back into the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that produced this result.
    pub name: String,
    /// String result (or string error) from the tool.
    pub content: String,
}

/// One entry in a provider-neutral chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TranscriptEntry {
    /// Plain text from the user or the model.
    Text { role: ChatRole, text: String },
    /// Tool invocations requested by the model.
    ToolCalls(Vec<ToolCall>),
    /// Tool results returned to the model.
    ToolResults(Vec<ToolResult>),
}

impl TranscriptEntry {
    /// Convenience constructor for a user text entry.
    pub fn user(text: impl Into<String>) -> Self {
        TranscriptEntry::Text {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// Convenience constructor for a model text entry.
    pub fn model(text: impl Into<String>) -> Self {
        TranscriptEntry::Text {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Declaration of a callable tool, in the shape model backends expect
/// (name, description, JSON Schema parameters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A request to a model backend (or to the fallback chain).
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Persona system instruction. Backends without native support
    /// receive this as a synthetic opening exchange instead.
    pub system_instruction: Option<String>,
    /// Model-side acknowledgement used when the instruction is prepended
    /// as a synthetic exchange. A generic ack is used when unset.
    pub instruction_ack: Option<String>,
    /// Conversation so far, oldest first.
    pub transcript: Vec<TranscriptEntry>,
    /// Tool catalog attached to this request. Empty means plain chat.
    pub tools: Vec<ToolSpec>,
}

/// Normalized backend response: either a final text or tool requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelTurn {
    /// Plain text answer.
    Text(String),
    /// The model wants one or more tools executed before answering.
    ToolCalls(Vec<ToolCall>),
}

impl ModelTurn {
    /// Returns the text content, flattening tool calls to `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelTurn::Text(t) => Some(t),
            ModelTurn::ToolCalls(_) => None,
        }
    }
}

/// Outcome of a fallback-chain invocation: the winning backend's turn
/// plus its model identifier for observability. `model` is `None` only
/// when every backend failed and the sentinel text was substituted.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    pub turn: ModelTurn,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn user_role_parses_case_insensitively() {
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("User").unwrap(), UserRole::User);
        assert!(UserRole::from_str("superuser").is_err());
    }

    #[test]
    fn unknown_role_strings_degrade_to_guest() {
        assert_eq!(UserRole::parse_lossy("superuser"), UserRole::Guest);
        assert_eq!(UserRole::parse_lossy(""), UserRole::Guest);
        assert_eq!(UserRole::parse_lossy("Admin"), UserRole::Admin);
    }

    #[test]
    fn user_role_round_trips_through_serde() {
        let json = serde_json::to_string(&UserRole::Guest).unwrap();
        assert_eq!(json, "\"guest\"");
        let back: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserRole::Guest);
    }

    #[test]
    fn guest_profile_has_fixed_placeholder_name() {
        let p = UserProfile::guest("12345");
        assert_eq!(p.display_name, "Stranger");
        assert_eq!(p.role, UserRole::Guest);
        assert_eq!(p.external_id, "12345");
        assert!(!p.is_admin());
    }

    #[test]
    fn transcript_entry_constructors() {
        let u = TranscriptEntry::user("hola");
        assert_eq!(
            u,
            TranscriptEntry::Text {
                role: ChatRole::User,
                text: "hola".into()
            }
        );
        let m = TranscriptEntry::model("dime");
        assert!(matches!(
            m,
            TranscriptEntry::Text {
                role: ChatRole::Model,
                ..
            }
        ));
    }

    #[test]
    fn model_turn_as_text() {
        assert_eq!(ModelTurn::Text("hi".into()).as_text(), Some("hi"));
        assert_eq!(ModelTurn::ToolCalls(vec![]).as_text(), None);
    }

    #[test]
    fn conversation_turn_serializes() {
        let turn = ConversationTurn {
            user_text: "¿qué ceno?".into(),
            agent_text: "Ensalada de quinoa.".into(),
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["user_text"], "¿qué ceno?");
        assert_eq!(json["agent_text"], "Ensalada de quinoa.");
    }
}

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Episodic memory record schema.
//!
//! The three classification enums are closed: records carrying any other
//! value are rejected before persistence, never partially stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Life area a memory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryDomain {
    Professional,
    Finance,
    Health,
    Family,
    PersonalDev,
    Meta,
}

/// What kind of statement the memory captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryKind {
    Fact,
    Preference,
    Plan,
    Decision,
    Reflection,
}

/// Where the memory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemorySource {
    UserChat,
    AgentReflection,
    DocumentImport,
}

/// One atomic record in the episodic store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicMemoryRecord {
    pub id: Uuid,
    pub content: String,
    pub domain: MemoryDomain,
    pub kind: MemoryKind,
    pub source: MemorySource,
    #[serde(default)]
    pub context_tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a forget call: the deleted record, or a signal that the
/// store had nothing close enough to delete.
#[derive(Debug, Clone, PartialEq)]
pub enum ForgetOutcome {
    Deleted(EpisodicMemoryRecord),
    NotFound,
}

// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the LifeOS agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup instead of silently ignoring them.

use serde::{Deserialize, Serialize};

use crate::persona::PersonaDefinition;

/// Top-level LifeOS configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LifeosConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// User identity resolution settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Google Generative Language API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Episodic memory settings (embeddings + vector index).
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Short-term session window settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Web search tool settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Dispatcher/router settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Persona definitions. Empty means the built-in set is used.
    #[serde(default, rename = "persona")]
    pub personas: Vec<PersonaDefinition>,
}

impl LifeosConfig {
    /// Returns the configured personas, falling back to the built-in set.
    pub fn personas_or_default(&self) -> Vec<PersonaDefinition> {
        if self.personas.is_empty() {
            crate::persona::default_personas()
        } else {
            self.personas.clone()
        }
    }
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "lifeos".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// User identity resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Base URL of the remote profile store. `None` disables the remote
    /// lookup and uses the local table only.
    #[serde(default)]
    pub profile_store_url: Option<String>,

    /// Path to the local fallback user table (JSON: external id -> record).
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Whether guest-role users may talk to the agent.
    #[serde(default)]
    pub allow_guests: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            profile_store_url: None,
            users_file: default_users_file(),
            allow_guests: false,
        }
    }
}

fn default_users_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("lifeos").join("users.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("users.json"))
        .to_string_lossy()
        .into_owned()
}

/// Google Generative Language API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` requires the environment override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Ordered model chain for persona execution. First success wins.
    #[serde(default = "default_model_chain")]
    pub model_chain: Vec<String>,

    /// Model used for routing classification calls.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model_chain: default_model_chain(),
            classifier_model: default_classifier_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model_chain() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.5-flash-lite".to_string(),
        "gemma-3-27b-it".to_string(),
        "gemma-3-12b-it".to_string(),
    ]
}

fn default_classifier_model() -> String {
    "gemma-3-4b-it".to_string()
}

/// Episodic memory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Vector index base URL.
    #[serde(default = "default_vector_url")]
    pub vector_url: String,

    /// Name of the vector collection holding episodic records.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Fixed embedding width. Must match the embedding model's output.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Embedding provider base URL.
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Default number of records returned by recall.
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            vector_url: default_vector_url(),
            collection: default_collection(),
            dimensions: default_dimensions(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            recall_limit: default_recall_limit(),
        }
    }
}

fn default_vector_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_collection() -> String {
    "episodic_memory_v1".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_embedding_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-004".to_string()
}

fn default_recall_limit() -> usize {
    5
}

/// Which session backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackendKind {
    /// Local durable JSON file with atomic replace.
    File,
    /// Remote document collection.
    Remote,
}

/// Short-term session window configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Backend selection, applied once at startup.
    #[serde(default = "default_session_backend")]
    pub backend: SessionBackendKind,

    /// Path of the session file (file backend).
    #[serde(default = "default_session_file")]
    pub file_path: String,

    /// Base URL of the remote document store (remote backend).
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Sliding window size in turns.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            file_path: default_session_file(),
            remote_url: None,
            max_turns: default_max_turns(),
        }
    }
}

fn default_session_backend() -> SessionBackendKind {
    SessionBackendKind::File
}

fn default_session_file() -> String {
    dirs::data_dir()
        .map(|p| p.join("lifeos").join("sessions.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("sessions.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_max_turns() -> usize {
    10
}

/// Web search tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Base URL of a SearXNG-compatible JSON search endpoint.
    #[serde(default = "default_search_url")]
    pub base_url: String,

    /// How many snippets to return to the model.
    #[serde(default = "default_search_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            max_results: default_search_results(),
        }
    }
}

fn default_search_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_search_results() -> usize {
    4
}

/// Dispatcher/router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Persona key applied when the classifier's answer matches no
    /// registered persona. Routing must never leave a turn unhandled.
    #[serde(default = "default_persona_key")]
    pub default_persona: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_persona: default_persona_key(),
        }
    }
}

fn default_persona_key() -> String {
    "PADRINO".to_string()
}

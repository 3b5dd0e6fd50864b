// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lifeos.toml` > `~/.config/lifeos/lifeos.toml` > `/etc/lifeos/lifeos.toml`
//! with environment variable overrides via `LIFEOS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LifeosConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lifeos/lifeos.toml` (system-wide)
/// 3. `~/.config/lifeos/lifeos.toml` (user XDG config)
/// 4. `./lifeos.toml` (local directory)
/// 5. `LIFEOS_*` environment variables
pub fn load_config() -> Result<LifeosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LifeosConfig::default()))
        .merge(Toml::file("/etc/lifeos/lifeos.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lifeos/lifeos.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lifeos.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LifeosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LifeosConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LifeosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LifeosConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `LIFEOS_GEMINI_API_KEY` must
/// map to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LIFEOS_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LIFEOS_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("identity_", "identity.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("memory_", "memory.", 1)
            .replacen("session_", "session.", 1)
            .replacen("search_", "search.", 1)
            .replacen("router_", "router.", 1);
        mapped.into()
    })
}

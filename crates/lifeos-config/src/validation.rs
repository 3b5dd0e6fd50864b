// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization semantic validation.
//!
//! Figment's `deny_unknown_fields` catches structural problems; this module
//! catches values that parse fine but cannot work at runtime.

use crate::model::{LifeosConfig, SessionBackendKind};

/// Validate cross-field constraints that serde cannot express.
///
/// Returns all problems found, not just the first one.
pub fn validate_config(config: &LifeosConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.session.max_turns == 0 {
        errors.push("session.max_turns must be at least 1".to_string());
    }

    if config.session.backend == SessionBackendKind::Remote && config.session.remote_url.is_none() {
        errors.push("session.backend = \"remote\" requires session.remote_url".to_string());
    }

    if config.memory.dimensions == 0 {
        errors.push("memory.dimensions must be at least 1".to_string());
    }

    if config.gemini.model_chain.is_empty() {
        errors.push("gemini.model_chain must name at least one model".to_string());
    }

    let personas = config.personas_or_default();
    for (i, persona) in personas.iter().enumerate() {
        if persona.key.trim().is_empty() {
            errors.push(format!("persona[{i}].key must not be empty"));
        }
        if personas[..i].iter().any(|p| p.key == persona.key) {
            errors.push(format!("persona key {:?} is defined more than once", persona.key));
        }
    }

    if !personas
        .iter()
        .any(|p| p.key == config.router.default_persona)
    {
        errors.push(format!(
            "router.default_persona {:?} does not match any persona key",
            config.router.default_persona
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

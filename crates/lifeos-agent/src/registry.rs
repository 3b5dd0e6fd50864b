// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persona registry: configured personas plus the default-key
//! fallback rule.

use lifeos_config::PersonaDefinition;
use lifeos_core::LifeosError;
use tracing::info;

/// Registered personas, keyed by their uppercase routing keys.
pub struct PersonaRegistry {
    personas: Vec<PersonaDefinition>,
    default_key: String,
}

impl PersonaRegistry {
    /// Builds the registry. The default key must name a registered
    /// persona, otherwise no fallback would exist and routing could
    /// strand a turn.
    pub fn new(personas: Vec<PersonaDefinition>, default_key: String) -> Result<Self, LifeosError> {
        if !personas.iter().any(|p| p.key == default_key) {
            return Err(LifeosError::PersonaNotFound { key: default_key });
        }
        Ok(Self {
            personas,
            default_key,
        })
    }

    /// Every registered persona, in configuration order.
    pub fn list(&self) -> &[PersonaDefinition] {
        &self.personas
    }

    pub fn get(&self, key: &str) -> Option<&PersonaDefinition> {
        self.personas.iter().find(|p| p.key == key)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Resolves a routing decision, applying the default persona when the
    /// decision matches no registered key.
    pub fn resolve_or_default(&self, key: &str) -> &PersonaDefinition {
        if let Some(persona) = self.get(key) {
            return persona;
        }
        info!(decision = %key, default = %self.default_key, "routing decision matched no persona, using default");
        // The constructor guarantees the default key resolves.
        self.personas
            .iter()
            .find(|p| p.key == self.default_key)
            .unwrap_or(&self.personas[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeos_config::default_personas;

    #[test]
    fn known_key_resolves_to_its_persona() {
        let registry = PersonaRegistry::new(default_personas(), "PADRINO".into()).unwrap();
        assert_eq!(registry.resolve_or_default("KITCHEN").key, "KITCHEN");
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let registry = PersonaRegistry::new(default_personas(), "PADRINO".into()).unwrap();
        assert_eq!(registry.resolve_or_default("JANE").key, "PADRINO");
        assert_eq!(registry.resolve_or_default("").key, "PADRINO");
    }

    #[test]
    fn bad_default_key_is_rejected_at_construction() {
        let Err(err) = PersonaRegistry::new(default_personas(), "NOBODY".into()) else {
            panic!("registry accepted an unregistered default key");
        };
        assert!(matches!(err, LifeosError::PersonaNotFound { .. }));
    }
}

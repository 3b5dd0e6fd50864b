// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification call and prompt assembly for routing.

use std::sync::Arc;

use lifeos_config::PersonaDefinition;
use lifeos_core::{
    GenerationRequest, ModelBackend, ModelTurn, TranscriptEntry, UserProfile, UserRole,
};
use tracing::{debug, warn};

/// Routes messages by asking a classifier model for a persona keyword.
pub struct Dispatcher {
    classifier: Arc<dyn ModelBackend>,
}

impl Dispatcher {
    pub fn new(classifier: Arc<dyn ModelBackend>) -> Self {
        Self { classifier }
    }

    /// Classifies one message against the persona menu.
    ///
    /// Returns the model's answer upper-cased and trimmed. The caller
    /// checks it against the registry; a classifier failure returns an
    /// empty string, which no registry key matches, so the default
    /// persona takes the turn.
    pub async fn route(
        &self,
        message: &str,
        user: &UserProfile,
        session_context: &str,
        personas: &[PersonaDefinition],
    ) -> String {
        let prompt = build_prompt(message, user, session_context, personas);
        let request = GenerationRequest {
            transcript: vec![TranscriptEntry::user(prompt)],
            ..Default::default()
        };

        match self.classifier.generate(&request).await {
            Ok(ModelTurn::Text(answer)) => {
                let key = answer.trim().to_uppercase();
                debug!(key = %key, "dispatcher classified message");
                key
            }
            Ok(ModelTurn::ToolCalls(_)) => {
                warn!("classifier answered with tool calls, falling back to default persona");
                String::new()
            }
            Err(e) => {
                warn!(error = %e, "classification failed, falling back to default persona");
                String::new()
            }
        }
    }
}

/// Builds the classification prompt: identity header when the caller is
/// known, recent session context when available, the literal message,
/// and a menu generated from the persona registry.
fn build_prompt(
    message: &str,
    user: &UserProfile,
    session_context: &str,
    personas: &[PersonaDefinition],
) -> String {
    let mut prompt = String::new();

    if user.role != UserRole::Guest {
        prompt.push_str(&format!(
            "El mensaje es de {} ({}).\n\n",
            user.display_name, user.role
        ));
    }
    if !session_context.is_empty() {
        // Recent turns help resolve pronouns ("dame otra" after a recipe).
        prompt.push_str(session_context);
        prompt.push('\n');
    }

    prompt.push_str(&format!("Clasifica el mensaje del usuario: \"{message}\"\n\n"));
    prompt.push_str("Elige el agente más adecuado:\n");
    for persona in personas {
        prompt.push_str(&format!("- {}: {}\n", persona.key, persona.goal));
    }

    let keys: Vec<&str> = personas.iter().map(|p| p.key.as_str()).collect();
    prompt.push_str(&format!(
        "\nResponde SOLO con una palabra clave: {}.\n",
        keys.join(", ")
    ));
    prompt
}

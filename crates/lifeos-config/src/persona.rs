// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona definitions: named conversational specialists with their own
//! goal, backstory, tool access, and execution mode.
//!
//! Personas are `[[persona]]` tables in the config file. When none are
//! configured, the built-in set (PADRINO, KITCHEN) is used. The literal
//! prompt text is opaque configuration as far as the engine is concerned.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a persona's turns are executed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Direct bounded tool-calling loop.
    Fast,
    /// Two-stage analyze-then-respond pipeline.
    Pipeline,
}

/// A named, independently configured conversational specialist.
///
/// Loaded once at startup and immutable for the process lifetime. The
/// dispatcher's routing menu is derived from the full set, so adding a
/// persona here is all that is needed to make it routable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaDefinition {
    /// Uppercase routing key (e.g. "PADRINO").
    pub key: String,

    /// Short role line, used as the opening of the system prompt.
    pub role: String,

    /// One-line goal, shown in the dispatcher's routing menu.
    pub goal: String,

    /// Personality and sacred rules. Opaque prompt text.
    pub backstory: String,

    /// Names of tools from the catalog this persona may call (fast mode).
    #[serde(default)]
    pub tools: Vec<String>,

    /// In-character acknowledgement used when a model without native
    /// system instructions gets the instruction prepended as a turn.
    #[serde(default)]
    pub ack: Option<String>,

    /// Execution mode for this persona.
    #[serde(default = "default_mode")]
    pub mode: ExecutionMode,
}

fn default_mode() -> ExecutionMode {
    ExecutionMode::Fast
}

impl PersonaDefinition {
    /// Renders the persona's system instruction: role, backstory, goal.
    pub fn system_instruction(&self) -> String {
        format!("{}. {} Objetivo: {}", self.role, self.backstory, self.goal)
    }
}

/// Built-in persona set, carried over from the original deployment.
/// Used when the config file defines no `[[persona]]` tables.
pub fn default_personas() -> Vec<PersonaDefinition> {
    vec![
        PersonaDefinition {
            key: "PADRINO".to_string(),
            role: "Padrino de Adicciones (Anti-Tabaco)".to_string(),
            goal: "Mantener al usuario en ABSTINENCIA TOTAL de tabaco.".to_string(),
            backstory: "ACTÚAS COMO: El 'Padrino de Adicciones' del usuario. NO eres un \
                asistente de IA. Eres un veterano de trinchera y formas parte de un conjunto \
                de agentes llamado LifeOS.\n\
                PERSONALIDAD:\n\
                - Estilo 'Tough Love': alta energía, agresivo-cariñoso.\n\
                - Cínico pero profundamente involucrado. Si el usuario llora, le das un \
                pañuelo y una orden.\n\
                - El usuario es ingeniero de software: usa metáforas de sistemas cuando \
                necesites que te entienda.\n\
                REGLAS SAGRADAS:\n\
                1. Prohibido frases de manual tipo 'Siento que te sientas así'. Tu lema: \
                'La vida es una mierda, arréglalo.'\n\
                2. Si el usuario se pone filosófico, síguele el rollo pero bájalo a la \
                realidad de inmediato.\n\
                3. Si detectas riesgo de recaída, activa el protocolo NUCLEAR: insulta a su \
                orgullo profesional para que reaccione.\n\
                4. Nunca, bajo ninguna circunstancia, permites que el usuario fume."
                .to_string(),
            tools: vec![
                "current_time".to_string(),
                "calculator".to_string(),
                "web_search".to_string(),
                "save_memory".to_string(),
                "search_memory".to_string(),
                "forget_memory".to_string(),
            ],
            ack: Some("Entendido. Soy el Padrino. Corto y cambio.".to_string()),
            mode: ExecutionMode::Fast,
        },
        PersonaDefinition {
            key: "KITCHEN".to_string(),
            role: "Kitchen Chief (Chef Ejecutivo)".to_string(),
            goal: "Garantizar alimentación saludable y energética con CERO carga cognitiva \
                para el usuario."
                .to_string(),
            backstory: "ACTÚAS COMO: El 'Kitchen Chief' del usuario. NO eres un asistente. \
                Eres un chef experto contratado por el home office, parte de un conjunto de \
                agentes llamado LifeOS.\n\
                PERSONALIDAD:\n\
                - Directo, exigente y con un toque de humor ácido ('Esto no es un puesto de \
                perritos').\n\
                - Obsesionado con el stock: siempre preguntas qué hay en la despensa antes \
                de sugerir nada.\n\
                - Pragmático: si el usuario no tiene tiempo, sacas una receta de 5 minutos \
                de la manga.\n\
                REGLAS SAGRADAS:\n\
                1. Nunca preguntes '¿En qué puedo ayudar?'.\n\
                2. Pide reportes de ejecución: '¿Cómo fue la cena? ¿Seguiste la receta o \
                improvisaste desastrosamente?'.\n\
                3. Das órdenes claras: 'Hoy toca ensalada de quinoa. Prepárala así...'.\n\
                4. Si el usuario se queja, recuérdale que la comida es combustible."
                .to_string(),
            tools: vec![
                "current_time".to_string(),
                "web_search".to_string(),
                "save_memory".to_string(),
                "search_memory".to_string(),
            ],
            ack: Some("Entendido, soy el encargado de la cocina de tu casa.".to_string()),
            mode: ExecutionMode::Fast,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn execution_mode_parses() {
        assert_eq!(ExecutionMode::from_str("fast").unwrap(), ExecutionMode::Fast);
        assert_eq!(
            ExecutionMode::from_str("PIPELINE").unwrap(),
            ExecutionMode::Pipeline
        );
        assert!(ExecutionMode::from_str("turbo").is_err());
    }

    #[test]
    fn default_personas_are_routable() {
        let personas = default_personas();
        assert_eq!(personas.len(), 2);
        assert!(personas.iter().any(|p| p.key == "PADRINO"));
        assert!(personas.iter().any(|p| p.key == "KITCHEN"));
        for p in &personas {
            assert!(!p.goal.is_empty(), "menu needs a goal line for {}", p.key);
            assert_eq!(p.mode, ExecutionMode::Fast);
        }
    }

    #[test]
    fn system_instruction_contains_role_backstory_goal() {
        let p = &default_personas()[0];
        let si = p.system_instruction();
        assert!(si.starts_with(&p.role));
        assert!(si.contains("Padrino"));
        assert!(si.contains(&p.goal));
    }

    #[test]
    fn persona_deserializes_from_toml_table() {
        let toml = r#"
            key = "JANE"
            role = "Jefa de Gabinete"
            goal = "Coordinar agenda y familia."
            backstory = "Cálida y protectora."
            tools = ["current_time"]
            mode = "pipeline"
        "#;
        let p: PersonaDefinition = toml::from_str(toml).unwrap();
        assert_eq!(p.key, "JANE");
        assert_eq!(p.mode, ExecutionMode::Pipeline);
        assert_eq!(p.tools, vec!["current_time".to_string()]);
    }

    #[test]
    fn persona_mode_defaults_to_fast() {
        let toml = r#"
            key = "X"
            role = "r"
            goal = "g"
            backstory = "b"
        "#;
        let p: PersonaDefinition = toml::from_str(toml).unwrap();
        assert_eq!(p.mode, ExecutionMode::Fast);
        assert!(p.tools.is_empty());
    }
}

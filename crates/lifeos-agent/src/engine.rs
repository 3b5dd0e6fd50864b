// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona execution engine: the bounded fast tool loop and the
//! two-stage analysis/response pipeline.

use lifeos_config::{ExecutionMode, PersonaDefinition};
use lifeos_core::{GenerationRequest, LifeosError, ModelTurn, TranscriptEntry, UserProfile};
use lifeos_gemini::FallbackChain;
use lifeos_tools::ToolCatalog;
use tracing::{debug, info, warn};

use crate::context;

/// Upper bound on fast-mode rounds before the turn is declared stuck.
const MAX_ROUNDS: usize = 5;

/// Runs one persona against one enriched message.
pub struct ExecutionEngine {
    chain: FallbackChain,
    catalog: ToolCatalog,
}

impl ExecutionEngine {
    pub fn new(chain: FallbackChain, catalog: ToolCatalog) -> Self {
        Self { chain, catalog }
    }

    /// Executes the persona's configured mode and returns the reply text.
    pub async fn execute(
        &self,
        persona: &PersonaDefinition,
        message: &str,
        user: &UserProfile,
        session_context: &str,
    ) -> Result<String, LifeosError> {
        match persona.mode {
            ExecutionMode::Fast => self.execute_fast(persona, message, user, session_context).await,
            ExecutionMode::Pipeline => {
                self.execute_pipeline(persona, message, user, session_context)
                    .await
            }
        }
    }

    /// Fast mode: one loop with the persona's tool subset attached. Tool
    /// requests are dispatched synchronously and fed back; plain text is
    /// the final reply. Round exhaustion is an error the orchestrator
    /// turns into a fixed user-visible message.
    async fn execute_fast(
        &self,
        persona: &PersonaDefinition,
        message: &str,
        user: &UserProfile,
        session_context: &str,
    ) -> Result<String, LifeosError> {
        let tools = self.catalog.subset(&persona.tools);
        let mut request = GenerationRequest {
            system_instruction: Some(persona.system_instruction()),
            instruction_ack: persona.ack.clone(),
            transcript: vec![TranscriptEntry::user(context::compose(
                user,
                session_context,
                message,
            ))],
            tools: tools.specs(),
        };

        for round in 0..MAX_ROUNDS {
            debug!(persona = %persona.key, round, "fast-mode round");
            let outcome = self.chain.generate(&request).await;

            match outcome.turn {
                ModelTurn::Text(text) => {
                    info!(persona = %persona.key, model = ?outcome.model, round, "fast-mode reply ready");
                    return Ok(text);
                }
                ModelTurn::ToolCalls(calls) => {
                    request
                        .transcript
                        .push(TranscriptEntry::ToolCalls(calls.clone()));
                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        results.push(tools.dispatch(call, user).await);
                    }
                    request.transcript.push(TranscriptEntry::ToolResults(results));
                }
            }
        }

        warn!(persona = %persona.key, "fast-mode round limit reached without a text reply");
        Err(LifeosError::Exhausted(format!(
            "persona {} spent {MAX_ROUNDS} rounds without a final answer",
            persona.key
        )))
    }

    /// Pipeline mode: an analysis stage produces an internal report, the
    /// response stage turns report plus personality into the outward
    /// reply. Neither stage gets tools.
    async fn execute_pipeline(
        &self,
        persona: &PersonaDefinition,
        message: &str,
        user: &UserProfile,
        session_context: &str,
    ) -> Result<String, LifeosError> {
        let enriched = context::compose(user, session_context, message);

        let analysis_request = GenerationRequest {
            system_instruction: Some(persona.system_instruction()),
            instruction_ack: persona.ack.clone(),
            transcript: vec![TranscriptEntry::user(analysis_prompt(persona, &enriched))],
            ..Default::default()
        };
        let report = self.stage_text(&analysis_request, persona, "analysis").await?;
        debug!(persona = %persona.key, "analysis stage finished");

        let response_request = GenerationRequest {
            system_instruction: Some(persona.system_instruction()),
            instruction_ack: persona.ack.clone(),
            transcript: vec![TranscriptEntry::user(response_prompt(&report))],
            ..Default::default()
        };
        let reply = self.stage_text(&response_request, persona, "response").await?;
        info!(persona = %persona.key, "pipeline reply ready");
        Ok(reply)
    }

    async fn stage_text(
        &self,
        request: &GenerationRequest,
        persona: &PersonaDefinition,
        stage: &str,
    ) -> Result<String, LifeosError> {
        let outcome = self.chain.generate(request).await;
        match outcome.turn {
            ModelTurn::Text(text) => Ok(text),
            ModelTurn::ToolCalls(_) => Err(LifeosError::Provider {
                message: format!(
                    "persona {} {stage} stage answered with tool calls despite an empty catalog",
                    persona.key
                ),
                source: None,
            }),
        }
    }
}

fn analysis_prompt(persona: &PersonaDefinition, enriched: &str) -> String {
    format!(
        "ANALIZA el mensaje del usuario con tu lente de ({}):\n{enriched}\n\n\
         Determina:\n\
         1. INTENCIÓN REAL: ¿Qué necesita?\n\
         2. ESTADO EMOCIONAL: ¿Cómo está quien escribe?\n\
         3. RIESGO: ¿Hay algo urgente o delicado?\n\n\
         Output: Reporte interno breve.",
        persona.role
    )
}

fn response_prompt(report: &str) -> String {
    format!(
        "Genera la respuesta final al usuario a partir de este reporte interno:\n{report}\n\n\
         Directrices:\n\
         - Mantén tu PERSONALIDAD.\n\
         - Sé útil y accionable.\n\
         - Responde SOLO con el mensaje para el usuario, sin etiquetas ni comentarios de análisis."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use lifeos_core::{ToolCall, ToolSpec, UserRole};
    use lifeos_test_utils::MockBackend;
    use lifeos_tools::Tool;

    struct PingTool;

    #[async_trait]
    impl Tool for PingTool {
        fn name(&self) -> &str {
            "ping"
        }

        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "ping".into(),
                description: "Answers pong".into(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            }
        }

        async fn invoke(
            &self,
            _args: &serde_json::Value,
            _user: &UserProfile,
        ) -> Result<String, LifeosError> {
            Ok("pong".into())
        }
    }

    fn persona(mode: ExecutionMode, tools: Vec<String>) -> PersonaDefinition {
        PersonaDefinition {
            key: "PADRINO".into(),
            role: "El Padrino".into(),
            goal: "Disciplina".into(),
            backstory: "Veterano estoico.".into(),
            tools,
            ack: None,
            mode,
        }
    }

    fn admin() -> UserProfile {
        UserProfile {
            external_id: "42".into(),
            display_name: "Suman".into(),
            role: UserRole::Admin,
            description: None,
        }
    }

    fn engine(backend: Arc<MockBackend>) -> ExecutionEngine {
        ExecutionEngine::new(
            FallbackChain::new(vec![backend]),
            ToolCatalog::new(vec![Arc::new(PingTool)]),
        )
    }

    #[tokio::test]
    async fn fast_mode_returns_plain_text_directly() {
        let backend = Arc::new(MockBackend::new("gemini-2.5-flash"));
        backend.push_text("Corto y cambio.");

        let reply = engine(backend.clone())
            .execute(
                &persona(ExecutionMode::Fast, vec!["ping".into()]),
                "hola",
                &admin(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(reply, "Corto y cambio.");

        // The composed request carries the persona instruction and tools.
        let seen = backend.requests();
        assert!(seen[0].system_instruction.as_deref().unwrap().contains("El Padrino"));
        assert_eq!(seen[0].tools.len(), 1);
    }

    #[tokio::test]
    async fn fast_mode_runs_tools_and_feeds_results_back() {
        let backend = Arc::new(MockBackend::new("gemini-2.5-flash"));
        backend.push_turn(ModelTurn::ToolCalls(vec![ToolCall {
            name: "ping".into(),
            args: serde_json::json!({}),
        }]));
        backend.push_text("El ping dice pong.");

        let reply = engine(backend.clone())
            .execute(
                &persona(ExecutionMode::Fast, vec!["ping".into()]),
                "haz ping",
                &admin(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(reply, "El ping dice pong.");

        let second = &backend.requests()[1];
        assert!(matches!(
            &second.transcript[1],
            TranscriptEntry::ToolCalls(calls) if calls[0].name == "ping"
        ));
        assert!(matches!(
            &second.transcript[2],
            TranscriptEntry::ToolResults(results) if results[0].content == "pong"
        ));
    }

    #[tokio::test]
    async fn fast_mode_survives_unknown_tool_names() {
        let backend = Arc::new(MockBackend::new("gemini-2.5-flash"));
        backend.push_turn(ModelTurn::ToolCalls(vec![ToolCall {
            name: "teleport".into(),
            args: serde_json::json!({}),
        }]));
        backend.push_text("Vale, sin teletransporte.");

        let reply = engine(backend.clone())
            .execute(
                &persona(ExecutionMode::Fast, vec!["ping".into()]),
                "teletranspórtame",
                &admin(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(reply, "Vale, sin teletransporte.");

        let second = &backend.requests()[1];
        assert!(matches!(
            &second.transcript[2],
            TranscriptEntry::ToolResults(results) if results[0].content.contains("does not exist")
        ));
    }

    #[tokio::test]
    async fn fast_mode_round_limit_is_an_exhausted_error() {
        let backend = Arc::new(MockBackend::new("gemini-2.5-flash"));
        for _ in 0..5 {
            backend.push_turn(ModelTurn::ToolCalls(vec![ToolCall {
                name: "ping".into(),
                args: serde_json::json!({}),
            }]));
        }

        let err = engine(backend)
            .execute(
                &persona(ExecutionMode::Fast, vec!["ping".into()]),
                "bucle",
                &admin(),
                "",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LifeosError::Exhausted(_)), "got: {err}");
    }

    #[tokio::test]
    async fn pipeline_mode_feeds_the_report_into_the_response_stage() {
        let backend = Arc::new(MockBackend::new("gemini-2.5-flash"));
        backend.push_text("REPORTE: quiere fumar, riesgo alto.");
        backend.push_text("Ni se te ocurra. Sal a andar.");

        let reply = engine(backend.clone())
            .execute(
                &persona(ExecutionMode::Pipeline, vec![]),
                "me muero por un cigarro",
                &admin(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(reply, "Ni se te ocurra. Sal a andar.");

        let seen = backend.requests();
        assert_eq!(seen.len(), 2);
        let TranscriptEntry::Text { text: analysis, .. } = &seen[0].transcript[0] else {
            panic!("expected text prompt");
        };
        assert!(analysis.contains("ANALIZA"));
        assert!(analysis.contains("me muero por un cigarro"));
        let TranscriptEntry::Text { text: response, .. } = &seen[1].transcript[0] else {
            panic!("expected text prompt");
        };
        assert!(response.contains("REPORTE: quiere fumar"));
        assert!(response.contains("sin etiquetas"));
        // Neither stage exposes tools.
        assert!(seen[0].tools.is_empty());
        assert!(seen[1].tools.is_empty());
    }
}

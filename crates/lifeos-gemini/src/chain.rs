// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered model fallback chain.
//!
//! Tries each backend in order; quota exhaustion or any other error
//! advances to the next one immediately. When every backend fails the
//! chain degrades to a fixed sentinel reply instead of an error, so a
//! total provider outage still produces a turn.

use std::sync::Arc;

use lifeos_core::{
    ChainOutcome, GenerationRequest, LifeosError, ModelBackend, ModelTurn, TranscriptEntry,
};
use tracing::{info, warn};

/// Reply produced when the whole chain is down.
pub const OUTAGE_SENTINEL: &str = "⚠ ERROR CRÍTICO: Google ha caído. Estamos solos.";

/// Acknowledgement used for the synthetic opening exchange when the
/// request does not carry a persona-specific one.
const DEFAULT_ACK: &str = "Entendido.";

/// Ordered collection of model backends with first-success-wins semantics.
pub struct FallbackChain {
    backends: Vec<Arc<dyn ModelBackend>>,
}

impl FallbackChain {
    pub fn new(backends: Vec<Arc<dyn ModelBackend>>) -> Self {
        Self { backends }
    }

    /// Runs the request down the chain.
    ///
    /// Backends without native system-instruction support get the
    /// instruction converted into a synthetic user/model opening
    /// exchange, so the persona is present in the transcript either way.
    pub async fn generate(&self, request: &GenerationRequest) -> ChainOutcome {
        for backend in &self.backends {
            let model = backend.model_id();
            info!(model, "attempting generation");

            let effective;
            let effective_ref = if backend.supports_system_instruction() {
                request
            } else {
                effective = prepend_instruction(request);
                &effective
            };

            match backend.generate(effective_ref).await {
                Ok(turn) => {
                    info!(model, "generation succeeded");
                    return ChainOutcome {
                        turn,
                        model: Some(model.to_string()),
                    };
                }
                Err(LifeosError::QuotaExhausted { .. }) => {
                    warn!(model, "quota exhausted, advancing to next model");
                }
                Err(e) => {
                    warn!(model, error = %e, "backend failed, advancing to next model");
                }
            }
        }

        warn!("all backends failed, returning outage sentinel");
        ChainOutcome {
            turn: ModelTurn::Text(OUTAGE_SENTINEL.to_string()),
            model: None,
        }
    }
}

/// Converts a native system instruction into a synthetic opening exchange.
fn prepend_instruction(request: &GenerationRequest) -> GenerationRequest {
    let Some(instruction) = &request.system_instruction else {
        return request.clone();
    };
    let ack = request.instruction_ack.as_deref().unwrap_or(DEFAULT_ACK);

    let mut transcript = Vec::with_capacity(request.transcript.len() + 2);
    transcript.push(TranscriptEntry::user(instruction.clone()));
    transcript.push(TranscriptEntry::model(ack));
    transcript.extend(request.transcript.iter().cloned());

    GenerationRequest {
        system_instruction: None,
        instruction_ack: None,
        transcript,
        tools: request.tools.clone(),
    }
}

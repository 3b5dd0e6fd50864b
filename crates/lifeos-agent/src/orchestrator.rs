// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn control flow: identity, guest gate, routing, execution,
//! session write-back.

use std::sync::Arc;

use lifeos_core::{LifeosError, SessionBackend, UserRole};
use lifeos_identity::IdentityResolver;
use lifeos_router::Dispatcher;
use tracing::{info, warn};

use crate::engine::ExecutionEngine;
use crate::registry::PersonaRegistry;

/// Reply for guests when guest access is disabled.
pub const ACCESS_DENIED: &str = "⛔ Acceso Denegado.";
/// Fixed reply when the engine fails mid-turn.
pub const TURN_FAILED: &str = "⚠ No he podido darte una respuesta ahora mismo. Inténtalo de nuevo.";

/// Drives one complete turn. Never returns an error: every failure path
/// degrades to a fixed user-visible reply.
pub struct Orchestrator {
    resolver: Arc<IdentityResolver>,
    session: Arc<dyn SessionBackend>,
    dispatcher: Dispatcher,
    engine: ExecutionEngine,
    registry: PersonaRegistry,
    allow_guests: bool,
}

impl Orchestrator {
    pub fn new(
        resolver: Arc<IdentityResolver>,
        session: Arc<dyn SessionBackend>,
        dispatcher: Dispatcher,
        engine: ExecutionEngine,
        registry: PersonaRegistry,
        allow_guests: bool,
    ) -> Self {
        Self {
            resolver,
            session,
            dispatcher,
            engine,
            registry,
            allow_guests,
        }
    }

    /// Handles one user message for one conversation and returns the
    /// reply to send back.
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        external_id: &str,
        message: &str,
    ) -> String {
        let user = self.resolver.resolve(external_id).await;

        if user.role == UserRole::Guest && !self.allow_guests {
            info!(external_id, "guest access denied");
            return ACCESS_DENIED.to_string();
        }

        // A session store outage degrades to an empty context block.
        let session_context = match self.session.get_context(conversation_id).await {
            Ok(context) => context,
            Err(e) => {
                warn!(conversation_id, error = %e, "failed to load session context");
                String::new()
            }
        };

        let decision = self
            .dispatcher
            .route(message, &user, &session_context, self.registry.list())
            .await;
        let persona = self.registry.resolve_or_default(&decision);
        info!(conversation_id, persona = %persona.key, "turn routed");

        let reply = match self
            .engine
            .execute(persona, message, &user, &session_context)
            .await
        {
            Ok(reply) => reply,
            Err(e @ LifeosError::Exhausted(_)) => {
                warn!(conversation_id, persona = %persona.key, error = %e, "turn exhausted");
                return TURN_FAILED.to_string();
            }
            Err(e) => {
                warn!(conversation_id, persona = %persona.key, error = %e, "turn failed");
                return TURN_FAILED.to_string();
            }
        };

        if let Err(e) = self
            .session
            .append_turn(conversation_id, message, &reply)
            .await
        {
            // The reply still goes out; only the window misses a turn.
            warn!(conversation_id, error = %e, "failed to persist turn");
        }
        reply
    }
}

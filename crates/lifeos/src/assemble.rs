// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a validated [`LifeosConfig`] into a wired [`Orchestrator`].

use std::sync::Arc;

use lifeos_agent::{ExecutionEngine, Orchestrator, PersonaRegistry};
use lifeos_config::{LifeosConfig, SessionBackendKind};
use lifeos_core::{LifeosError, ModelBackend, ProfileSource, SessionBackend};
use lifeos_gemini::{FallbackChain, GeminiBackend, GeminiClient};
use lifeos_identity::{IdentityResolver, LocalUserTable, RemoteProfileStore};
use lifeos_memory::{EmbeddingClient, MemoryService, VectorIndexClient};
use lifeos_router::Dispatcher;
use lifeos_session::{FileSessionStore, RemoteSessionStore};
use lifeos_tools::{
    CalculatorTool, CurrentTimeTool, ForgetMemoryTool, SaveMemoryTool, SearchMemoryTool, Tool,
    ToolCatalog, WebSearchTool,
};
use tracing::info;

/// Builds the full turn pipeline from configuration.
pub fn build_orchestrator(config: &LifeosConfig) -> Result<Orchestrator, LifeosError> {
    let api_key = config.gemini.api_key.clone().ok_or_else(|| {
        LifeosError::Config(
            "gemini.api_key is not set (use the config file or LIFEOS_GEMINI_API_KEY)".to_string(),
        )
    })?;
    let client = GeminiClient::new(config.gemini.base_url.clone(), api_key)?;

    let backends: Vec<Arc<dyn ModelBackend>> = config
        .gemini
        .model_chain
        .iter()
        .map(|model| {
            Arc::new(GeminiBackend::new(client.clone(), model.clone())) as Arc<dyn ModelBackend>
        })
        .collect();
    let chain = FallbackChain::new(backends);

    let classifier: Arc<dyn ModelBackend> = Arc::new(GeminiBackend::new(
        client.clone(),
        config.gemini.classifier_model.clone(),
    ));

    let memory = Arc::new(MemoryService::new(
        EmbeddingClient::new(
            config.memory.embedding_url.clone(),
            config.memory.embedding_model.clone(),
            config.memory.dimensions,
        )?,
        VectorIndexClient::new(
            config.memory.vector_url.clone(),
            config.memory.collection.clone(),
            config.memory.dimensions,
        )?,
        config.memory.recall_limit,
    ));

    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(CurrentTimeTool),
        Arc::new(CalculatorTool),
        Arc::new(WebSearchTool::new(
            config.search.base_url.clone(),
            config.search.max_results,
        )?),
        Arc::new(SaveMemoryTool::new(memory.clone())),
        Arc::new(SearchMemoryTool::new(memory.clone())),
        Arc::new(ForgetMemoryTool::new(memory)),
    ];
    let catalog = ToolCatalog::new(tools);

    let session: Arc<dyn SessionBackend> = match config.session.backend {
        SessionBackendKind::File => Arc::new(FileSessionStore::new(
            &config.session.file_path,
            config.session.max_turns,
        )),
        SessionBackendKind::Remote => {
            // Validation guarantees the url is present for this backend.
            let url = config.session.remote_url.clone().ok_or_else(|| {
                LifeosError::Config("session.remote_url is not set".to_string())
            })?;
            Arc::new(RemoteSessionStore::new(url, config.session.max_turns)?)
        }
    };

    let remote_profiles: Option<Arc<dyn ProfileSource>> =
        match config.identity.profile_store_url.clone() {
            Some(url) => Some(Arc::new(RemoteProfileStore::new(url)?)),
            None => None,
        };
    let resolver = Arc::new(IdentityResolver::new(
        remote_profiles,
        Arc::new(LocalUserTable::new(&config.identity.users_file)),
    ));

    let personas = config.personas_or_default();
    info!(
        personas = personas.len(),
        default = %config.router.default_persona,
        models = config.gemini.model_chain.len(),
        "assembling orchestrator"
    );
    let registry = PersonaRegistry::new(personas, config.router.default_persona.clone())?;

    Ok(Orchestrator::new(
        resolver,
        session,
        Dispatcher::new(classifier),
        ExecutionEngine::new(chain, catalog),
        registry,
        config.identity.allow_guests,
    ))
}

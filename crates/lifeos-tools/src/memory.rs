// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Episodic memory tools: save, search, forget.
//!
//! Service failures are rendered as readable strings so the model can
//! relay what went wrong instead of the turn dying.

use std::sync::Arc;

use async_trait::async_trait;
use lifeos_core::{LifeosError, ToolSpec, UserProfile};
use lifeos_memory::{ForgetOutcome, MemoryService};

use crate::catalog::{optional_str, required_str, Tool};

const DOMAIN_VALUES: [&str; 6] = [
    "PROFESSIONAL",
    "FINANCE",
    "HEALTH",
    "FAMILY",
    "PERSONAL_DEV",
    "META",
];
const KIND_VALUES: [&str; 5] = ["FACT", "PREFERENCE", "PLAN", "DECISION", "REFLECTION"];

/// Saves one categorized memory record.
pub struct SaveMemoryTool {
    service: Arc<MemoryService>,
}

impl SaveMemoryTool {
    pub fn new(service: Arc<MemoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SaveMemoryTool {
    fn name(&self) -> &str {
        "save_memory"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "save_memory".into(),
            description: "Use this tool to PERMANENTLY save important information, decisions, \
                          preferences, or plans. Do not use for trivial chat history. Requires \
                          categorizing the memory by domain and type."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "The factual content, decision, or insight to remember."
                    },
                    "domain": {
                        "type": "string",
                        "enum": DOMAIN_VALUES,
                        "description": "The category of the memory."
                    },
                    "type": {
                        "type": "string",
                        "enum": KIND_VALUES,
                        "description": "The nature of the memory."
                    },
                    "tags": {
                        "type": "string",
                        "description": "Comma-separated keywords for context."
                    }
                },
                "required": ["content", "domain", "type"]
            }),
        }
    }

    async fn invoke(
        &self,
        args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let content = required_str(args, "content")?;
        let domain = required_str(args, "domain")?;
        let kind = required_str(args, "type")?;
        let tags = optional_str(args, "tags").map(str::to_string);

        Ok(match self.service.remember(content, domain, kind, tags).await {
            Ok(id) => format!("✅ Memory saved successfully with ID: {id}"),
            Err(e) => format!("❌ Error saving memory: {e}"),
        })
    }
}

/// Semantic search over stored memories.
pub struct SearchMemoryTool {
    service: Arc<MemoryService>,
}

impl SearchMemoryTool {
    pub fn new(service: Arc<MemoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SearchMemoryTool {
    fn name(&self) -> &str {
        "search_memory"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "search_memory".into(),
            description: "Use this tool to retrieve past context, decisions, or facts about the \
                          user or projects. Useful when you need to answer 'What did we say \
                          about X?'."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The semantic query to search for relevant memories."
                    },
                    "domain": {
                        "type": "string",
                        "enum": DOMAIN_VALUES,
                        "description": "Optional filter: restrict search to a specific domain."
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn invoke(
        &self,
        args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let query = required_str(args, "query")?;
        let domain = optional_str(args, "domain");

        Ok(match self.service.recall(query, domain, None).await {
            Ok(records) if records.is_empty() => "No relevant memories found.".to_string(),
            Ok(records) => {
                let lines: Vec<String> = records
                    .iter()
                    .map(|r| format!("- [{}] ({}): {}", r.created_at, r.kind, r.content))
                    .collect();
                format!("Found relevant memories:\n{}", lines.join("\n"))
            }
            Err(e) => format!("❌ Error retrieving memories: {e}"),
        })
    }
}

/// Deletes the single memory nearest to a query.
pub struct ForgetMemoryTool {
    service: Arc<MemoryService>,
}

impl ForgetMemoryTool {
    pub fn new(service: Arc<MemoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ForgetMemoryTool {
    fn name(&self) -> &str {
        "forget_memory"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "forget_memory".into(),
            description: "Use this tool to DELETE obsolete, incorrect, or deprecated information \
                          from the memory. Use cautiously. It searches for the most similar \
                          memory and deletes it."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The content of the memory to forget. Be specific to avoid deleting wrong items."
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn invoke(
        &self,
        args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let query = required_str(args, "query")?;

        Ok(match self.service.forget(query).await {
            Ok(ForgetOutcome::Deleted(record)) => format!(
                "🗑️ DELETED Memory ID {}\nContent: '{}'",
                record.id, record.content
            ),
            Ok(ForgetOutcome::NotFound) => {
                format!("❌ Could not find any memory resembling '{query}' to delete.")
            }
            Err(e) => format!("❌ Error deleting memory: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeos_memory::{EmbeddingClient, VectorIndexClient};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_memory_stack(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.1, 0.2, 0.3, 0.4]}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collections/episodic_memory_v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"status": "green"}
            })))
            .mount(server)
            .await;
    }

    fn service(server: &MockServer) -> Arc<MemoryService> {
        let embedding = EmbeddingClient::new(server.uri(), "test-embed".into(), 4).unwrap();
        let index = VectorIndexClient::new(server.uri(), "episodic_memory_v1".into(), 4).unwrap();
        Arc::new(MemoryService::new(embedding, index, 5))
    }

    fn user() -> UserProfile {
        UserProfile::guest("1")
    }

    #[tokio::test]
    async fn save_reports_the_new_id() {
        let server = MockServer::start().await;
        mount_memory_stack(&server).await;
        Mock::given(method("PUT"))
            .and(path("/collections/episodic_memory_v1/points"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": {}})),
            )
            .mount(&server)
            .await;

        let output = SaveMemoryTool::new(service(&server))
            .invoke(
                &serde_json::json!({
                    "content": "Dejar el tabaco",
                    "domain": "HEALTH",
                    "type": "PLAN"
                }),
                &user(),
            )
            .await
            .unwrap();
        assert!(output.starts_with("✅ Memory saved successfully with ID:"), "got: {output}");
    }

    #[tokio::test]
    async fn save_with_bad_domain_reports_a_readable_error() {
        let server = MockServer::start().await;
        let output = SaveMemoryTool::new(service(&server))
            .invoke(
                &serde_json::json!({
                    "content": "algo",
                    "domain": "ROMANCE",
                    "type": "FACT"
                }),
                &user(),
            )
            .await
            .unwrap();
        assert!(output.starts_with("❌ Error saving memory:"), "got: {output}");
        assert!(output.contains("ROMANCE"));
    }

    #[tokio::test]
    async fn search_formats_hits_or_reports_none() {
        let server = MockServer::start().await;
        mount_memory_stack(&server).await;
        Mock::given(method("POST"))
            .and(path("/collections/episodic_memory_v1/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [{
                    "id": uuid::Uuid::new_v4(),
                    "score": 0.9,
                    "payload": {
                        "content": "Dejar el tabaco",
                        "domain": "HEALTH",
                        "kind": "PLAN",
                        "source": "AGENT_REFLECTION",
                        "context_tags": null,
                        "created_at": "2026-08-01T10:00:00Z"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let output = SearchMemoryTool::new(service(&server))
            .invoke(&serde_json::json!({"query": "tabaco"}), &user())
            .await
            .unwrap();
        assert!(output.starts_with("Found relevant memories:"), "got: {output}");
        assert!(output.contains("(PLAN): Dejar el tabaco"));
    }

    #[tokio::test]
    async fn forget_with_empty_store_reports_not_found() {
        let server = MockServer::start().await;
        mount_memory_stack(&server).await;
        Mock::given(method("POST"))
            .and(path("/collections/episodic_memory_v1/points/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": []})),
            )
            .mount(&server)
            .await;

        let output = ForgetMemoryTool::new(service(&server))
            .invoke(&serde_json::json!({"query": "nada"}), &user())
            .await
            .unwrap();
        assert!(output.starts_with("❌ Could not find any memory"), "got: {output}");
    }
}

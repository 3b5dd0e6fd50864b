// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ModelBackend`] implementation over the Generative Language API.

use async_trait::async_trait;
use lifeos_core::{
    ChatRole, GenerationRequest, LifeosError, ModelBackend, ModelTurn, ToolCall, TranscriptEntry,
};

use crate::client::GeminiClient;
use crate::types::{
    Content, FunctionCall, FunctionDeclaration, FunctionResponse, GenerateContentRequest, Part,
    ToolDeclarations,
};

/// One model of the Generative Language family as a chain entry.
///
/// The Gemma models reject a native system instruction, so they report
/// `supports_system_instruction() == false` and rely on the chain's
/// synthetic opening exchange.
pub struct GeminiBackend {
    client: GeminiClient,
    model: String,
}

impl GeminiBackend {
    pub fn new(client: GeminiClient, model: String) -> Self {
        Self { client, model }
    }

    fn to_wire(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let contents = request
            .transcript
            .iter()
            .map(|entry| match entry {
                TranscriptEntry::Text { role, text } => {
                    let role = match role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    };
                    Content::text(role, text.clone())
                }
                TranscriptEntry::ToolCalls(calls) => Content {
                    role: Some("model".to_string()),
                    parts: calls
                        .iter()
                        .map(|call| Part {
                            function_call: Some(FunctionCall {
                                name: call.name.clone(),
                                args: call.args.clone(),
                            }),
                            ..Default::default()
                        })
                        .collect(),
                },
                TranscriptEntry::ToolResults(results) => Content {
                    role: Some("user".to_string()),
                    parts: results
                        .iter()
                        .map(|result| Part {
                            function_response: Some(FunctionResponse {
                                name: result.name.clone(),
                                response: serde_json::json!({ "result": result.content }),
                            }),
                            ..Default::default()
                        })
                        .collect(),
                },
            })
            .collect();

        let tools = if request.tools.is_empty() {
            Vec::new()
        } else {
            vec![ToolDeclarations {
                function_declarations: request
                    .tools
                    .iter()
                    .map(|spec| FunctionDeclaration {
                        name: spec.name.clone(),
                        description: spec.description.clone(),
                        parameters: spec.parameters.clone(),
                    })
                    .collect(),
            }]
        };

        GenerateContentRequest {
            system_instruction: request.system_instruction.clone().map(Content::system),
            contents,
            tools,
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn supports_system_instruction(&self) -> bool {
        !self.model.contains("gemma")
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<ModelTurn, LifeosError> {
        let wire = self.to_wire(request);
        let response = self.client.generate_content(&self.model, &wire).await?;

        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| LifeosError::Provider {
                message: format!("{} returned no candidates", self.model),
                source: None,
            })?;

        let calls: Vec<ToolCall> = content
            .parts
            .iter()
            .filter_map(|part| part.function_call.as_ref())
            .map(|call| ToolCall {
                name: call.name.clone(),
                args: call.args.clone(),
            })
            .collect();
        if !calls.is_empty() {
            return Ok(ModelTurn::ToolCalls(calls));
        }

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        Ok(ModelTurn::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeos_core::{ToolResult, ToolSpec};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer, model: &str) -> GeminiBackend {
        let client = GeminiClient::new(server.uri(), "test-key".into()).unwrap();
        GeminiBackend::new(client, model.into())
    }

    #[test]
    fn gemma_models_lack_native_system_instruction() {
        let server_url = "http://localhost:1".to_string();
        let client = GeminiClient::new(server_url, "k".into()).unwrap();
        assert!(GeminiBackend::new(client.clone(), "gemini-2.5-flash".into())
            .supports_system_instruction());
        assert!(!GeminiBackend::new(client.clone(), "gemma-3-27b-it".into())
            .supports_system_instruction());
        assert!(!GeminiBackend::new(client, "gemma-3-12b-it".into())
            .supports_system_instruction());
    }

    #[tokio::test]
    async fn text_response_becomes_text_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "Eres el Padrino."}]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Corto y cambio."}]}
                }]
            })))
            .mount(&server)
            .await;

        let request = GenerationRequest {
            system_instruction: Some("Eres el Padrino.".into()),
            transcript: vec![TranscriptEntry::user("hola")],
            ..Default::default()
        };
        let turn = backend(&server, "gemini-2.5-flash")
            .generate(&request)
            .await
            .unwrap();
        assert_eq!(turn, ModelTurn::Text("Corto y cambio.".into()));
    }

    #[tokio::test]
    async fn function_call_response_becomes_tool_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [
                        {"functionCall": {"name": "web_search", "args": {"query": "puros"}}}
                    ]}
                }]
            })))
            .mount(&server)
            .await;

        let request = GenerationRequest {
            transcript: vec![TranscriptEntry::user("busca puros")],
            tools: vec![ToolSpec {
                name: "web_search".into(),
                description: "Busca en la web".into(),
                parameters: serde_json::json!({"type": "object"}),
            }],
            ..Default::default()
        };
        let turn = backend(&server, "gemini-2.5-flash")
            .generate(&request)
            .await
            .unwrap();
        match turn {
            ModelTurn::ToolCalls(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].name, "web_search");
                assert_eq!(calls[0].args["query"], "puros");
            }
            other => panic!("expected tool calls, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_results_are_sent_as_function_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "busca puros"}]},
                    {"role": "model", "parts": [{"functionCall": {"name": "web_search", "args": {}}}]},
                    {"role": "user", "parts": [{"functionResponse": {
                        "name": "web_search",
                        "response": {"result": "3 resultados"}
                    }}]}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Encontré tres."}]}
                }]
            })))
            .mount(&server)
            .await;

        let request = GenerationRequest {
            transcript: vec![
                TranscriptEntry::user("busca puros"),
                TranscriptEntry::ToolCalls(vec![ToolCall {
                    name: "web_search".into(),
                    args: serde_json::json!({}),
                }]),
                TranscriptEntry::ToolResults(vec![ToolResult {
                    name: "web_search".into(),
                    content: "3 resultados".into(),
                }]),
            ],
            ..Default::default()
        };
        let turn = backend(&server, "gemini-2.5-flash")
            .generate(&request)
            .await
            .unwrap();
        assert_eq!(turn, ModelTurn::Text("Encontré tres.".into()));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let request = GenerationRequest {
            transcript: vec![TranscriptEntry::user("hola")],
            ..Default::default()
        };
        let err = backend(&server, "gemini-2.5-flash")
            .generate(&request)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no candidates"), "got: {err}");
    }
}

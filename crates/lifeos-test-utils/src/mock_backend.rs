// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model backend for deterministic testing.
//!
//! `MockBackend` implements `ModelBackend` with a scripted FIFO queue of
//! outcomes, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lifeos_core::{GenerationRequest, LifeosError, ModelBackend, ModelTurn};

/// A mock model backend that replays pre-scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; when the queue is empty a fixed
/// "mock response" text is returned. Every request received is recorded
/// for later assertion.
pub struct MockBackend {
    model_id: String,
    supports_system_instruction: bool,
    script: Mutex<VecDeque<Result<ModelTurn, LifeosError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockBackend {
    /// Create a mock backend with an empty script.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            supports_system_instruction: true,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Use the synthetic-prepend path instead of a native system instruction.
    pub fn without_system_instruction(mut self) -> Self {
        self.supports_system_instruction = false;
        self
    }

    /// Push a text reply onto the script.
    pub fn push_text(&self, text: impl Into<String>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(ModelTurn::Text(text.into())));
    }

    /// Push a full turn (text or tool calls) onto the script.
    pub fn push_turn(&self, turn: ModelTurn) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(turn));
    }

    /// Push an error onto the script.
    pub fn push_error(&self, error: LifeosError) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Push a quota-exhausted error for this backend's own model id.
    pub fn push_quota_exhausted(&self) {
        self.push_error(LifeosError::QuotaExhausted {
            model: self.model_id.clone(),
        });
    }

    /// All requests this backend has received, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn supports_system_instruction(&self) -> bool {
        self.supports_system_instruction
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<ModelTurn, LifeosError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(ModelTurn::Text("mock response".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_script_empty() {
        let backend = MockBackend::new("mock-model");
        let turn = backend.generate(&GenerationRequest::default()).await.unwrap();
        assert_eq!(turn, ModelTurn::Text("mock response".into()));
    }

    #[tokio::test]
    async fn scripted_outcomes_replay_in_order() {
        let backend = MockBackend::new("mock-model");
        backend.push_text("first");
        backend.push_quota_exhausted();
        backend.push_text("third");

        assert_eq!(
            backend.generate(&GenerationRequest::default()).await.unwrap(),
            ModelTurn::Text("first".into())
        );
        let err = backend.generate(&GenerationRequest::default()).await.unwrap_err();
        assert!(matches!(err, LifeosError::QuotaExhausted { .. }));
        assert_eq!(
            backend.generate(&GenerationRequest::default()).await.unwrap(),
            ModelTurn::Text("third".into())
        );
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let backend = MockBackend::new("mock-model");
        let request = GenerationRequest {
            system_instruction: Some("be brief".into()),
            ..Default::default()
        };
        backend.generate(&request).await.unwrap();

        let seen = backend.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system_instruction.as_deref(), Some("be brief"));
    }
}

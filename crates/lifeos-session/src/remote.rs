// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote session store over a document collection.
//!
//! One document per conversation, replaced whole on every append. The
//! read-modify-write is not locked against concurrent writers; see
//! [`lifeos_core::SessionBackend::append_turn`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifeos_core::{ConversationTurn, LifeosError, SessionBackend};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::window;

#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    turns: Vec<ConversationTurn>,
    last_activity: DateTime<Utc>,
}

/// Session window store backed by a remote document collection.
pub struct RemoteSessionStore {
    client: reqwest::Client,
    base_url: String,
    max_turns: usize,
}

impl RemoteSessionStore {
    pub fn new(base_url: String, max_turns: usize) -> Result<Self, LifeosError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_turns,
        })
    }

    fn document_url(&self, conversation_id: &str) -> String {
        format!("{}/sessions/{}", self.base_url, conversation_id)
    }

    async fn fetch_turns(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationTurn>, LifeosError> {
        let response = self
            .client
            .get(self.document_url(conversation_id))
            .send()
            .await
            .map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;

        let status = response.status();
        debug!(status = %status, conversation_id, "session document fetched");
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LifeosError::Session {
                source: format!("session store returned {status}: {body}").into(),
            });
        }

        let document: SessionDocument =
            response.json().await.map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;
        Ok(document.turns)
    }
}

#[async_trait]
impl SessionBackend for RemoteSessionStore {
    async fn append_turn(
        &self,
        conversation_id: &str,
        user_text: &str,
        agent_text: &str,
    ) -> Result<(), LifeosError> {
        let mut turns = self.fetch_turns(conversation_id).await?;
        window::push_turn(
            &mut turns,
            ConversationTurn {
                user_text: user_text.to_string(),
                agent_text: agent_text.to_string(),
            },
            self.max_turns,
        );

        let document = SessionDocument {
            turns,
            last_activity: Utc::now(),
        };
        let response = self
            .client
            .put(self.document_url(conversation_id))
            .json(&document)
            .send()
            .await
            .map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LifeosError::Session {
                source: format!("session store returned {status}: {body}").into(),
            });
        }
        Ok(())
    }

    async fn get_context(&self, conversation_id: &str) -> Result<String, LifeosError> {
        let turns = self.fetch_turns(conversation_id).await?;
        Ok(window::render_context(&turns))
    }
}

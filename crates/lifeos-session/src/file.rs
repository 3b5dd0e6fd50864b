// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed session store.
//!
//! One JSON document maps conversation ids to their turn windows. Writes
//! go to a temp file first and replace the original atomically, so a
//! crash mid-write never leaves a half-written store behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lifeos_core::{ConversationTurn, LifeosError, SessionBackend};
use tracing::{debug, warn};

use crate::window;

type SessionMap = HashMap<String, Vec<ConversationTurn>>;

/// Durable session window store over a local JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    max_turns: usize,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>, max_turns: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_turns,
        }
    }

    /// Loads the session map. A missing or unreadable file degrades to an
    /// empty map so one corrupt write does not brick the agent.
    async fn load(&self) -> SessionMap {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SessionMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read session file, starting empty");
                return SessionMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file is corrupt, starting empty");
                SessionMap::new()
            }
        }
    }

    async fn save(&self, map: &SessionMap) -> Result<(), LifeosError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LifeosError::Session {
                    source: Box::new(e),
                })?;
        }

        let body = serde_json::to_vec_pretty(map).map_err(|e| LifeosError::Session {
            source: Box::new(e),
        })?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &body)
            .await
            .map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| LifeosError::Session {
                source: Box::new(e),
            })?;
        debug!(path = %self.path.display(), "session file replaced atomically");
        Ok(())
    }
}

#[async_trait]
impl SessionBackend for FileSessionStore {
    async fn append_turn(
        &self,
        conversation_id: &str,
        user_text: &str,
        agent_text: &str,
    ) -> Result<(), LifeosError> {
        let mut map = self.load().await;
        let turns = map.entry(conversation_id.to_string()).or_default();
        window::push_turn(
            turns,
            ConversationTurn {
                user_text: user_text.to_string(),
                agent_text: agent_text.to_string(),
            },
            self.max_turns,
        );
        self.save(&map).await
    }

    async fn get_context(&self, conversation_id: &str) -> Result<String, LifeosError> {
        let map = self.load().await;
        let turns = map.get(conversation_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(window::render_context(turns))
    }
}

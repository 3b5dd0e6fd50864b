// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local fallback user table.
//!
//! A JSON file mapping external ids to profile records, consulted when the
//! remote profile store is unreachable or has no record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lifeos_core::{LifeosError, ProfileSource, UserProfile, UserRole};
use serde::Deserialize;
use tracing::debug;

/// One entry in the local user table. The key of the enclosing map is the
/// external id, so the record does not repeat it.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalUserRecord {
    pub display_name: String,
    /// Kept as a raw string so one unknown role cannot fail
    /// deserialization of the whole table. Parsed per lookup, degrading
    /// to guest.
    pub role: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// File-backed user table implementing [`ProfileSource`].
///
/// The file is re-read on every lookup so edits take effect without a
/// restart. A missing file is treated as an empty table, not an error.
#[derive(Debug, Clone)]
pub struct LocalUserTable {
    path: PathBuf,
}

impl LocalUserTable {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_table(&self) -> Result<HashMap<String, LocalUserRecord>, LifeosError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "local user table not found, treating as empty");
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(LifeosError::Identity {
                    message: format!("failed to read user table {}", self.path.display()),
                    source: Some(Box::new(e)),
                });
            }
        };
        serde_json::from_str(&raw).map_err(|e| LifeosError::Identity {
            message: format!("user table {} is not valid JSON", self.path.display()),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl ProfileSource for LocalUserTable {
    async fn lookup(&self, external_id: &str) -> Result<Option<UserProfile>, LifeosError> {
        let table = self.read_table()?;
        Ok(table.get(external_id).map(|record| UserProfile {
            external_id: external_id.to_string(),
            display_name: record.display_name.clone(),
            role: UserRole::parse_lossy(&record.role),
            description: record.description.clone(),
        }))
    }
}

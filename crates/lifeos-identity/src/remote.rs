// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote profile store.

use std::time::Duration;

use async_trait::async_trait;
use lifeos_core::{LifeosError, ProfileSource, UserProfile, UserRole};
use serde::Deserialize;
use tracing::debug;

/// Wire shape of a profile record as served by the store.
#[derive(Debug, Deserialize)]
struct RemoteProfileRecord {
    display_name: String,
    /// Raw role string, parsed with a guest fallback so an unknown role
    /// yields a degraded profile instead of a parse error.
    role: String,
    #[serde(default)]
    description: Option<String>,
}

/// Profile store client implementing [`ProfileSource`] over
/// `GET {base}/users/{external_id}`.
///
/// A 404 means the store has no record for the id. Every other failure is
/// an error the resolver downgrades to a fallthrough.
#[derive(Debug, Clone)]
pub struct RemoteProfileStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteProfileStore {
    pub fn new(base_url: String) -> Result<Self, LifeosError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LifeosError::Identity {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ProfileSource for RemoteProfileStore {
    async fn lookup(&self, external_id: &str) -> Result<Option<UserProfile>, LifeosError> {
        let url = format!("{}/users/{}", self.base_url, external_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LifeosError::Identity {
                message: format!("profile store request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, external_id, "profile store response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LifeosError::Identity {
                message: format!("profile store returned {status}: {body}"),
                source: None,
            });
        }

        let record: RemoteProfileRecord =
            response.json().await.map_err(|e| LifeosError::Identity {
                message: format!("failed to parse profile record: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Some(UserProfile {
            external_id: external_id.to_string(),
            display_name: record.display_name,
            role: UserRole::parse_lossy(&record.role),
            description: record.description,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lookup_parses_profile_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Suman",
                "role": "admin",
                "description": "El jefe"
            })))
            .mount(&server)
            .await;

        let store = RemoteProfileStore::new(server.uri()).unwrap();
        let profile = store.lookup("42").await.unwrap().unwrap();
        assert_eq!(profile.display_name, "Suman");
        assert_eq!(profile.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn unknown_role_in_record_degrades_to_guest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Intruso",
                "role": "superuser"
            })))
            .mount(&server)
            .await;

        let store = RemoteProfileStore::new(server.uri()).unwrap();
        let profile = store.lookup("7").await.unwrap().unwrap();
        assert_eq!(profile.role, UserRole::Guest);
        assert_eq!(profile.display_name, "Intruso");
    }

    #[tokio::test]
    async fn lookup_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = RemoteProfileStore::new(server.uri()).unwrap();
        assert!(store.lookup("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = RemoteProfileStore::new(server.uri()).unwrap();
        let err = store.lookup("42").await.unwrap_err();
        assert!(err.to_string().contains("500"), "got: {err}");
    }
}

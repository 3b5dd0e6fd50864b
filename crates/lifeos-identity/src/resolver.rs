// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity resolver chaining remote store, local table, and guest fallback.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lifeos_core::{ProfileSource, UserProfile};
use tracing::{debug, warn};

/// Resolves an external id to a [`UserProfile`].
///
/// Resolution order: in-process cache, remote profile store (if configured),
/// local user table, guest fallback. Resolution never fails: a store error
/// is logged and treated as "no record", so an outage degrades every
/// unknown caller to guest instead of breaking the turn.
pub struct IdentityResolver {
    remote: Option<Arc<dyn ProfileSource>>,
    local: Arc<dyn ProfileSource>,
    cache: RwLock<HashMap<String, UserProfile>>,
}

impl IdentityResolver {
    pub fn new(remote: Option<Arc<dyn ProfileSource>>, local: Arc<dyn ProfileSource>) -> Self {
        Self {
            remote,
            local,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the profile for an external id.
    pub async fn resolve(&self, external_id: &str) -> UserProfile {
        if let Some(profile) = self.cached(external_id) {
            debug!(external_id, "profile served from cache");
            return profile;
        }

        if let Some(remote) = &self.remote {
            match remote.lookup(external_id).await {
                Ok(Some(profile)) => {
                    debug!(external_id, role = %profile.role, "profile resolved remotely");
                    self.store(profile.clone());
                    return profile;
                }
                Ok(None) => {
                    debug!(external_id, "remote store has no record, trying local table");
                }
                Err(e) => {
                    warn!(external_id, error = %e, "remote profile lookup failed, trying local table");
                }
            }
        }

        match self.local.lookup(external_id).await {
            Ok(Some(profile)) => {
                debug!(external_id, role = %profile.role, "profile resolved from local table");
                self.store(profile.clone());
                return profile;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(external_id, error = %e, "local table lookup failed");
            }
        }

        debug!(external_id, "no profile found, resolving as guest");
        UserProfile::guest(external_id)
    }

    /// Drops one cached profile so the next resolve re-queries the stores.
    pub fn invalidate(&self, external_id: &str) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(external_id);
    }

    /// Drops the whole cache.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn cached(&self, external_id: &str) -> Option<UserProfile> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(external_id)
            .cloned()
    }

    fn store(&self, profile: UserProfile) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(profile.external_id.clone(), profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lifeos_core::{LifeosError, UserRole};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted profile source counting how many times it was asked.
    struct FakeSource {
        result: Result<Option<UserProfile>, String>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn some(profile: UserProfile) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(Some(profile)),
                calls: AtomicUsize::new(0),
            })
        }

        fn none() -> Arc<Self> {
            Arc::new(Self {
                result: Ok(None),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        async fn lookup(&self, _external_id: &str) -> Result<Option<UserProfile>, LifeosError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(opt) => Ok(opt.clone()),
                Err(message) => Err(LifeosError::Identity {
                    message: message.clone(),
                    source: None,
                }),
            }
        }
    }

    fn admin(name: &str) -> UserProfile {
        UserProfile {
            external_id: "42".into(),
            display_name: name.into(),
            role: UserRole::Admin,
            description: None,
        }
    }

    #[tokio::test]
    async fn remote_hit_wins_over_local() {
        let remote = FakeSource::some(admin("RemoteSuman"));
        let local = FakeSource::some(admin("LocalSuman"));
        let resolver = IdentityResolver::new(Some(remote), local.clone());

        let profile = resolver.resolve("42").await;
        assert_eq!(profile.display_name, "RemoteSuman");
        assert_eq!(local.calls(), 0);
    }

    #[tokio::test]
    async fn remote_failure_falls_through_to_local() {
        let remote = FakeSource::failing("store down");
        let local = FakeSource::some(admin("LocalSuman"));
        let resolver = IdentityResolver::new(Some(remote), local);

        let profile = resolver.resolve("42").await;
        assert_eq!(profile.display_name, "LocalSuman");
        assert_eq!(profile.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn unknown_everywhere_resolves_as_guest() {
        let resolver = IdentityResolver::new(Some(FakeSource::none()), FakeSource::none());
        let profile = resolver.resolve("777").await;
        assert_eq!(profile.display_name, "Stranger");
        assert_eq!(profile.role, UserRole::Guest);
        assert_eq!(profile.external_id, "777");
    }

    #[tokio::test]
    async fn second_resolve_is_served_from_cache() {
        let remote = FakeSource::some(admin("Suman"));
        let resolver = IdentityResolver::new(Some(remote.clone()), FakeSource::none());

        resolver.resolve("42").await;
        resolver.resolve("42").await;
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn guest_results_are_not_cached() {
        let local = FakeSource::none();
        let resolver = IdentityResolver::new(None, local.clone());

        resolver.resolve("777").await;
        resolver.resolve("777").await;
        // A later registration must become visible without an invalidate.
        assert_eq!(local.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_lookup() {
        let remote = FakeSource::some(admin("Suman"));
        let resolver = IdentityResolver::new(Some(remote.clone()), FakeSource::none());

        resolver.resolve("42").await;
        resolver.invalidate("42");
        resolver.resolve("42").await;
        assert_eq!(remote.calls(), 2);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::Authorizer;
use crate::config::AuthSettings;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub authorizer: Arc<Authorizer>,
    pub settings: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(store: InMemoryStore, authorizer: Authorizer, settings: AuthSettings) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            authorizer: Arc::new(authorizer),
            settings: Arc::new(settings),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Empty store, authorizer backed by the mock issuer at `server`.
    pub(crate) fn for_tests(server: &wiremock::MockServer) -> Self {
        use crate::auth::test_support::{authorizer_for, TEST_AUDIENCE, TEST_DOMAIN};
        use crate::auth::jwks::{
            DEFAULT_CACHE_TTL, DEFAULT_FETCH_TIMEOUT, DEFAULT_MIN_REFRESH_INTERVAL,
        };

        let settings = AuthSettings {
            domain: TEST_DOMAIN.to_string(),
            audience: TEST_AUDIENCE.to_string(),
            algorithm: jsonwebtoken::Algorithm::RS256,
            client_id: None,
            callback_url: None,
            jwks_cache_ttl: DEFAULT_CACHE_TTL,
            jwks_fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            jwks_min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        };
        Self::new(InMemoryStore::new(), authorizer_for(server), settings)
    }
}

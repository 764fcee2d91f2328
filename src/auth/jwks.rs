// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Security
//!
//! - The key set is fetched from one configured issuer URL only
//! - Fetches are bounded by the client timeout and fail fast
//! - A cached set is swapped in whole; readers never see a partial set
//!
//! ## Key rotation
//!
//! When a token names a `kid` the cached set does not contain, the set is
//! fetched again, once. The new set replaces the cached one only when the
//! fetch succeeds, so a failed refetch leaves the previous keys in service.
//! Forced refetches are spaced by a minimum interval; a miss inside that
//! window, or against a freshly fetched set, is final.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::error::AuthError;

/// Default JWKS cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default JWKS fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default minimum age of the cached set before an unknown `kid` forces a refetch.
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Key set document as published by the issuer.
#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<JwkEntry>,
}

/// One entry of the published key set. Fields are optional so that a single
/// unusual entry does not make the whole document unreadable.
#[derive(Debug, Deserialize)]
struct JwkEntry {
    kty: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default, rename = "use")]
    key_use: Option<String>,
    #[serde(default)]
    alg: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// Normalized RSA public key record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    pub kty: String,
    pub kid: String,
    pub key_use: Option<String>,
    /// Algorithm the issuer bound this key to, if it declared one
    pub alg: Option<String>,
    /// Modulus, base64url
    pub n: String,
    /// Exponent, base64url
    pub e: String,
}

/// Keys indexed by `kid`.
#[derive(Debug, Default)]
pub struct KeySet {
    keys: HashMap<String, RsaKey>,
}

impl KeySet {
    fn from_document(document: JwksDocument) -> Self {
        let mut keys = HashMap::new();

        for entry in document.keys {
            let JwkEntry {
                kty,
                kid,
                key_use,
                alg,
                n,
                e,
            } = entry;

            let (Some(kid), Some(n), Some(e)) = (kid, n, e) else {
                warn!(kty = %kty, "skipping JWKS entry without kid or RSA components");
                continue;
            };
            if kty != "RSA" {
                warn!(kty = %kty, kid = %kid, "skipping non-RSA JWKS entry");
                continue;
            }
            if key_use.as_deref().is_some_and(|u| u != "sig") {
                warn!(kid = %kid, key_use = ?key_use, "skipping JWKS entry not meant for signatures");
                continue;
            }

            keys.insert(
                kid.clone(),
                RsaKey {
                    kty,
                    kid,
                    key_use,
                    alg,
                    n,
                    e,
                },
            );
        }

        Self { keys }
    }

    pub fn get(&self, kid: &str) -> Option<&RsaKey> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// JWKS cache entry.
struct CacheEntry {
    keys: Arc<KeySet>,
    fetched_at: Instant,
}

/// Process-wide key set cache.
///
/// Owned by whoever builds the [`KeyResolver`] and shared by `Arc`, so
/// several resolvers (or tests) can observe and invalidate the same cache.
pub struct KeySetCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl KeySetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// The cached set, if one is held and younger than the TTL.
    pub async fn get(&self) -> Option<Arc<KeySet>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.keys))
    }

    /// Time since the held set was fetched, expired or not.
    pub async fn age(&self) -> Option<Duration> {
        self.entry
            .read()
            .await
            .as_ref()
            .map(|e| e.fetched_at.elapsed())
    }

    pub async fn store(&self, keys: Arc<KeySet>) {
        let mut entry = self.entry.write().await;
        *entry = Some(CacheEntry {
            keys,
            fetched_at: Instant::now(),
        });
    }

    /// Drop the held set; the next lookup fetches from the issuer.
    pub async fn invalidate(&self) {
        self.entry.write().await.take();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for KeySetCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Resolves a token's `kid` to the issuer's public key.
#[derive(Clone)]
pub struct KeyResolver {
    /// JWKS endpoint (`https://<issuer-domain>/.well-known/jwks.json`)
    jwks_url: String,
    cache: Arc<KeySetCache>,
    client: reqwest::Client,
    /// Minimum cached-set age before an unknown `kid` triggers a refetch
    min_refresh_interval: Duration,
}

impl KeyResolver {
    /// Create a resolver for `jwks_url` backed by `cache`.
    ///
    /// Every fetch is bounded by `timeout`.
    pub fn new(
        jwks_url: impl Into<String>,
        cache: Arc<KeySetCache>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::KeySetUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            jwks_url: jwks_url.into(),
            cache,
            client,
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        })
    }

    /// Space forced refetches on unknown `kid`s by at least `interval`.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    pub fn cache(&self) -> &Arc<KeySetCache> {
        &self.cache
    }

    /// Find the key whose `kid` matches.
    pub async fn resolve(&self, kid: &str) -> Result<RsaKey, AuthError> {
        if let Some(keys) = self.cache.get().await {
            if let Some(key) = keys.get(kid) {
                return Ok(key.clone());
            }
            let recently_fetched = self
                .cache
                .age()
                .await
                .is_some_and(|age| age < self.min_refresh_interval);
            if recently_fetched {
                debug!(kid, "kid not in recently fetched key set");
                return Err(AuthError::NoMatchingKey);
            }
            debug!(kid, "kid not in cached key set, refreshing once");
        }

        let keys = self.refresh().await?;
        keys.get(kid).cloned().ok_or_else(|| {
            debug!(kid, "kid not in freshly fetched key set");
            AuthError::NoMatchingKey
        })
    }

    /// Fetch the key set and swap it into the cache.
    ///
    /// On failure the cache is left untouched.
    pub async fn refresh(&self) -> Result<Arc<KeySet>, AuthError> {
        let keys = Arc::new(self.fetch().await?);
        self.cache.store(Arc::clone(&keys)).await;
        Ok(keys)
    }

    /// Check if a key set is currently cached and valid.
    pub async fn is_cached(&self) -> bool {
        self.cache.get().await.is_some()
    }

    /// Fetch the key set from the issuer.
    async fn fetch(&self) -> Result<KeySet, AuthError> {
        debug!(url = %self.jwks_url, "fetching JWKS");

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| fetch_failed(&self.jwks_url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_failed(
                &self.jwks_url,
                format!("HTTP {} from JWKS endpoint", response.status()),
            ));
        }

        let document: JwksDocument = response
            .json()
            .await
            .map_err(|e| fetch_failed(&self.jwks_url, e.to_string()))?;

        let keys = KeySet::from_document(document);
        if keys.is_empty() {
            warn!(url = %self.jwks_url, "JWKS document holds no usable signing keys");
        }
        debug!(count = keys.len(), "cached JWKS keys");
        Ok(keys)
    }
}

fn fetch_failed(url: &str, detail: String) -> AuthError {
    warn!(url, error = %detail, "JWKS fetch failed");
    AuthError::KeySetUnavailable(detail)
}

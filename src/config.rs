// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Token issuer domain, without scheme | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `AUTH_ALGORITHM` | Accepted signing algorithm (`RS256`, `RS384`, `RS512`) | `RS256` |
//! | `AUTH0_CLIENT_ID` | Client ID used by `/auth/url` | Optional |
//! | `AUTH0_CALLBACK_URL` | Redirect URI used by `/auth/url` | Optional |
//! | `JWKS_CACHE_TTL_SECS` | How long a fetched key set is reused | `300` |
//! | `JWKS_FETCH_TIMEOUT_SECS` | Upper bound on one JWKS fetch | `10` |
//! | `JWKS_MIN_REFRESH_SECS` | Minimum key set age before an unknown `kid` refetches | `10` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

use crate::auth::{Authorizer, AuthError, KeyResolver, KeySetCache, TokenVerifier};

pub const AUTH_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const AUTH_ALGORITHM_ENV: &str = "AUTH_ALGORITHM";
pub const AUTH_CLIENT_ID_ENV: &str = "AUTH0_CLIENT_ID";
pub const AUTH_CALLBACK_URL_ENV: &str = "AUTH0_CALLBACK_URL";
pub const JWKS_CACHE_TTL_ENV: &str = "JWKS_CACHE_TTL_SECS";
pub const JWKS_FETCH_TIMEOUT_ENV: &str = "JWKS_FETCH_TIMEOUT_SECS";
pub const JWKS_MIN_REFRESH_ENV: &str = "JWKS_MIN_REFRESH_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_JWKS_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_JWKS_MIN_REFRESH_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.into(),
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seconds<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| invalid(name, e.to_string())),
    }
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Issuer domain, e.g. `tenant.eu.auth0.com`
    pub domain: String,
    pub audience: String,
    pub algorithm: Algorithm,
    pub client_id: Option<String>,
    pub callback_url: Option<String>,
    pub jwks_cache_ttl: Duration,
    pub jwks_fetch_timeout: Duration,
    pub jwks_min_refresh_interval: Duration,
}

impl AuthSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = required(&lookup, AUTH_DOMAIN_ENV)?;
        if domain.contains('/') {
            return Err(invalid(AUTH_DOMAIN_ENV, "expected a bare host name"));
        }
        let issuer = Url::parse(&format!("https://{domain}/"))
            .map_err(|e| invalid(AUTH_DOMAIN_ENV, e.to_string()))?;
        if issuer.host_str().is_none() {
            return Err(invalid(AUTH_DOMAIN_ENV, "expected a bare host name"));
        }

        let audience = required(&lookup, API_AUDIENCE_ENV)?;

        let algorithm = match optional(&lookup, AUTH_ALGORITHM_ENV) {
            None => Algorithm::RS256,
            Some(raw) => parse_algorithm(&raw)?,
        };

        Ok(Self {
            domain,
            audience,
            algorithm,
            client_id: optional(&lookup, AUTH_CLIENT_ID_ENV),
            callback_url: optional(&lookup, AUTH_CALLBACK_URL_ENV),
            jwks_cache_ttl: seconds(&lookup, JWKS_CACHE_TTL_ENV, DEFAULT_JWKS_CACHE_TTL_SECS)?,
            jwks_fetch_timeout: seconds(
                &lookup,
                JWKS_FETCH_TIMEOUT_ENV,
                DEFAULT_JWKS_FETCH_TIMEOUT_SECS,
            )?,
            jwks_min_refresh_interval: seconds(
                &lookup,
                JWKS_MIN_REFRESH_ENV,
                DEFAULT_JWKS_MIN_REFRESH_SECS,
            )?,
        })
    }

    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }

    /// Hosted login page for the implicit flow, when a client is configured.
    pub fn login_url(&self) -> Option<String> {
        let client_id = self.client_id.as_deref()?;
        let callback_url = self.callback_url.as_deref()?;

        let mut url = Url::parse(&format!("https://{}/authorize", self.domain)).ok()?;
        url.query_pairs_mut()
            .append_pair("audience", &self.audience)
            .append_pair("response_type", "token")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", callback_url);
        Some(url.into())
    }

    /// Wire the key cache, resolver and verifier for these settings.
    pub fn authorizer(&self) -> Result<Authorizer, AuthError> {
        let cache = Arc::new(KeySetCache::new(self.jwks_cache_ttl));
        let resolver = KeyResolver::new(self.jwks_url(), cache, self.jwks_fetch_timeout)?
            .with_min_refresh_interval(self.jwks_min_refresh_interval);
        let verifier = TokenVerifier::new(resolver, self.algorithm);
        Ok(Authorizer::new(verifier, &self.audience, self.issuer()))
    }
}

fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.parse::<Algorithm>() {
        Ok(alg @ (Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512)) => Ok(alg),
        _ => Err(invalid(
            AUTH_ALGORITHM_ENV,
            format!("{raw} is not one of RS256, RS384, RS512"),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Listener and logging settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = optional(&lookup, HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match optional(&lookup, PORT_ENV) {
            None => 8080,
            Some(raw) => raw.parse().map_err(|_| invalid(PORT_ENV, raw))?,
        };
        let log_format = match optional(&lookup, LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid(LOG_FORMAT_ENV, other)),
        };

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            (AUTH_DOMAIN_ENV, "tenant.eu.auth0.com"),
            (API_AUDIENCE_ENV, "casting-agency"),
        ]
    }

    #[test]
    fn defaults_apply() {
        let settings = AuthSettings::from_lookup(lookup(&minimal())).unwrap();
        assert_eq!(settings.algorithm, Algorithm::RS256);
        assert_eq!(settings.jwks_cache_ttl, Duration::from_secs(300));
        assert_eq!(settings.jwks_fetch_timeout, Duration::from_secs(10));
        assert_eq!(settings.jwks_min_refresh_interval, Duration::from_secs(10));
        assert_eq!(settings.issuer(), "https://tenant.eu.auth0.com/");
        assert_eq!(
            settings.jwks_url(),
            "https://tenant.eu.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn missing_domain_is_reported() {
        let err = AuthSettings::from_lookup(lookup(&[(API_AUDIENCE_ENV, "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(AUTH_DOMAIN_ENV)));
    }

    #[test]
    fn domain_with_scheme_is_rejected() {
        let mut pairs = minimal();
        pairs[0] = (AUTH_DOMAIN_ENV, "https://tenant.eu.auth0.com");
        assert!(AuthSettings::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn symmetric_algorithm_is_refused() {
        let mut pairs = minimal();
        pairs.push((AUTH_ALGORITHM_ENV, "HS256"));
        let err = AuthSettings::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: AUTH_ALGORITHM_ENV,
                ..
            }
        ));

        let mut pairs = minimal();
        pairs.push((AUTH_ALGORITHM_ENV, "RS512"));
        let settings = AuthSettings::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(settings.algorithm, Algorithm::RS512);
    }

    #[test]
    fn bad_ttl_is_rejected() {
        let mut pairs = minimal();
        pairs.push((JWKS_CACHE_TTL_ENV, "five minutes"));
        assert!(AuthSettings::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn login_url_needs_client_and_callback() {
        let settings = AuthSettings::from_lookup(lookup(&minimal())).unwrap();
        assert_eq!(settings.login_url(), None);

        let mut pairs = minimal();
        pairs.push((AUTH_CLIENT_ID_ENV, "abc123"));
        pairs.push((AUTH_CALLBACK_URL_ENV, "http://127.0.0.1:8080"));
        let settings = AuthSettings::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(
            settings.login_url().unwrap(),
            "https://tenant.eu.auth0.com/authorize?audience=casting-agency&response_type=token\
             &client_id=abc123&redirect_uri=http%3A%2F%2F127.0.0.1%3A8080"
        );
    }

    #[test]
    fn authorizer_uses_issuer_and_audience() {
        let settings = AuthSettings::from_lookup(lookup(&minimal())).unwrap();
        let authorizer = settings.authorizer().unwrap();
        assert_eq!(authorizer.issuer(), "https://tenant.eu.auth0.com/");
        assert_eq!(authorizer.audience(), "casting-agency");
        assert_eq!(
            authorizer.verifier().resolver().jwks_url(),
            "https://tenant.eu.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn server_settings_defaults_and_overrides() {
        let defaults = ServerSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(defaults.bind_address(), "0.0.0.0:8080");
        assert_eq!(defaults.log_format, LogFormat::Pretty);

        let custom = ServerSettings::from_lookup(lookup(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();
        assert_eq!(custom.bind_address(), "127.0.0.1:9000");
        assert_eq!(custom.log_format, LogFormat::Json);

        assert!(ServerSettings::from_lookup(lookup(&[(PORT_ENV, "http")])).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT signature and claims verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::debug;

use super::jwks::{KeyResolver, RsaKey};
use super::{AuthError, DecodedClaims};

/// Claims every accepted token must carry.
const REQUIRED_CLAIMS: [&str; 3] = ["exp", "aud", "iss"];

/// Verifies RS-signed tokens against keys from a [`KeyResolver`].
///
/// Exactly one algorithm is accepted. A token whose header names any other
/// algorithm is rejected before a key is looked up.
#[derive(Clone)]
pub struct TokenVerifier {
    resolver: KeyResolver,
    algorithm: Algorithm,
    /// Clock skew tolerance in seconds
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(resolver: KeyResolver, algorithm: Algorithm) -> Self {
        Self {
            resolver,
            algorithm,
            leeway: 0,
        }
    }

    /// Accept tokens up to `seconds` past their `exp`.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    /// Verify `token` and return its claims.
    ///
    /// `issuer` must be the full issuer URL, e.g. `https://tenant.example.com/`.
    pub async fn verify(
        &self,
        token: &str,
        audience: &str,
        issuer: &str,
    ) -> Result<DecodedClaims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "token header unreadable");
            AuthError::MalformedToken
        })?;

        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        if header.alg != self.algorithm {
            debug!(alg = ?header.alg, expected = ?self.algorithm, "token algorithm rejected");
            return Err(AuthError::MalformedToken);
        }

        let key = self.resolver.resolve(&kid).await?;
        let decoding_key = self.decoding_key(&key)?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway;
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&REQUIRED_CLAIMS);

        let token_data = decode::<DecodedClaims>(token, &decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?;

        Ok(token_data.claims)
    }

    /// Build the decoding key, refusing JWKs bound to another algorithm.
    fn decoding_key(&self, key: &RsaKey) -> Result<DecodingKey, AuthError> {
        if let Some(alg) = key.alg.as_deref() {
            if alg.parse::<Algorithm>().ok() != Some(self.algorithm) {
                debug!(kid = %key.kid, alg, "JWK declares a different algorithm");
                return Err(AuthError::MalformedToken);
            }
        }

        DecodingKey::from_rsa_components(&key.n, &key.e).map_err(|e| {
            debug!(kid = %key.kid, error = %e, "JWK has unusable RSA components");
            AuthError::MalformedToken
        })
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    let err = match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        _ => AuthError::MalformedToken,
    };
    debug!(kind = ?kind, code = err.error_code(), "token rejected");
    err
}

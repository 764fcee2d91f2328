// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified JWT claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim set of a token that passed verification.
///
/// Only [`TokenVerifier`](super::TokenVerifier) produces these in production
/// code. The full payload is kept, so handlers see exactly what the issuer
/// signed; typed accessors cover the claims this service reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedClaims(Map<String, Value>);

impl DecodedClaims {
    /// Raw access to a single claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Granted permissions.
    ///
    /// `None` when the claim is absent or is not an array. Non-string
    /// entries inside the array are ignored.
    pub fn permissions(&self) -> Option<Vec<&str>> {
        let Value::Array(entries) = self.get("permissions")? else {
            return None;
        };
        Some(entries.iter().filter_map(Value::as_str).collect())
    }

    /// Subject (`sub`), the caller's identity at the issuer.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Issuer (`iss`).
    pub fn issuer(&self) -> Option<&str> {
        self.get("iss").and_then(Value::as_str)
    }

    /// Expiry (`exp`) as a Unix timestamp.
    pub fn expires_at(&self) -> Option<i64> {
        self.get("exp").and_then(Value::as_i64)
    }
}

impl From<Map<String, Value>> for DecodedClaims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

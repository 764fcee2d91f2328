// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! JWT authentication and permission checks for the casting agency API.
//!
//! ## Auth Flow
//!
//! 1. The client logs in with the identity provider and receives an
//!    access token carrying a `permissions` claim
//! 2. The client sends `Authorization: Bearer <token>`
//! 3. The server:
//!    - Fetches the issuer's JWKS via HTTPS (cached, see [`jwks`])
//!    - Verifies signature, expiry, issuer and audience ([`verifier`])
//!    - Checks the permission the route requires ([`permissions`])
//!    - Hands the verified claims to the handler ([`middleware`])
//!
//! ## Security
//!
//! - Only the configured RS algorithm is accepted
//! - Every route except health, docs and the login URL is guarded
//! - Failures carry a specific code and a 400, 401 or 403 status

pub mod claims;
pub mod error;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::DecodedClaims;
pub use error::AuthError;
pub use jwks::{KeyResolver, KeySet, KeySetCache, RsaKey};
pub use middleware::{bearer_token, guard, require_permission, Authorizer, PermissionGuard};
pub use permissions::{check_permission, scopes};
pub use verifier::TokenVerifier;

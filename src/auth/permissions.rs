// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission checks for verified claims.

use super::{AuthError, DecodedClaims};

/// Permission scopes required by the API's operations.
pub mod scopes {
    pub const READ_ACTORS: &str = "read:actors";
    pub const CREATE_ACTORS: &str = "create:actors";
    pub const EDIT_ACTORS: &str = "edit:actors";
    pub const DELETE_ACTORS: &str = "delete:actors";
    pub const READ_MOVIES: &str = "read:movies";
    pub const CREATE_MOVIES: &str = "create:movies";
    pub const EDIT_MOVIES: &str = "edit:movies";
    pub const DELETE_MOVIES: &str = "delete:movies";
}

/// Check that `claims` grant `required`.
///
/// An empty `required` marks an unrestricted operation and passes without
/// looking at the claims. A token without a `permissions` claim is a
/// malformed grant (400), which callers must be able to tell apart from a
/// grant that simply lacks the scope (403).
pub fn check_permission(required: &str, claims: &DecodedClaims) -> Result<(), AuthError> {
    if required.is_empty() {
        return Ok(());
    }

    let granted = claims.permissions().ok_or(AuthError::PermissionsMissing)?;

    if granted.iter().any(|p| *p == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}

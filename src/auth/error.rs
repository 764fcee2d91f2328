// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ErrorBody;

/// Authentication and authorization failure.
///
/// Every variant maps to one machine-readable code and a 400, 401 or 403
/// status. The `Display` text is the description shown to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header on the request
    #[error("Authorization header is expected.")]
    MissingAuthHeader,
    /// Header present but its scheme is not `Bearer`
    #[error("Authorization header must start with Bearer.")]
    MissingBearerScheme,
    /// `Bearer` with nothing after it
    #[error("Token not found.")]
    MissingToken,
    /// More than two whitespace-separated parts
    #[error("Authorization header must be bearer token.")]
    NotBearerToken,
    /// Token header has no `kid`
    #[error("Authorization malformed.")]
    MissingKeyId,
    /// No key in the issuer's key set carries the token's `kid`
    #[error("Unable to find the appropriate key.")]
    NoMatchingKey,
    /// The key set could not be fetched or parsed; the detail is logged only
    #[error("Unable to fetch the signing key set.")]
    KeySetUnavailable(String),
    /// Token `exp` is in the past
    #[error("Token expired.")]
    TokenExpired,
    /// Audience, issuer or another registered claim did not validate
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    /// Bad signature, wrong algorithm, or any other decode failure
    #[error("Unable to parse authentication token.")]
    MalformedToken,
    /// The verified claims carry no `permissions` entry
    #[error("Permissions not included in JWT.")]
    PermissionsMissing,
    /// The required permission is not granted
    #[error("Permission not found.")]
    PermissionDenied,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_header",
            AuthError::MissingBearerScheme
            | AuthError::MissingToken
            | AuthError::NotBearerToken
            | AuthError::MissingKeyId
            | AuthError::NoMatchingKey
            | AuthError::MalformedToken => "invalid_header",
            AuthError::KeySetUnavailable(_) => "jwks_unavailable",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims | AuthError::PermissionsMissing => "invalid_claims",
            AuthError::PermissionDenied => "unauthorised",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::MissingBearerScheme
            | AuthError::MissingToken
            | AuthError::NotBearerToken
            | AuthError::MissingKeyId
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => StatusCode::UNAUTHORIZED,
            AuthError::NoMatchingKey
            | AuthError::KeySetUnavailable(_)
            | AuthError::MalformedToken
            | AuthError::PermissionsMissing => StatusCode::BAD_REQUEST,
            AuthError::PermissionDenied => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ErrorBody::new(status, self.to_string()).into_response_with(status)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! [`Authorizer`] runs the whole gate for one request: bearer extraction,
//! token verification, permission check. Each step stops on its first
//! failure and the classified [`AuthError`] is returned unchanged.
//!
//! Routes are protected with [`guard`], which wraps a handler so that it only
//! runs once the caller holds the given permission:
//!
//! ```rust,ignore
//! let app = Router::new().route(
//!     "/actors",
//!     guard(&authorizer, scopes::READ_ACTORS, get(list_actors)),
//! );
//!
//! async fn list_actors(Extension(claims): Extension<DecodedClaims>) { ... }
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use tracing::{debug, error};

use super::permissions::check_permission;
use super::{AuthError, DecodedClaims, TokenVerifier};

/// Verifies callers against one audience and issuer.
pub struct Authorizer {
    verifier: TokenVerifier,
    /// Expected `aud`
    audience: String,
    /// Expected `iss`, e.g. `https://tenant.example.com/`
    issuer: String,
}

impl Authorizer {
    pub fn new(
        verifier: TokenVerifier,
        audience: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            audience: audience.into(),
            issuer: issuer.into(),
        }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Authorize a request for `required`.
    ///
    /// An empty `required` still demands a valid token but skips the
    /// permission check.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        required: &str,
    ) -> Result<DecodedClaims, AuthError> {
        let token = bearer_token(headers)?;
        self.authorize_token(token, required).await
    }

    /// Verify an already extracted token and check `required`.
    pub async fn authorize_token(
        &self,
        token: &str,
        required: &str,
    ) -> Result<DecodedClaims, AuthError> {
        let claims = self
            .verifier
            .verify(token, &self.audience, &self.issuer)
            .await?;
        check_permission(required, &claims)?;
        Ok(claims)
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::MissingBearerScheme)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => {
            Err(AuthError::MissingBearerScheme)
        }
        [] => Err(AuthError::MissingBearerScheme),
        [_] => Err(AuthError::MissingToken),
        [_, token] => Ok(*token),
        _ => Err(AuthError::NotBearerToken),
    }
}

/// Middleware state: who verifies, and what the route requires.
#[derive(Clone)]
pub struct PermissionGuard {
    authorizer: Arc<Authorizer>,
    permission: &'static str,
}

impl PermissionGuard {
    pub fn new(authorizer: Arc<Authorizer>, permission: &'static str) -> Self {
        Self {
            authorizer,
            permission,
        }
    }

    async fn authorize(&self, headers: &HeaderMap) -> Result<DecodedClaims, AuthError> {
        let token = bearer_token(headers)?.to_owned();
        let authorizer = Arc::clone(&self.authorizer);
        let permission = self.permission;

        isolated(async move { authorizer.authorize_token(&token, permission).await }).await
    }
}

/// Run `verification` on its own task. A panic fails only this request, as
/// `invalid_header`.
async fn isolated<F>(verification: F) -> Result<DecodedClaims, AuthError>
where
    F: Future<Output = Result<DecodedClaims, AuthError>> + Send + 'static,
{
    tokio::spawn(verification).await.unwrap_or_else(|e| {
        error!(error = %e, "token verification aborted");
        Err(AuthError::MalformedToken)
    })
}

/// Authentication middleware function.
///
/// On success the verified [`DecodedClaims`] are added to the request
/// extensions for the handler.
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match guard.authorize(request.headers()).await {
        Ok(claims) => {
            debug!(
                sub = ?claims.subject(),
                iss = ?claims.issuer(),
                exp = ?claims.expires_at(),
                permission = guard.permission,
                "request authorized"
            );
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            debug!(
                code = err.error_code(),
                permission = guard.permission,
                path = %request.uri().path(),
                "request rejected"
            );
            err.into_response()
        }
    }
}

/// Wrap `route` so it only runs for callers holding `permission`.
pub fn guard<S>(
    authorizer: &Arc<Authorizer>,
    permission: &'static str,
    route: MethodRouter<S>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let state = PermissionGuard::new(Arc::clone(authorizer), permission);
    route.route_layer(from_fn_with_state(state, require_permission))
}

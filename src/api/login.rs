// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{error::ApiError, models::LoginUrl, state::AppState};

/// Hosted login page that redirects back with an access token.
#[utoipa::path(
    get,
    path = "/auth/url",
    tag = "Auth",
    responses(
        (status = 200, body = LoginUrl),
        (status = 404, description = "Client id or callback URL not configured")
    )
)]
pub async fn login_url(State(state): State<AppState>) -> Result<Json<LoginUrl>, ApiError> {
    let url = state
        .settings
        .login_url()
        .ok_or_else(|| ApiError::not_found("login is not configured"))?;
    Ok(Json(LoginUrl { url }))
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use casting_agency_server::{
    api::router,
    config::{AuthSettings, ServerSettings},
    state::AppState,
    store::InMemoryStore,
    telemetry::init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = ServerSettings::from_env()?;
    init_tracing(server.log_format);

    let auth = AuthSettings::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;
    let authorizer = auth.authorizer()?;

    tracing::info!(
        issuer = %auth.issuer(),
        audience = %auth.audience,
        algorithm = ?auth.algorithm,
        jwks_url = %auth.jwks_url(),
        jwks_cache_ttl_secs = auth.jwks_cache_ttl.as_secs(),
        "auth configuration loaded"
    );
    if auth.login_url().is_none() {
        tracing::warn!("AUTH0_CLIENT_ID or AUTH0_CALLBACK_URL unset, /auth/url is disabled");
    }

    let state = AppState::new(InMemoryStore::new(), authorizer, auth);
    let app = router(state);

    let listener = TcpListener::bind(server.bind_address()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        "casting agency server listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request,
    },
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{guard, scopes},
    error,
    models::{
        Actor, ActorList, ActorUpdate, ActorUpdated, Created, Deleted, LoginUrl, Movie, MovieList,
        MovieUpdate, MovieUpdated, NewActor, NewMovie,
    },
    state::AppState,
};

pub mod actors;
pub mod health;
pub mod login;
pub mod movies;

pub fn router(state: AppState) -> Router {
    let auth = Arc::clone(&state.authorizer);

    let routes = Router::new()
        .route("/auth/url", get(login::login_url))
        .route(
            "/actors",
            guard(&auth, scopes::READ_ACTORS, get(actors::list_actors)).merge(guard(
                &auth,
                scopes::CREATE_ACTORS,
                post(actors::create_actor),
            )),
        )
        .route(
            "/actors/{actor_id}",
            guard(&auth, scopes::EDIT_ACTORS, patch(actors::update_actor)).merge(guard(
                &auth,
                scopes::DELETE_ACTORS,
                delete(actors::delete_actor),
            )),
        )
        .route(
            "/movies",
            guard(&auth, scopes::READ_MOVIES, get(movies::list_movies)).merge(guard(
                &auth,
                scopes::CREATE_MOVIES,
                post(movies::create_movie),
            )),
        )
        .route(
            "/movies/{movie_id}",
            guard(&auth, scopes::EDIT_MOVIES, patch(movies::update_movie)).merge(guard(
                &auth,
                scopes::DELETE_MOVIES,
                delete(movies::delete_movie),
            )),
        )
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .fallback(error::not_found)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors()),
        )
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login_url,
        actors::list_actors,
        actors::create_actor,
        actors::update_actor,
        actors::delete_actor,
        movies::list_movies,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Actor,
            NewActor,
            ActorUpdate,
            ActorList,
            ActorUpdated,
            Movie,
            NewMovie,
            MovieUpdate,
            MovieList,
            MovieUpdated,
            Created,
            Deleted,
            LoginUrl
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login helper"),
        (name = "Actors", description = "Actor management"),
        (name = "Movies", description = "Movie management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

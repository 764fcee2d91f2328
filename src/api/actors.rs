// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use tracing::info;

use crate::{
    auth::DecodedClaims,
    error::ApiError,
    models::{ActorList, ActorUpdate, ActorUpdated, Created, Deleted, NewActor, PageQuery},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/actors",
    params(PageQuery),
    tag = "Actors",
    security(("bearer_auth" = ["read:actors"])),
    responses(
        (status = 200, body = ActorList),
        (status = 404, description = "Requested page is empty")
    )
)]
pub async fn list_actors(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ActorList>, ApiError> {
    let Query(query) = query?;
    let store = state.store.read().await;
    let actors = store.list_actors(query.page())?;
    Ok(Json(ActorList {
        success: true,
        actors,
    }))
}

#[utoipa::path(
    post,
    path = "/actors",
    request_body = NewActor,
    tag = "Actors",
    security(("bearer_auth" = ["create:actors"])),
    responses(
        (status = 200, body = Created),
        (status = 400, description = "Body is not a JSON object"),
        (status = 422, description = "Name or age missing")
    )
)]
pub async fn create_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    body: Result<Json<NewActor>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(request) = body?;
    if request.is_empty() {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    }

    let actor = state.store.write().await.create_actor(request)?;
    info!(actor_id = actor.id, sub = ?claims.subject(), "actor created");
    Ok(Json(Created {
        success: true,
        created: actor.id,
    }))
}

#[utoipa::path(
    patch,
    path = "/actors/{actor_id}",
    params(("actor_id" = u64, Path, description = "Actor to edit")),
    request_body = ActorUpdate,
    tag = "Actors",
    security(("bearer_auth" = ["edit:actors"])),
    responses(
        (status = 200, body = ActorUpdated),
        (status = 404, description = "Unknown actor")
    )
)]
pub async fn update_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    actor_id: Result<Path<u64>, PathRejection>,
    body: Result<Json<ActorUpdate>, JsonRejection>,
) -> Result<Json<ActorUpdated>, ApiError> {
    let Path(actor_id) = actor_id?;
    let Json(update) = body?;
    if update.is_empty() {
        return Err(ApiError::bad_request(
            "request body does not have a valid message",
        ));
    }

    let actor = state.store.write().await.update_actor(actor_id, update)?;
    info!(actor_id, sub = ?claims.subject(), "actor updated");
    Ok(Json(ActorUpdated {
        success: true,
        updated: actor.id,
        actor: vec![actor],
    }))
}

#[utoipa::path(
    delete,
    path = "/actors/{actor_id}",
    params(("actor_id" = u64, Path, description = "Actor to delete")),
    tag = "Actors",
    security(("bearer_auth" = ["delete:actors"])),
    responses(
        (status = 200, body = Deleted),
        (status = 404, description = "Unknown actor")
    )
)]
pub async fn delete_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    actor_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(actor_id) = actor_id?;
    state.store.write().await.delete_actor(actor_id)?;
    info!(actor_id, sub = ?claims.subject(), "actor deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: actor_id,
    }))
}

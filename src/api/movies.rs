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
    models::{Created, Deleted, MovieList, MovieUpdate, MovieUpdated, NewMovie, PageQuery},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/movies",
    params(PageQuery),
    tag = "Movies",
    security(("bearer_auth" = ["read:movies"])),
    responses(
        (status = 200, body = MovieList),
        (status = 404, description = "Requested page is empty")
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<MovieList>, ApiError> {
    let Query(query) = query?;
    let movies = state.store.read().await.list_movies(query.page())?;
    Ok(Json(MovieList {
        success: true,
        movies,
    }))
}

#[utoipa::path(
    post,
    path = "/movies",
    request_body = NewMovie,
    tag = "Movies",
    security(("bearer_auth" = ["create:movies"])),
    responses(
        (status = 200, body = Created),
        (status = 400, description = "Body is not a JSON object"),
        (status = 422, description = "Title or release date missing")
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(request) = body?;
    if request.is_empty() {
        return Err(ApiError::bad_request(
            "request does not contain a valid JSON body.",
        ));
    }

    let movie = state.store.write().await.create_movie(request)?;
    info!(movie_id = movie.id, sub = ?claims.subject(), "movie created");
    Ok(Json(Created {
        success: true,
        created: movie.id,
    }))
}

#[utoipa::path(
    patch,
    path = "/movies/{movie_id}",
    params(("movie_id" = u64, Path, description = "Movie to edit")),
    request_body = MovieUpdate,
    tag = "Movies",
    security(("bearer_auth" = ["edit:movies"])),
    responses(
        (status = 200, body = MovieUpdated),
        (status = 404, description = "Unknown movie")
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    movie_id: Result<Path<u64>, PathRejection>,
    body: Result<Json<MovieUpdate>, JsonRejection>,
) -> Result<Json<MovieUpdated>, ApiError> {
    let Path(movie_id) = movie_id?;
    let Json(update) = body?;
    if update.is_empty() {
        return Err(ApiError::bad_request(
            "request body does not have a valid message",
        ));
    }

    let movie = state.store.write().await.update_movie(movie_id, update)?;
    info!(movie_id, sub = ?claims.subject(), "movie updated");
    Ok(Json(MovieUpdated {
        success: true,
        updated: movie.id,
        movie: vec![movie],
    }))
}

#[utoipa::path(
    delete,
    path = "/movies/{movie_id}",
    params(("movie_id" = u64, Path, description = "Movie to delete")),
    tag = "Movies",
    security(("bearer_auth" = ["delete:movies"])),
    responses(
        (status = 200, body = Deleted),
        (status = 404, description = "Unknown movie")
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<DecodedClaims>,
    movie_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(movie_id) = movie_id?;
    state.store.write().await.delete_movie(movie_id)?;
    info!(movie_id, sub = ?claims.subject(), "movie deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: movie_id,
    }))
}

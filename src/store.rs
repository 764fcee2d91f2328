// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for actors and movies.
//!
//! Records live for the lifetime of the process. Identifiers are assigned
//! sequentially from 1 and never reused, and listings are ordered by id.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{Actor, ActorUpdate, Movie, MovieUpdate, NewActor, NewMovie};

/// Rows returned per listing page.
pub const ROWS_PER_PAGE: usize = 10;

pub struct InMemoryStore {
    actors: BTreeMap<u64, Actor>,
    movies: BTreeMap<u64, Movie>,
    next_actor_id: u64,
    next_movie_id: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            actors: BTreeMap::new(),
            movies: BTreeMap::new(),
            next_actor_id: 1,
            next_movie_id: 1,
        }
    }
}

/// Slice out 1-based `page`. Page 0 is always empty.
fn page_of<T>(rows: impl Iterator<Item = T>, page: usize) -> Vec<T> {
    match page.checked_sub(1) {
        None => Vec::new(),
        Some(index) => rows
            .skip(index.saturating_mul(ROWS_PER_PAGE))
            .take(ROWS_PER_PAGE)
            .collect(),
    }
}

/// A present but blank string counts as missing.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Actors
    // -------------------------------------------------------------------------

    pub fn list_actors(&self, page: usize) -> Result<Vec<Actor>, ApiError> {
        let actors = page_of(self.actors.values().cloned(), page);
        if actors.is_empty() {
            return Err(ApiError::not_found("no actors found in database."));
        }
        Ok(actors)
    }

    pub fn create_actor(&mut self, request: NewActor) -> Result<Actor, ApiError> {
        let name =
            non_blank(request.name).ok_or_else(|| ApiError::unprocessable("no name provided."))?;
        let age = request
            .age
            .filter(|age| *age > 0)
            .ok_or_else(|| ApiError::unprocessable("no age provided."))?;

        let id = self.next_actor_id;
        self.next_actor_id += 1;

        let actor = Actor {
            id,
            name,
            gender: request.gender,
            age,
        };
        self.actors.insert(id, actor.clone());
        Ok(actor)
    }

    pub fn update_actor(&mut self, id: u64, update: ActorUpdate) -> Result<Actor, ApiError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("Actor with id:{id} not found")))?;

        if let Some(name) = update.name {
            actor.name = name;
        }
        if let Some(gender) = update.gender {
            actor.gender = Some(gender);
        }
        if let Some(age) = update.age {
            actor.age = age;
        }
        Ok(actor.clone())
    }

    pub fn delete_actor(&mut self, id: u64) -> Result<(), ApiError> {
        if self.actors.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("actor not found"))
        }
    }

    // -------------------------------------------------------------------------
    // Movies
    // -------------------------------------------------------------------------

    pub fn list_movies(&self, page: usize) -> Result<Vec<Movie>, ApiError> {
        let movies = page_of(self.movies.values().cloned(), page);
        if movies.is_empty() {
            return Err(ApiError::not_found("no movies found in database."));
        }
        Ok(movies)
    }

    pub fn create_movie(&mut self, request: NewMovie) -> Result<Movie, ApiError> {
        let title =
            non_blank(request.title).ok_or_else(|| ApiError::unprocessable("no title provided."))?;
        let release_date = request
            .release_date
            .ok_or_else(|| ApiError::unprocessable("no release_date provided."))?;

        let id = self.next_movie_id;
        self.next_movie_id += 1;

        let movie = Movie {
            id,
            title,
            release_date,
        };
        self.movies.insert(id, movie.clone());
        Ok(movie)
    }

    pub fn update_movie(&mut self, id: u64, update: MovieUpdate) -> Result<Movie, ApiError> {
        let movie = self
            .movies
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("Movie with id:{id} not found")))?;

        if let Some(title) = update.title {
            movie.title = title;
        }
        if let Some(release_date) = update.release_date {
            movie.release_date = release_date;
        }
        Ok(movie.clone())
    }

    pub fn delete_movie(&mut self, id: u64) -> Result<(), ApiError> {
        if self.movies.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("movie not found"))
        }
    }
}

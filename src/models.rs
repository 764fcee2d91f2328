// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Actors**: Performers available for casting
//! - **Movies**: Productions actors are cast into
//! - **Envelopes**: `success`-flagged response bodies shared by both

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Actor Models
// =============================================================================

/// A stored actor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub name: String,
    pub gender: Option<String>,
    pub age: u32,
}

/// Request to create an actor.
///
/// Fields are optional on the wire so that a missing value can be reported
/// with a specific message instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewActor {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
}

impl NewActor {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none() && self.age.is_none()
    }
}

/// Partial actor update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ActorUpdate {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
}

impl ActorUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none() && self.age.is_none()
    }
}

// =============================================================================
// Movie Models
// =============================================================================

/// A stored movie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    /// Release date (YYYY-MM-DD).
    pub release_date: NaiveDate,
}

/// Request to create a movie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewMovie {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl NewMovie {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }
}

/// Partial movie update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }
}

// =============================================================================
// Paging
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1, as does a non-numeric value.
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<usize>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

// =============================================================================
// Response Envelopes
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActorList {
    pub success: bool,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieList {
    pub success: bool,
    pub movies: Vec<Movie>,
}

/// Returned after a successful create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Created {
    pub success: bool,
    pub created: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActorUpdated {
    pub success: bool,
    pub updated: u64,
    /// Single-element list holding the updated actor.
    pub actor: Vec<Actor>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieUpdated {
    pub success: bool,
    pub updated: u64,
    /// Single-element list holding the updated movie.
    pub movie: Vec<Movie>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub success: bool,
    pub deleted: u64,
}

/// Hosted login page for obtaining an access token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginUrl {
    pub url: String,
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Casting Agency - Permission-gated REST API
//!
//! Bearer tokens issued by an external identity provider are verified
//! against its published JWKS, then checked for the permission each
//! operation requires before the handler runs.
//!
//! ## Modules
//!
//! - `auth` - Key resolution, token verification and permission checks
//! - `api` - HTTP API handlers (Axum)
//! - `store` - In-memory actors and movies
//! - `config` - Environment-driven settings
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;

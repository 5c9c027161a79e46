// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Axum HTTP server setup and routing.
//!
//! # Routing
//!
//! - `GET /info` — drive stats and feature flags
//! - `GET /files?id&search` — flat listing, hidden names excluded
//! - `GET /folders` — nested folder tree from the root
//! - `GET /icons/:size/:type/:name` — icon asset with type fallback
//! - `POST /copy` `/move` `/rename` — mutation, returns a fresh descriptor
//! - `POST /makedir` `/makefile` — creation, returns a fresh descriptor
//! - `POST /delete` — checked delete, returns `{}`
//! - `POST /upload?id` — streaming multipart upload
//! - `POST /text` / `GET /text?id` — text write / raw content stream
//! - `GET /direct?id&download` — stream with Content-Disposition
//!
//! Anything else falls through to the static asset directory.

use axum::{
    routing::{get, post},
    Router,
};
use drivegate_core::{Gateway, LocalBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers;

/// Shared application state for all handlers.
///
/// The gateway itself holds no per-request scratch state; everything a
/// handler needs beyond this is a request-scoped local.
#[derive(Clone)]
pub struct AppState {
    /// Gateway core over the local backend.
    pub gateway: Arc<Gateway<LocalBackend>>,
    /// Directory served for icons and other static assets.
    pub assets_dir: PathBuf,
}

impl AppState {
    /// Creates application state over a backend.
    pub fn new(backend: LocalBackend, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            gateway: Arc::new(Gateway::new(backend)),
            assets_dir: assets_dir.into(),
        }
    }
}

/// Creates the main router with all gateway endpoints.
///
/// The CORS layer is built by the caller from configuration so allowed
/// origins stay a deployment concern.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let assets = ServeDir::new(state.assets_dir.clone());

    Router::new()
        .route("/info", get(handlers::info::drive_info))
        .route("/files", get(handlers::listing::list_files))
        .route("/folders", get(handlers::listing::list_folders))
        .route("/icons/:size/:type/:name", get(handlers::icons::icon))
        .route("/copy", post(handlers::mutate::copy_node))
        .route("/move", post(handlers::mutate::move_node))
        .route("/rename", post(handlers::mutate::rename_node))
        .route("/makedir", post(handlers::mutate::make_dir))
        .route("/makefile", post(handlers::mutate::make_file))
        .route("/delete", post(handlers::mutate::delete_node))
        .route("/upload", post(handlers::transfer::upload))
        .route(
            "/text",
            post(handlers::transfer::write_text).get(handlers::transfer::read_text),
        )
        .route("/direct", get(handlers::transfer::direct_download))
        .fallback_service(assets)
        .layer(cors)
        // Request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

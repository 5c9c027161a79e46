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

//! Listing handlers.

use axum::extract::{Query, State};
use axum::Json;
use drivegate_core::{ListQuery, NameFilter, NodeDescriptor, NodeId};
use serde::Deserialize;
use tracing::debug;

use crate::errors::ApiError;
use crate::server::AppState;

/// Query parameters for `GET /files`.
#[derive(Debug, Deserialize, Default)]
pub struct FilesQuery {
    /// Container to list; defaults to the root.
    pub id: Option<String>,
    /// When present, descend recursively and keep only matching names.
    pub search: Option<String>,
}

/// Handler for `GET /files` — flat listing of a container.
///
/// Hidden (`.`-prefixed) names are always excluded; a search term turns the
/// listing recursive with a contains-filter on display names.
pub async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<FilesQuery>,
) -> Result<Json<Vec<NodeDescriptor>>, ApiError> {
    let container = state.gateway.resolve(params.id.as_deref().unwrap_or("/")).await?;

    let mut query = ListQuery::new().exclude(NameFilter::StartsWith(".".into()));
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        debug!(container = %container, search, "recursive search listing");
        query = query.recursive().include(NameFilter::Contains(search));
    }

    let listing = state.gateway.list(&container, &query).await?;
    Ok(Json(listing))
}

/// Handler for `GET /folders` — nested folder tree from the root.
pub async fn list_folders(
    State(state): State<AppState>,
) -> Result<Json<Vec<NodeDescriptor>>, ApiError> {
    let query = ListQuery::new()
        .recursive()
        .nested()
        .skip_files()
        .exclude(NameFilter::StartsWith(".".into()));
    let listing = state.gateway.list(&NodeId::root(), &query).await?;
    Ok(Json(listing))
}

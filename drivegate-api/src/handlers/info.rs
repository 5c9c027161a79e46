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

//! Drive info handler.

use axum::extract::{Query, State};
use axum::Json;
use drivegate_core::DriveStats;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::server::AppState;

/// Query parameters for `GET /info`.
#[derive(Debug, Deserialize, Default)]
pub struct InfoQuery {
    /// Subtree to report on; defaults to the root.
    pub id: Option<String>,
}

/// Response body for `GET /info`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Usage statistics for the requested subtree.
    pub stats: DriveStats,
    /// Feature flags advertised to the client.
    pub features: Features,
}

/// Feature flags. Both are currently empty capability markers.
#[derive(Debug, Serialize)]
pub struct Features {
    /// Preview support marker.
    pub preview: Value,
    /// Metadata support marker.
    pub meta: Value,
}

/// Handler for `GET /info` — usage stats and feature flags.
pub async fn drive_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<InfoResponse>, ApiError> {
    let id = state.gateway.resolve(query.id.as_deref().unwrap_or("/")).await?;
    let stats = state.gateway.stats(&id).await?;
    Ok(Json(InfoResponse {
        stats,
        features: Features {
            preview: json!({}),
            meta: json!({}),
        },
    }))
}

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

//! Icon asset lookup.
//!
//! A simple fallback chain: the exact icon at `icons/<size>/<name>`, or
//! `icons/<size>/types/<type>.svg` when the exact name is absent. All path
//! segments are sanitized to `[A-Za-z0-9.]` before touching the
//! filesystem, and every lookup uses request-scoped locals only.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Response, StatusCode};
use drivegate_core::GatewayError;
use tokio::fs;

use crate::errors::ApiError;
use crate::server::AppState;

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect()
}

fn content_type(name: &str) -> &'static str {
    if name.ends_with(".svg") {
        "image/svg+xml"
    } else if name.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

/// Handler for `GET /icons/:size/:type/:name`.
pub async fn icon(
    State(state): State<AppState>,
    Path((size, kind, name)): Path<(String, String, String)>,
) -> Result<Response<Body>, ApiError> {
    let size = sanitize(&size);
    let kind = sanitize(&kind);
    let name = sanitize(&name);

    let icons = state.assets_dir.join("icons").join(&size);
    let exact = icons.join(&name);
    let (path, served_name) = if fs::try_exists(&exact).await.unwrap_or(false) {
        (exact, name)
    } else {
        let fallback = format!("{kind}.svg");
        (icons.join("types").join(&fallback), fallback)
    };

    let data = fs::read(&path)
        .await
        .map_err(|_| GatewayError::not_found(format!("/icons/{size}/{kind}/{served_name}")))?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type(&served_name))
        .body(Body::from(data))
        .unwrap())
}

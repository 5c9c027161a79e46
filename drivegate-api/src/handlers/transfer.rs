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

//! Streaming transfer handlers: upload, text read/write, direct download.
//!
//! Upload and download bodies are piped chunk by chunk between the HTTP
//! connection and the backend; no handler stages a whole file in memory.

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, Response, StatusCode};
use axum::Form;
use axum::Json;
use drivegate_core::{MutationOpts, NodeDescriptor, NodeId};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::io;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::server::AppState;

/// Characters kept verbatim in Content-Disposition filenames
/// (mirrors `encodeURIComponent`'s unreserved set, minus the rarely-safe
/// punctuation).
const FILENAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Query parameters for `POST /upload`.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Target container identifier.
    pub id: String,
}

/// Form body for `POST /text`.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    /// Target identifier (created or replaced).
    pub id: String,
    /// Content to write.
    pub content: String,
}

/// Query parameters for `GET /text`.
#[derive(Debug, Deserialize)]
pub struct TextQuery {
    /// Identifier to read.
    pub id: String,
}

/// Query parameters for `GET /direct`.
#[derive(Debug, Deserialize)]
pub struct DirectQuery {
    /// Identifier to stream.
    pub id: String,
    /// When present, deliver as an attachment instead of inline.
    pub download: Option<String>,
}

/// Handler for `POST /upload` — streaming multipart upload.
///
/// The first file field is written through: a fresh node is created in the
/// target container (collision-safe), then the field's chunk stream is
/// piped straight into the backend. Each upload gets its own `make`;
/// concurrent uploads never share a write destination.
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let container = state.gateway.resolve(&query.id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.file_name().map(ToOwned::to_owned) else {
            // Non-file fields carry no payload we store.
            continue;
        };

        debug!(container = %container, name, "upload started");
        let target = state
            .gateway
            .make(&container, &name, false, MutationOpts::prevent_collision())
            .await?;

        // Pull chunks from the field on demand; a broken connection surfaces
        // as an I/O error and the half-written node is left as-is.
        let stream = futures::stream::try_unfold(field, |mut field| async move {
            match field.chunk().await {
                Ok(Some(bytes)) => Ok(Some((bytes, field))),
                Ok(None) => Ok(None),
                Err(e) => Err(io::Error::new(io::ErrorKind::BrokenPipe, e)),
            }
        });

        let id = state.gateway.write(&target, Box::pin(stream)).await?;
        let descriptor = state.gateway.info(&id).await?;
        info!(id = %id, size = descriptor.size, "upload complete");
        return Ok(Json(descriptor));
    }

    Err(ApiError::InvalidRequest("multipart body contains no file field".into()))
}

/// Handler for `POST /text` — writes an in-memory string through the
/// streaming write path.
pub async fn write_text(
    State(state): State<AppState>,
    Form(form): Form<TextForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let id = NodeId::parse(&form.id)?;
    let id = state.gateway.write_text(&id, &form.content).await?;
    Ok(Json(state.gateway.info(&id).await?))
}

/// Handler for `GET /text` — raw content stream.
pub async fn read_text(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Result<Response<Body>, ApiError> {
    let id = state.gateway.resolve(&query.id).await?;
    let stream = state.gateway.read(&id).await?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .unwrap())
}

/// Handler for `GET /direct` — content stream with a Content-Disposition
/// header, inline by default, attachment when `download` is set. The
/// display name is percent-encoded to survive transport.
pub async fn direct_download(
    State(state): State<AppState>,
    Query(query): Query<DirectQuery>,
) -> Result<Response<Body>, ApiError> {
    let id = state.gateway.resolve(&query.id).await?;
    let descriptor = state.gateway.info(&id).await?;
    let stream = state.gateway.read(&id).await?;

    let disposition = if query.download.is_some() {
        "attachment"
    } else {
        "inline"
    };
    let filename = utf8_percent_encode(&descriptor.value, FILENAME_SET);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_DISPOSITION,
            format!("{disposition}; filename={filename}"),
        )
        .header(header::CONTENT_LENGTH, descriptor.size)
        .body(Body::from_stream(stream))
        .unwrap())
}

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

//! Mutation handlers: copy, move, rename, make, delete.
//!
//! Every handler resolves identifiers first, runs exactly one gateway
//! mutation, and responds with a fresh descriptor fetched after the
//! mutation — never a stale echo of the inputs. Every backend result is
//! awaited and checked before a response is produced.

use axum::extract::State;
use axum::{Form, Json};
use drivegate_core::{MutationOpts, NodeDescriptor};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::server::AppState;

/// Form body for `POST /copy` and `POST /move`.
#[derive(Debug, Deserialize)]
pub struct TransferForm {
    /// Source identifier.
    pub id: String,
    /// Target container identifier.
    pub to: String,
}

/// Form body for `POST /rename`.
#[derive(Debug, Deserialize)]
pub struct RenameForm {
    /// Identifier to rename.
    pub id: String,
    /// New display name.
    pub name: String,
}

/// Form body for `POST /makedir` and `POST /makefile`.
#[derive(Debug, Deserialize)]
pub struct MakeForm {
    /// Container identifier.
    pub id: String,
    /// Desired display name.
    pub name: String,
}

/// Form body for `POST /delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// Identifier to delete.
    pub id: String,
}

/// Handler for `POST /copy`.
pub async fn copy_node(
    State(state): State<AppState>,
    Form(form): Form<TransferForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let source = state.gateway.resolve(&form.id).await?;
    let target = state.gateway.resolve(&form.to).await?;
    let new_id = state
        .gateway
        .copy(&source, &target, "", MutationOpts::prevent_collision())
        .await?;
    Ok(Json(state.gateway.info(&new_id).await?))
}

/// Handler for `POST /move`.
pub async fn move_node(
    State(state): State<AppState>,
    Form(form): Form<TransferForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let source = state.gateway.resolve(&form.id).await?;
    let target = state.gateway.resolve(&form.to).await?;
    let new_id = state
        .gateway
        .mv(&source, &target, "", MutationOpts::prevent_collision())
        .await?;
    Ok(Json(state.gateway.info(&new_id).await?))
}

/// Handler for `POST /rename` — a move into the node's own container.
pub async fn rename_node(
    State(state): State<AppState>,
    Form(form): Form<RenameForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let id = state.gateway.resolve(&form.id).await?;
    let new_id = state
        .gateway
        .rename(&id, &form.name, MutationOpts::prevent_collision())
        .await?;
    Ok(Json(state.gateway.info(&new_id).await?))
}

/// Handler for `POST /makedir`.
pub async fn make_dir(
    State(state): State<AppState>,
    Form(form): Form<MakeForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    make_node(&state, &form, true).await
}

/// Handler for `POST /makefile`.
pub async fn make_file(
    State(state): State<AppState>,
    Form(form): Form<MakeForm>,
) -> Result<Json<NodeDescriptor>, ApiError> {
    make_node(&state, &form, false).await
}

async fn make_node(
    state: &AppState,
    form: &MakeForm,
    is_folder: bool,
) -> Result<Json<NodeDescriptor>, ApiError> {
    let container = state.gateway.resolve(&form.id).await?;
    let id = state
        .gateway
        .make(&container, &form.name, is_folder, MutationOpts::prevent_collision())
        .await?;
    Ok(Json(state.gateway.info(&id).await?))
}

/// Handler for `POST /delete`.
///
/// The removal result is checked before responding; a missing node is a
/// clear 404, a removal failure a 500.
pub async fn delete_node(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Json<Value>, ApiError> {
    let id = state.gateway.resolve(&form.id).await?;
    state.gateway.delete(&id).await?;
    Ok(Json(json!({})))
}

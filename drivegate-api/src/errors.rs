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

//! API error responses.
//!
//! Every failure surfaces to the caller as a structured JSON body
//! `{ "error": <code>, "message": <text> }` with a matching HTTP status.
//! Nothing is silently swallowed and nothing is retried here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drivegate_core::GatewayError;
use serde_json::json;
use thiserror::Error;

/// API-level errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A core gateway failure, carrying the taxonomy kind.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The request shape itself is invalid (bad form, missing file field).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the stable error code reported to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Gateway(GatewayError::NotFound { .. }) => "NotFound",
            ApiError::Gateway(GatewayError::InvalidName { .. }) => "InvalidName",
            ApiError::Gateway(GatewayError::Backend(_)) => "BackendFailure",
            ApiError::Gateway(GatewayError::StreamAborted { .. }) => "StreamAborted",
            ApiError::InvalidRequest(_) => "InvalidRequest",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Gateway(GatewayError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Gateway(GatewayError::InvalidName { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Gateway(GatewayError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Gateway(GatewayError::StreamAborted { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}: {}", self.code(), self);
        }
        (
            status,
            Json(json!({ "error": self.code(), "message": self.to_string() })),
        )
            .into_response()
    }
}

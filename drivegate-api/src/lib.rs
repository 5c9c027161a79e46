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

//! Drivegate API layer — HTTP surface over the gateway core.
//!
//! This crate provides:
//! - HTTP handlers for listing, mutation and streaming transfer
//! - Error mapping to structured JSON failure bodies
//! - Router construction with CORS, request tracing and static assets

pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::ApiError;
pub use server::{create_router, AppState};

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

//! Drivegate core: addressing, collision-safe mutation and streaming I/O
//! over a pluggable storage backend.
//!
//! The [`Gateway`] composes three pieces:
//! - identifier resolution ([`types::NodeId`]),
//! - collision-safe naming ([`naming`]),
//! - the [`backend::StorageBackend`] primitives.
//!
//! Descriptors are created fresh per request; the core holds no persistent
//! state beyond the duration of a single request.

pub mod backend;
pub mod error;
pub mod naming;
pub mod ops;
pub mod types;

pub use backend::{ByteStream, LocalBackend, StorageBackend};
pub use error::{GatewayError, Result};
pub use ops::{Gateway, MutationOpts};
pub use types::{DriveStats, ListQuery, NameFilter, NodeDescriptor, NodeId, NodeKind};

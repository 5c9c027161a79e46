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

//! Error types for the gateway core.

use thiserror::Error;

/// Errors that can occur in the gateway core.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The identifier does not resolve to a live node.
    #[error("Not found: {id}")]
    NotFound {
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A display name failed validation before any backend call.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// The underlying storage operation failed for reasons opaque to this
    /// layer (disk full, permission denied, I/O error).
    #[error("Backend failure: {0}")]
    Backend(#[from] std::io::Error),

    /// The client disconnected mid-transfer.
    #[error("Stream aborted: {detail}")]
    StreamAborted {
        /// What the transport reported when the stream broke off.
        detail: String,
    },
}

/// Convenience result alias used throughout the core.
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Creates a `NotFound` error for the given identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        GatewayError::NotFound { id: id.into() }
    }

    /// Creates an `InvalidName` error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GatewayError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

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

//! Node descriptors: the normalized snapshot every operation returns.

use crate::types::id::NodeId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of a storage node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Folder capable of holding children.
    Folder,
}

impl NodeKind {
    /// True for folder-kind nodes.
    pub fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

/// Normalized snapshot of a node's metadata.
///
/// A descriptor is produced fresh per request; it is a snapshot, not a live
/// reference. `id` resolved to exactly one live node at the moment the
/// descriptor was produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    /// Opaque identifier of the node.
    pub id: NodeId,
    /// Display name.
    pub value: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Size in bytes. Zero for folders.
    pub size: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
    /// Child descriptors, present only in nested listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeDescriptor>>,
}

/// Disk usage snapshot for a subtree, reported by `/info`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DriveStats {
    /// Bytes still available under the configured capacity.
    pub free: u64,
    /// Bytes used by the subtree.
    pub used: u64,
    /// Configured capacity in bytes.
    pub total: u64,
}

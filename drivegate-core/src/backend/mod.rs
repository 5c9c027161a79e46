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

//! Storage backend trait and the local-filesystem implementation.

use crate::error::Result;
use crate::types::{DriveStats, ListQuery, NodeDescriptor, NodeId};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

pub mod local;

pub use local::{LocalBackend, DEFAULT_CAPACITY};

/// An incrementally pulled byte stream.
///
/// Both sides of the transfer pipeline speak this type: reads produce one,
/// writes consume one. The pull model gives back-pressure for free — a slow
/// consumer simply stops polling — and dropping the stream releases the
/// underlying resource.
pub type ByteStream<'a> = BoxStream<'a, std::io::Result<Bytes>>;

/// Primitive file/folder operations provided by a storage backend.
///
/// The gateway core orchestrates these primitives; it holds no persistent
/// state of its own. All name decisions (collision handling, validation)
/// happen above this trait — backends receive final names.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// True if a node exists at the identifier.
    async fn exists(&self, id: &NodeId) -> Result<bool>;

    /// Returns a fresh descriptor for the node, or `NotFound`.
    async fn info(&self, id: &NodeId) -> Result<NodeDescriptor>;

    /// Returns usage statistics for the subtree at `id`.
    async fn stats(&self, id: &NodeId) -> Result<DriveStats>;

    /// Lists the container's contents according to the query.
    ///
    /// The result is a point-in-time snapshot with no duplicates; descent
    /// order within a recursive listing is unspecified.
    async fn list(&self, container: &NodeId, query: &ListQuery) -> Result<Vec<NodeDescriptor>>;

    /// Creates an empty file or folder named `name` inside `container`.
    async fn make(&self, container: &NodeId, name: &str, is_folder: bool) -> Result<NodeId>;

    /// Copies `source` into `target_container` under `name`.
    async fn copy(&self, source: &NodeId, target_container: &NodeId, name: &str)
        -> Result<NodeId>;

    /// Moves `source` into `target_container` under `name`.
    ///
    /// On success the source identifier no longer resolves.
    async fn mv(&self, source: &NodeId, target_container: &NodeId, name: &str) -> Result<NodeId>;

    /// Removes the node. Folders are removed with their contents.
    async fn remove(&self, id: &NodeId) -> Result<()>;

    /// Opens a read stream over the node's content.
    async fn read(&self, id: &NodeId) -> Result<ByteStream<'static>>;

    /// Pipes a byte stream into the node at `id`, replacing its content.
    ///
    /// Implementations must not stage the whole stream in memory; peak
    /// memory stays bounded regardless of stream length.
    async fn write(&self, id: &NodeId, data: ByteStream<'_>) -> Result<NodeId>;
}

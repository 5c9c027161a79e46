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

//! Gateway operations: resolver + namer + backend composition.
//!
//! Every public operation resolves its identifiers first, applies the
//! collision-safe namer where a new name is being introduced, and then
//! invokes exactly one backend primitive, returning a normalized result.
//!
//! Operations are not transactional across that sequence: if the backend
//! call fails after name resolution, the failure is reported and the tree is
//! left in whatever state the backend left it. Callers get an at-most-once,
//! best-effort contract, never automatic rollback or retry.

use crate::backend::{ByteStream, StorageBackend};
use crate::error::{GatewayError, Result};
use crate::naming;
use crate::types::{DriveStats, ListQuery, NodeDescriptor, NodeId};
use bytes::Bytes;
use futures::StreamExt;
use std::io;
use tracing::info;

/// Options for mutation operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationOpts {
    /// Rename the new node to avoid overwriting a same-named sibling.
    pub prevent_collision: bool,
}

impl MutationOpts {
    /// Options with collision prevention enabled.
    pub fn prevent_collision() -> Self {
        Self {
            prevent_collision: true,
        }
    }
}

/// The gateway core: collision-safe mutation and streaming I/O over a
/// storage backend.
///
/// Holds no mutable state of its own; concurrent requests serialize only
/// through whatever concurrency control the backend provides.
pub struct Gateway<B> {
    backend: B,
}

impl<B: StorageBackend> Gateway<B> {
    /// Wraps a storage backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Direct access to the backend, mainly for tests.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolves a client-supplied identifier to a live node.
    ///
    /// The first step of every operation, never bypassed. Fails with
    /// `NotFound` if the backend reports no node at the identifier.
    pub async fn resolve(&self, raw: &str) -> Result<NodeId> {
        let id = NodeId::parse(raw)?;
        if self.backend.exists(&id).await? {
            Ok(id)
        } else {
            Err(GatewayError::not_found(raw))
        }
    }

    /// Returns a fresh descriptor for the node.
    pub async fn info(&self, id: &NodeId) -> Result<NodeDescriptor> {
        self.backend.info(id).await
    }

    /// Returns usage statistics for the subtree at `id`.
    pub async fn stats(&self, id: &NodeId) -> Result<DriveStats> {
        self.backend.stats(id).await
    }

    /// Lists a container's contents.
    pub async fn list(&self, container: &NodeId, query: &ListQuery) -> Result<Vec<NodeDescriptor>> {
        self.require_container(container).await?;
        self.backend.list(container, query).await
    }

    /// Creates a file or folder inside `container` and returns its
    /// identifier.
    pub async fn make(
        &self,
        container: &NodeId,
        name: &str,
        is_folder: bool,
        opts: MutationOpts,
    ) -> Result<NodeId> {
        naming::validate_name(name)?;
        self.require_container(container).await?;
        let name = self.pick_name(container, name, is_folder, opts).await?;
        let id = self.backend.make(container, &name, is_folder).await?;
        info!(id = %id, is_folder, "make");
        Ok(id)
    }

    /// Copies `source` into `target_container`, renamed to `rename_to` when
    /// non-empty.
    pub async fn copy(
        &self,
        source: &NodeId,
        target_container: &NodeId,
        rename_to: &str,
        opts: MutationOpts,
    ) -> Result<NodeId> {
        let src = self.backend.info(source).await?;
        self.require_container(target_container).await?;
        let desired = if rename_to.is_empty() { &src.value } else { rename_to };
        naming::validate_name(desired)?;
        let name = self
            .pick_name(target_container, desired, src.kind.is_folder(), opts)
            .await?;
        let id = self.backend.copy(source, target_container, &name).await?;
        info!(source = %source, target = %id, "copy");
        Ok(id)
    }

    /// Moves `source` into `target_container`, renamed to `rename_to` when
    /// non-empty. The source identifier no longer resolves afterward.
    pub async fn mv(
        &self,
        source: &NodeId,
        target_container: &NodeId,
        rename_to: &str,
        opts: MutationOpts,
    ) -> Result<NodeId> {
        let src = self.backend.info(source).await?;
        self.require_container(target_container).await?;
        let desired = if rename_to.is_empty() { &src.value } else { rename_to };
        naming::validate_name(desired)?;
        let name = self
            .pick_name(target_container, desired, src.kind.is_folder(), opts)
            .await?;
        let id = self.backend.mv(source, target_container, &name).await?;
        info!(source = %source, target = %id, "move");
        Ok(id)
    }

    /// Renames a node in place: a move into its own container.
    pub async fn rename(&self, id: &NodeId, new_name: &str, opts: MutationOpts) -> Result<NodeId> {
        let parent = id
            .parent()
            .ok_or_else(|| GatewayError::invalid_name(new_name, "cannot rename the root"))?;
        self.mv(id, &parent, new_name, opts).await
    }

    /// Deletes a node.
    ///
    /// Resolves first so a missing node reports a clear `NotFound`, distinct
    /// from a backend failure during removal itself.
    pub async fn delete(&self, id: &NodeId) -> Result<()> {
        if !self.backend.exists(id).await? {
            return Err(GatewayError::not_found(id.as_str()));
        }
        self.backend.remove(id).await?;
        info!(id = %id, "delete");
        Ok(())
    }

    /// Opens a read stream over a node's content.
    pub async fn read(&self, id: &NodeId) -> Result<ByteStream<'static>> {
        self.backend.read(id).await
    }

    /// Pipes a byte stream into the node at `id`.
    ///
    /// The parent container must exist; the node itself is created or
    /// replaced. Transport-level breaks in the inbound stream surface as
    /// `StreamAborted`.
    pub async fn write(&self, id: &NodeId, data: ByteStream<'_>) -> Result<NodeId> {
        let parent = id
            .parent()
            .ok_or_else(|| GatewayError::not_found(id.as_str()))?;
        self.require_container(&parent).await?;
        match self.backend.write(id, data).await {
            Ok(id) => {
                info!(id = %id, "write");
                Ok(id)
            }
            Err(GatewayError::Backend(e)) if is_abort(&e) => Err(GatewayError::StreamAborted {
                detail: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Writes an in-memory string through the same streaming path as binary
    /// uploads. There is no separate code path for text files at the
    /// storage layer.
    pub async fn write_text(&self, id: &NodeId, content: &str) -> Result<NodeId> {
        let chunk = Bytes::copy_from_slice(content.as_bytes());
        let stream = futures::stream::once(async move { Ok(chunk) }).boxed();
        self.write(id, stream).await
    }

    /// Fails with `NotFound` unless `id` names a live folder.
    async fn require_container(&self, id: &NodeId) -> Result<()> {
        let desc = self.backend.info(id).await?;
        if desc.kind.is_folder() {
            Ok(())
        } else {
            Err(GatewayError::not_found(id.as_str()))
        }
    }

    /// Applies the collision-safe namer against a container.
    ///
    /// The read-then-decide sequence is unlocked: two concurrent calls with
    /// the same desired name can both observe it as free. The backend's
    /// creation primitive is the last line of defense.
    async fn pick_name(
        &self,
        container: &NodeId,
        desired: &str,
        is_folder: bool,
        opts: MutationOpts,
    ) -> Result<String> {
        if !opts.prevent_collision {
            return Ok(desired.to_string());
        }
        let children = self.backend.list(container, &ListQuery::new()).await?;
        let existing: Vec<String> = children.into_iter().map(|d| d.value).collect();
        Ok(naming::resolve_name(&existing, desired, is_folder, true))
    }
}

/// True for I/O error kinds that indicate the peer broke off mid-stream.
fn is_abort(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted
    )
}

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

//! Local-filesystem storage backend.
//!
//! Maps identifiers onto a directory subtree rooted at a configured path.
//! All I/O goes through `tokio::fs`; reads and writes are streamed so a
//! transfer never holds a whole file in memory.

use crate::backend::{ByteStream, StorageBackend};
use crate::error::{GatewayError, Result};
use crate::types::{DriveStats, ListQuery, NodeDescriptor, NodeId, NodeKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::StreamExt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::debug;

/// Default capacity quota reported through `stats` (10 GB).
pub const DEFAULT_CAPACITY: u64 = 10 * 1024 * 1024 * 1024;

/// Storage backend over a local directory tree.
pub struct LocalBackend {
    root: PathBuf,
    capacity: u64,
}

impl LocalBackend {
    /// Creates a backend rooted at `root` with the default capacity quota.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_capacity(root, DEFAULT_CAPACITY)
    }

    /// Creates a backend rooted at `root` with an explicit capacity quota.
    pub fn with_capacity(root: impl Into<PathBuf>, capacity: u64) -> Self {
        Self {
            root: root.into(),
            capacity,
        }
    }

    /// Maps an identifier to its on-disk path.
    fn locate(&self, id: &NodeId) -> PathBuf {
        if id.is_root() {
            self.root.clone()
        } else {
            self.root.join(&id.as_str()[1..])
        }
    }

    fn describe(id: &NodeId, meta: &std::fs::Metadata) -> NodeDescriptor {
        let kind = if meta.is_dir() {
            NodeKind::Folder
        } else {
            NodeKind::File
        };
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        // Some filesystems don't record birth time; fall back to mtime.
        let created = meta.created().map(DateTime::<Utc>::from).unwrap_or(modified);
        NodeDescriptor {
            id: id.clone(),
            value: if id.is_root() {
                "/".to_string()
            } else {
                id.name().to_string()
            },
            kind,
            size: if meta.is_dir() { 0 } else { meta.len() },
            created_at: created,
            modified_at: modified,
            children: None,
        }
    }

    /// Lists one directory level, recursing per the query.
    fn list_level<'a>(
        &'a self,
        container: NodeId,
        query: &'a ListQuery,
    ) -> BoxFuture<'a, Result<Vec<NodeDescriptor>>> {
        Box::pin(async move {
            let path = self.locate(&container);
            let mut entries = fs::read_dir(&path)
                .await
                .map_err(|e| map_io(&container, e))?;
            let mut out = Vec::new();

            while let Some(entry) = entries.next_entry().await.map_err(GatewayError::Backend)? {
                let name = entry.file_name().to_string_lossy().into_owned();
                // Excluded names are pruned entirely: no result, no descent.
                if query.excludes(&name) {
                    continue;
                }
                let child_id = container.child(&name);
                let meta = entry.metadata().await.map_err(GatewayError::Backend)?;
                let mut desc = Self::describe(&child_id, &meta);

                if meta.is_dir() {
                    let sub = if query.recursive {
                        Some(self.list_level(child_id, query).await?)
                    } else {
                        None
                    };
                    if query.nested {
                        // Folders always stay in a nested tree; the include
                        // filter narrows leaves, not the structure.
                        desc.children = sub;
                        out.push(desc);
                    } else {
                        if query.admits(&name) {
                            out.push(desc);
                        }
                        if let Some(sub) = sub {
                            out.extend(sub);
                        }
                    }
                } else if !query.skip_files && query.admits(&name) {
                    out.push(desc);
                }
            }

            Ok(out)
        })
    }

    /// Recursive byte total of a subtree.
    fn usage<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, io::Result<u64>> {
        Box::pin(async move {
            let meta = fs::metadata(path).await?;
            if !meta.is_dir() {
                return Ok(meta.len());
            }
            let mut total = 0u64;
            let mut entries = fs::read_dir(path).await?;
            while let Some(entry) = entries.next_entry().await? {
                let meta = entry.metadata().await?;
                if meta.is_dir() {
                    total += self.usage(&entry.path()).await?;
                } else {
                    total += meta.len();
                }
            }
            Ok(total)
        })
    }

    /// Recursively copies a directory tree.
    fn copy_tree<'a>(&'a self, src: PathBuf, dst: PathBuf) -> BoxFuture<'a, io::Result<()>> {
        Box::pin(async move {
            fs::create_dir(&dst).await?;
            let mut entries = fs::read_dir(&src).await?;
            while let Some(entry) = entries.next_entry().await? {
                let meta = entry.metadata().await?;
                let target = dst.join(entry.file_name());
                if meta.is_dir() {
                    self.copy_tree(entry.path(), target).await?;
                } else {
                    fs::copy(entry.path(), target).await?;
                }
            }
            Ok(())
        })
    }
}

/// Maps an I/O error to the gateway taxonomy, attributing missing paths
/// to the identifier being operated on.
fn map_io(id: &NodeId, err: io::Error) -> GatewayError {
    if err.kind() == io::ErrorKind::NotFound {
        GatewayError::not_found(id.as_str())
    } else {
        GatewayError::Backend(err)
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn exists(&self, id: &NodeId) -> Result<bool> {
        fs::try_exists(self.locate(id)).await.map_err(GatewayError::Backend)
    }

    async fn info(&self, id: &NodeId) -> Result<NodeDescriptor> {
        let meta = fs::metadata(self.locate(id)).await.map_err(|e| map_io(id, e))?;
        Ok(Self::describe(id, &meta))
    }

    async fn stats(&self, id: &NodeId) -> Result<DriveStats> {
        let path = self.locate(id);
        let used = self.usage(&path).await.map_err(|e| map_io(id, e))?;
        Ok(DriveStats {
            free: self.capacity.saturating_sub(used),
            used,
            total: self.capacity,
        })
    }

    async fn list(&self, container: &NodeId, query: &ListQuery) -> Result<Vec<NodeDescriptor>> {
        self.list_level(container.clone(), query).await
    }

    async fn make(&self, container: &NodeId, name: &str, is_folder: bool) -> Result<NodeId> {
        let id = container.child(name);
        let path = self.locate(&id);
        if is_folder {
            fs::create_dir(&path).await.map_err(GatewayError::Backend)?;
        } else {
            // create_new is the last line of defense for the namer's
            // read-then-create race: a concurrent second writer fails here
            // instead of truncating the first writer's file.
            fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
                .map_err(GatewayError::Backend)?;
        }
        debug!(id = %id, is_folder, "created node");
        Ok(id)
    }

    async fn copy(
        &self,
        source: &NodeId,
        target_container: &NodeId,
        name: &str,
    ) -> Result<NodeId> {
        let id = target_container.child(name);
        let src_path = self.locate(source);
        let dst_path = self.locate(&id);
        let meta = fs::metadata(&src_path).await.map_err(|e| map_io(source, e))?;
        if meta.is_dir() {
            self.copy_tree(src_path, dst_path).await.map_err(GatewayError::Backend)?;
        } else {
            fs::copy(&src_path, &dst_path).await.map_err(GatewayError::Backend)?;
        }
        debug!(source = %source, target = %id, "copied node");
        Ok(id)
    }

    async fn mv(&self, source: &NodeId, target_container: &NodeId, name: &str) -> Result<NodeId> {
        let id = target_container.child(name);
        fs::rename(self.locate(source), self.locate(&id))
            .await
            .map_err(|e| map_io(source, e))?;
        debug!(source = %source, target = %id, "moved node");
        Ok(id)
    }

    async fn remove(&self, id: &NodeId) -> Result<()> {
        let path = self.locate(id);
        let meta = fs::metadata(&path).await.map_err(|e| map_io(id, e))?;
        if meta.is_dir() {
            fs::remove_dir_all(&path).await.map_err(GatewayError::Backend)?;
        } else {
            fs::remove_file(&path).await.map_err(GatewayError::Backend)?;
        }
        debug!(id = %id, "removed node");
        Ok(())
    }

    async fn read(&self, id: &NodeId) -> Result<ByteStream<'static>> {
        let file = fs::File::open(self.locate(id)).await.map_err(|e| map_io(id, e))?;
        // ReaderStream pulls chunks on demand; dropping it closes the file.
        Ok(ReaderStream::new(file).boxed())
    }

    async fn write(&self, id: &NodeId, data: ByteStream<'_>) -> Result<NodeId> {
        let path = self.locate(id);
        let mut reader = StreamReader::new(data);
        let mut file = fs::File::create(&path).await.map_err(|e| map_io(id, e))?;
        tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(GatewayError::Backend)?;
        file.flush().await.map_err(GatewayError::Backend)?;
        Ok(id.clone())
    }
}

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

//! Opaque node identifiers.
//!
//! Clients never construct identifiers from raw paths; they echo back
//! identifiers previously issued by the gateway. Internally an identifier is
//! a normalized rooted path within the backend tree, with `/` as the root
//! sentinel. Identifiers are stable across renames performed by the gateway
//! itself and become invalid once the node they name is deleted.

use crate::error::{GatewayError, Result};
use serde::Serialize;
use std::fmt;

/// Opaque identifier for a node in the storage tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// The root container identifier.
    pub fn root() -> Self {
        NodeId("/".to_string())
    }

    /// Parses and normalizes a client-supplied identifier.
    ///
    /// Repeated and trailing slashes are collapsed. A malformed identifier
    /// can never name a live node, so it is reported as `NotFound` rather
    /// than a distinct error kind.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.starts_with('/') {
            return Err(GatewayError::not_found(raw));
        }
        if raw.contains('\0') || raw.contains('\\') {
            return Err(GatewayError::not_found(raw));
        }

        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(GatewayError::not_found(raw)),
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            Ok(NodeId::root())
        } else {
            Ok(NodeId(format!("/{}", segments.join("/"))))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the root sentinel.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The node's display name. Empty for the root.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// The containing folder's identifier, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(NodeId::root()),
            Some(idx) => Some(NodeId(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// The identifier a child with `name` would have inside this container.
    ///
    /// `name` must already have passed name validation; this only joins.
    pub fn child(&self, name: &str) -> NodeId {
        if self.is_root() {
            NodeId(format!("/{name}"))
        } else {
            NodeId(format!("{}/{name}", self.0))
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let id = NodeId::parse("/").unwrap();
        assert!(id.is_root());
        assert_eq!(id.as_str(), "/");
        assert_eq!(id.name(), "");
        assert!(id.parent().is_none());
    }

    #[test]
    fn test_parse_normalizes_slashes() {
        assert_eq!(NodeId::parse("/docs//a/").unwrap().as_str(), "/docs/a");
        assert_eq!(NodeId::parse("///").unwrap().as_str(), "/");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(NodeId::parse("").is_err());
        assert!(NodeId::parse("docs").is_err());
        assert!(NodeId::parse("/docs/../etc").is_err());
        assert!(NodeId::parse("/docs\\a").is_err());
        assert!(NodeId::parse("/docs\0").is_err());
    }

    #[test]
    fn test_parent_and_name() {
        let id = NodeId::parse("/docs/report.txt").unwrap();
        assert_eq!(id.name(), "report.txt");
        assert_eq!(id.parent().unwrap().as_str(), "/docs");
        assert_eq!(id.parent().unwrap().parent().unwrap().as_str(), "/");
    }

    #[test]
    fn test_child_join() {
        let root = NodeId::root();
        assert_eq!(root.child("docs").as_str(), "/docs");
        assert_eq!(root.child("docs").child("a.txt").as_str(), "/docs/a.txt");
    }
}

//! Scanner interface types.
//!
//! The directory walker lives in the host application and delivers one
//! complete, immutable [`FileTreeNode`] snapshot per scan. The core reads
//! these trees and never mutates them, and it never touches the file system
//! itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::seeded::fnv1a64;

/// Stable identity of a scanned node.
///
/// Derived from the FNV-1a hash of the absolute path, so rescanning an
/// unchanged tree yields identical ids and hosts may cache against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn from_path(path: &str) -> Self {
        NodeId(fnv1a64(path.as_bytes()))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:016x})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Folder,
    Symlink,
}

/// One scanned file-system entry.
#[derive(Debug, Clone)]
pub struct FileTreeNode {
    pub id: NodeId,
    /// Absolute path as reported by the scanner.
    pub path: String,
    /// Display name (last path component).
    pub name: String,
    pub kind: NodeKind,
    pub size_bytes: u64,
    /// Modification time, seconds since the Unix epoch.
    pub modified: u64,
    pub children: Vec<FileTreeNode>,
    pub hidden: bool,
    /// Set by the scanner when this node is a version-control repository root.
    pub is_git_repo: bool,
    /// Meaningful only when `is_git_repo` is set.
    pub git_clean: bool,
}

impl FileTreeNode {
    /// Build a file node. Hosts and tests use these constructors; the core
    /// itself never creates nodes.
    pub fn file(path: impl Into<String>, size_bytes: u64) -> Self {
        let path = path.into();
        Self {
            id: NodeId::from_path(&path),
            name: last_component(&path),
            path,
            kind: NodeKind::File,
            size_bytes,
            modified: 0,
            children: Vec::new(),
            hidden: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    pub fn folder(path: impl Into<String>, children: Vec<FileTreeNode>) -> Self {
        let path = path.into();
        let size_bytes = children.iter().map(|c| c.size_bytes).sum();
        Self {
            id: NodeId::from_path(&path),
            name: last_component(&path),
            path,
            kind: NodeKind::Folder,
            size_bytes,
            modified: 0,
            children,
            hidden: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    pub fn symlink(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: NodeId::from_path(&path),
            name: last_component(&path),
            path,
            kind: NodeKind::Symlink,
            size_bytes: 0,
            modified: 0,
            children: Vec::new(),
            hidden: false,
            is_git_repo: false,
            git_clean: true,
        }
    }

    pub fn with_modified(mut self, modified: u64) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_git_repo(mut self, clean: bool) -> Self {
        self.is_git_repo = true;
        self.git_clean = clean;
        self
    }

    pub fn with_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Depth-first lookup by id; how a picked block gets back to its path.
    pub fn find(&self, id: NodeId) -> Option<&FileTreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Lowercased extension of the display name, if any.
    pub fn extension(&self) -> Option<String> {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                Some(ext.to_ascii_lowercase())
            }
            _ => None,
        }
    }
}

fn last_component(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

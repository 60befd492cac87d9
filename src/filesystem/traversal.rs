use std::fmt;
use std::time::SystemTime;

use snafu::ensure;

use super::error::{FilesystemError, NotAFileSnafu};
use super::node::{NodeId, NodeKind, Permission};
use super::tree::Tree;
use crate::ext::SystemTimeExt;

/// One row of a flat listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: NodeKind,
    pub permission: Permission,
    pub modified: SystemTime,
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}{}\t{}",
            self.name,
            self.kind,
            self.permission,
            self.modified.to_timestamp()
        )
    }
}

/// Metadata of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub kind: NodeKind,
    pub permission: Permission,
    pub created: SystemTime,
    pub modified: SystemTime,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.name)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Permission: {}", self.permission)?;
        writeln!(f, "Created: {}", self.created.to_timestamp())?;
        write!(f, "Modified: {}", self.modified.to_timestamp())
    }
}

impl Tree {
    /// Absolute paths of every node named `name` in the subtree at `start`,
    /// in pre-order. The nameless root never matches.
    pub fn find_by_name(&self, start: NodeId, name: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            let node = &self[id];
            if !node.name().is_empty() && node.name() == name {
                found.push(self.absolute_path(id));
            }
            self.push_children_reversed(id, &mut pending);
        }
        found
    }

    pub fn list_children(&self, dir: NodeId) -> Vec<ListEntry> {
        self.children(dir)
            .map(|id| {
                let node = &self[id];
                ListEntry {
                    name: node.name().to_string(),
                    kind: node.kind(),
                    permission: node.permission(),
                    modified: node.modified(),
                }
            })
            .collect()
    }

    /// Every descendant of `dir` as a `/`-joined path relative to `dir`,
    /// parents before their children.
    pub fn list_tree(&self, dir: NodeId) -> Vec<String> {
        let mut lines = Vec::new();
        let mut pending: Vec<(NodeId, String)> = Vec::new();
        self.push_with_prefix(dir, "", &mut pending);

        while let Some((id, path)) = pending.pop() {
            self.push_with_prefix(id, &path, &mut pending);
            lines.push(path);
        }
        lines
    }

    fn push_children_reversed(&self, dir: NodeId, pending: &mut Vec<NodeId>) {
        let start = pending.len();
        pending.extend(self.children(dir));
        pending[start..].reverse();
    }

    fn push_with_prefix(&self, dir: NodeId, prefix: &str, pending: &mut Vec<(NodeId, String)>) {
        let start = pending.len();
        pending.extend(
            self.children(dir)
                .map(|child| (child, format!("{prefix}/{}", self[child].name()))),
        );
        pending[start..].reverse();
    }

    pub fn stat(&self, id: NodeId) -> Stat {
        let node = &self[id];
        Stat {
            name: node.name().to_string(),
            kind: node.kind(),
            permission: node.permission(),
            created: node.created(),
            modified: node.modified(),
        }
    }

    pub fn cat(&self, start: NodeId, path: &str) -> Result<&[String], FilesystemError> {
        let id = self.find_node(start, path)?;
        ensure!(!self[id].is_dir(), NotAFileSnafu { path });
        Ok(self[id].contents())
    }
}

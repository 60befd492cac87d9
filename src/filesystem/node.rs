use std::fmt;
use std::time::SystemTime;

use derive_more::{Display, From};

/// Handle to a node slot inside a [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    pub(super) const ROOT: NodeId = NodeId(0);

    pub(super) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(super) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("d")]
    Directory,
    #[display("-")]
    File,
}

impl NodeKind {
    pub fn noun(self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

/// Octal rwx bits of a node. Only ever displayed, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub struct Permission(u32);

impl Permission {
    pub const DEFAULT: Permission = Permission(6);

    pub fn as_str(self) -> &'static str {
        match self.0 {
            1 => "--x",
            2 => "-w-",
            3 => "-wx",
            4 => "r--",
            5 => "r-x",
            6 => "rw-",
            7 => "rwx",
            _ => "---",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the tree.
///
/// The link fields are written only by `Tree::link_first_child` and
/// `Tree::unlink`; everything else reads them through the accessors.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    created: SystemTime,
    modified: SystemTime,
    permission: Permission,
    contents: Vec<String>,
    pub(super) parent: Option<NodeId>,
    pub(super) first_child: Option<NodeId>,
    pub(super) next_sibling: Option<NodeId>,
}

impl Node {
    pub(super) fn new(parent: Option<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        let now = SystemTime::now();
        Self {
            name: name.into(),
            kind,
            created: now,
            modified: now,
            permission: Permission::DEFAULT,
            contents: Vec::new(),
            parent,
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    pub(super) fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
        self.modified = SystemTime::now();
    }

    pub(super) fn set_contents(&mut self, contents: Vec<String>) {
        self.contents = contents;
        self.modified = SystemTime::now();
    }
}

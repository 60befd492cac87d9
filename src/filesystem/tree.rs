use std::ops::Index;

use tracing::trace;

use super::node::{Node, NodeId, NodeKind};

/// First-child/next-sibling tree stored in an arena of slots.
///
/// Slot 0 holds the root, a nameless directory that lives as long as the tree.
/// Released slots are recycled by later insertions.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::new(None, "", NodeKind::Directory))],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[cfg(test)]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, root included.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Children of `dir` front to back, i.e. most recently created first.
    pub fn children(&self, dir: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self[dir].first_child,
        }
    }

    /// Renders the path from the root down to `id`. The root itself is `/`.
    pub fn absolute_path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            segments.push(self[node].name());
            current = self[node].parent;
        }
        segments.reverse();

        let path = segments.join("/");
        if path.is_empty() { "/".to_string() } else { path }
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("node {id} is not part of the tree"),
        }
    }

    pub(super) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Makes `child` the new head of `dir`'s sibling chain.
    pub(super) fn link_first_child(&mut self, dir: NodeId, child: NodeId) {
        let previous_head = self[dir].first_child;
        let node = self.node_mut(child);
        node.parent = Some(dir);
        node.next_sibling = previous_head;
        self.node_mut(dir).first_child = Some(child);
        trace!("Linked {child} as first child of {dir}");
    }

    /// Splices `id` out of its parent's chain and releases its slot.
    ///
    /// `previous` must be the sibling directly in front of `id`, or `None`
    /// when `id` is the head of the chain.
    pub(super) fn unlink(&mut self, id: NodeId, previous: Option<NodeId>) -> Option<Node> {
        let node = self.get(id)?;
        let (parent, next) = (node.parent, node.next_sibling);

        match (previous, parent) {
            (Some(previous), _) => self.node_mut(previous).next_sibling = next,
            (None, Some(parent)) => self.node_mut(parent).first_child = next,
            (None, None) => return None,
        }
        trace!("Unlinked {id}");

        let released = self.slots[id.index()].take();
        self.free.push(id);
        released
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id} is not part of the tree"),
        }
    }
}

/// Iterator over one sibling chain.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree[id].next_sibling;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(tree: &mut Tree, dir: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = tree.alloc(Node::new(Some(dir), name, kind));
        tree.link_first_child(dir, id);
        id
    }

    fn names(tree: &Tree, dir: NodeId) -> Vec<&str> {
        tree.children(dir).map(|id| tree[id].name()).collect()
    }

    #[test]
    fn fresh_tree_has_only_root() {
        let tree = Tree::new();
        let root = &tree[tree.root()];

        assert_eq!(tree.len(), 1);
        assert_eq!(root.name(), "");
        assert!(root.is_dir());
        assert_eq!(root.parent(), None);
        assert_eq!(tree.children(tree.root()).count(), 0);
    }

    #[test]
    fn linking_pushes_previous_head_down_the_chain() {
        let mut tree = Tree::new();
        let root = tree.root();
        attach(&mut tree, root, "x", NodeKind::Directory);
        attach(&mut tree, root, "y", NodeKind::Directory);
        attach(&mut tree, root, "z", NodeKind::File);

        assert_eq!(names(&tree, root), vec!["z", "y", "x"]);
    }

    #[test]
    fn unlink_head_middle_and_tail() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = attach(&mut tree, root, "a", NodeKind::File);
        let b = attach(&mut tree, root, "b", NodeKind::File);
        let c = attach(&mut tree, root, "c", NodeKind::File);
        let d = attach(&mut tree, root, "d", NodeKind::File);

        // chain: d c b a
        tree.unlink(c, Some(d));
        assert_eq!(names(&tree, root), vec!["d", "b", "a"]);

        tree.unlink(d, None);
        assert_eq!(names(&tree, root), vec!["b", "a"]);

        tree.unlink(a, Some(b));
        assert_eq!(names(&tree, root), vec!["b"]);
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(a));
    }

    #[test]
    fn fresh_slots_are_numbered_after_the_root() {
        let mut tree = Tree::new();
        let root = tree.root();
        let first = attach(&mut tree, root, "a", NodeKind::File);
        let second = attach(&mut tree, root, "b", NodeKind::File);

        assert_eq!(root, NodeId::ROOT);
        assert_eq!(first, NodeId::new(1));
        assert_eq!(second, NodeId::new(2));
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn released_slots_are_reused() {
        let mut tree = Tree::new();
        let root = tree.root();
        let first = attach(&mut tree, root, "tmp", NodeKind::File);
        tree.unlink(first, None);

        let second = attach(&mut tree, root, "again", NodeKind::File);

        assert_eq!(first, second);
        assert_eq!(tree[second].name(), "again");
    }

    #[test]
    fn root_cannot_be_unlinked() {
        let mut tree = Tree::new();
        let root = tree.root();

        assert!(tree.unlink(root, None).is_none());
        assert!(tree.contains(root));
    }

    #[test]
    fn absolute_path_walks_parents() {
        let mut tree = Tree::new();
        let root = tree.root();
        let home = attach(&mut tree, root, "home", NodeKind::Directory);
        let user = attach(&mut tree, home, "user", NodeKind::Directory);

        assert_eq!(tree.absolute_path(root), "/");
        assert_eq!(tree.absolute_path(home), "/home");
        assert_eq!(tree.absolute_path(user), "/home/user");
    }
}

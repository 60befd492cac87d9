use std::fmt;

use derive_more::Display;
use snafu::{OptionExt, ensure};
use tracing::debug;

use super::error::{
    FilesystemError, InvalidModeSnafu, InvalidNameSnafu, NotADirectorySnafu, NotAFileSnafu,
    NotEmptySnafu, NotFoundSnafu,
};
use super::node::{Node, NodeId, NodeKind, Permission};
use super::path::split_name;
use super::tree::Tree;

/// A freshly linked node and the path it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: NodeId,
    pub kind: NodeKind,
    pub path: String,
}

impl fmt::Display for Created {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "created {} '{}'", self.kind.noun(), self.path)
    }
}

/// An unlinked node. `id` is no longer valid in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("removed '{path}'")]
pub struct Removed {
    pub id: NodeId,
    pub parent: NodeId,
    pub path: String,
}

impl Tree {
    /// Creates a node named by the last segment of `path` inside the
    /// directory named by the rest, and makes it that directory's first child.
    ///
    /// Names are not checked against existing siblings: a duplicate shadows
    /// the older entry for every later lookup.
    pub fn create(
        &mut self,
        start: NodeId,
        path: &str,
        kind: NodeKind,
    ) -> Result<Created, FilesystemError> {
        let (dir_path, name) = split_name(path.trim_end_matches('/'));
        ensure!(!matches!(name, "" | "." | ".."), InvalidNameSnafu { path });

        let dir = self.walk(start, dir_path, path)?;
        ensure!(self[dir].is_dir(), NotADirectorySnafu { path });

        let id = self.alloc(Node::new(Some(dir), name, kind));
        self.link_first_child(dir, id);
        debug!("Created {} {id} at '{path}'", kind.noun());

        Ok(Created {
            id,
            kind,
            path: path.to_string(),
        })
    }

    /// Unlinks and releases the entry named by `path`.
    ///
    /// Directories must be empty first; there is no recursive variant.
    pub fn remove(&mut self, start: NodeId, path: &str) -> Result<Removed, FilesystemError> {
        let (dir_path, name) = split_name(path.trim_end_matches('/'));
        let dir = self.walk(start, dir_path, path)?;

        let mut previous = None;
        let mut current = self[dir].first_child;
        while let Some(id) = current {
            if self[id].name() == name {
                break;
            }
            previous = current;
            current = self[id].next_sibling;
        }

        let target = current.context(NotFoundSnafu { path })?;
        let node = &self[target];
        ensure!(
            !(node.is_dir() && node.has_children()),
            NotEmptySnafu { path }
        );

        self.unlink(target, previous)
            .context(NotFoundSnafu { path })?;
        debug!("Removed {target} at '{path}'");

        Ok(Removed {
            id: target,
            parent: dir,
            path: path.to_string(),
        })
    }

    /// Sets the display permission of the entry at `path` from an octal
    /// digit string.
    pub fn chmod(
        &mut self,
        start: NodeId,
        path: &str,
        mode: &str,
    ) -> Result<NodeId, FilesystemError> {
        let id = self.find_node(start, path)?;
        let bits = u32::from_str_radix(mode, 8)
            .ok()
            .filter(|bits| *bits <= 7)
            .context(InvalidModeSnafu { mode })?;

        self.node_mut(id).set_permission(Permission::from(bits));
        debug!("Changed permission of {id} to {bits:o}");
        Ok(id)
    }

    /// Replaces a file's lines. Used when seeding a layout.
    pub fn set_contents(
        &mut self,
        id: NodeId,
        contents: Vec<String>,
    ) -> Result<(), FilesystemError> {
        ensure!(
            !self[id].is_dir(),
            NotAFileSnafu {
                path: self.absolute_path(id)
            }
        );
        self.node_mut(id).set_contents(contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn names(tree: &Tree, dir: NodeId) -> Vec<&str> {
        tree.children(dir).map(|id| tree[id].name()).collect()
    }

    #[test]
    fn create_then_resolve_round_trips() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create(root, "/a", NodeKind::Directory).unwrap();
        let created = tree.create(root, "/a/b", NodeKind::Directory).unwrap();

        assert_eq!(tree.resolve(root, "/a/b"), Ok(created.id));
        assert_eq!(tree.absolute_path(created.id), "/a/b");
        assert_eq!(created.to_string(), "created directory '/a/b'");
    }

    #[test]
    fn create_file_confirmation_text() {
        let mut tree = Tree::new();
        let root = tree.root();
        let created = tree.create(root, "notes.txt", NodeKind::File).unwrap();

        assert_eq!(created.to_string(), "created file 'notes.txt'");
        assert_eq!(tree[created.id].kind(), NodeKind::File);
    }

    #[test]
    fn absolute_name_lands_under_root_from_anywhere() {
        let mut tree = Tree::new();
        let root = tree.root();
        let x = tree.create(root, "/x", NodeKind::Directory).unwrap().id;

        let home = tree.create(x, "/home", NodeKind::Directory).unwrap();

        assert_eq!(tree.absolute_path(home.id), "/home");
        assert_eq!(tree[home.id].parent(), Some(root));
    }

    #[test]
    fn siblings_are_listed_most_recent_first() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create(root, "/x", NodeKind::Directory).unwrap();
        tree.create(root, "/y", NodeKind::Directory).unwrap();

        assert_eq!(names(&tree, root), vec!["y", "x"]);
    }

    #[test]
    fn duplicate_names_shadow_older_entries() {
        let mut tree = Tree::new();
        let root = tree.root();
        let older = tree.create(root, "dup", NodeKind::Directory).unwrap();
        let newer = tree.create(root, "dup", NodeKind::File).unwrap();

        assert_ne!(older.id, newer.id);
        assert_eq!(tree.resolve(root, "dup"), Ok(newer.id));
        assert_eq!(tree.children(root).next(), Some(newer.id));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn create_with_missing_parent_has_no_side_effect() {
        let mut tree = Tree::new();
        let root = tree.root();

        let result = tree.create(root, "/missing/child", NodeKind::File);

        assert_eq!(
            result,
            Err(FilesystemError::NotFound {
                path: "/missing/child".to_string()
            })
        );
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("a/.")]
    #[case("..")]
    fn create_rejects_unreachable_names(#[case] path: &str) {
        let mut tree = Tree::new();
        let root = tree.root();

        assert_eq!(
            tree.create(root, path, NodeKind::Directory),
            Err(FilesystemError::InvalidName {
                path: path.to_string()
            })
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn create_strips_trailing_slashes() {
        let mut tree = Tree::new();
        let root = tree.root();
        let created = tree.create(root, "docs/", NodeKind::Directory).unwrap();

        assert_eq!(tree[created.id].name(), "docs");
        assert_eq!(created.to_string(), "created directory 'docs/'");
    }

    #[test]
    fn create_inside_a_file_is_rejected() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.create(root, "f", NodeKind::File).unwrap();

        assert_eq!(
            tree.create(root, "f/inner", NodeKind::File),
            Err(FilesystemError::NotADirectory {
                path: "f/inner".to_string()
            })
        );
    }

    #[test]
    fn remove_unlinks_from_any_chain_position() {
        let mut tree = Tree::new();
        let root = tree.root();
        for name in ["a", "b", "c"] {
            tree.create(root, name, NodeKind::File).unwrap();
        }

        let removed = tree.remove(root, "b").unwrap();
        assert_eq!(removed.to_string(), "removed 'b'");
        assert_eq!(removed.parent, root);
        assert_eq!(names(&tree, root), vec!["c", "a"]);

        tree.remove(root, "/c").unwrap();
        tree.remove(root, "a").unwrap();
        assert!(names(&tree, root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_refuses_non_empty_directory() {
        let mut tree = Tree::new();
        let root = tree.root();
        let dir = tree.create(root, "/d", NodeKind::Directory).unwrap().id;
        let child = tree.create(root, "/d/f", NodeKind::File).unwrap().id;

        assert_eq!(
            tree.remove(root, "/d"),
            Err(FilesystemError::NotEmpty {
                path: "/d".to_string()
            })
        );
        assert_eq!(tree.resolve(root, "/d"), Ok(dir));
        assert_eq!(tree.resolve(root, "/d/f"), Ok(child));

        tree.remove(root, "/d/f").unwrap();
        tree.remove(root, "/d").unwrap();
        assert!(tree.resolve(root, "/d").is_err());
    }

    #[rstest]
    #[case("/nope")]
    #[case("/nope/deeper")]
    #[case("/")]
    #[case("")]
    fn remove_missing_entry_fails(#[case] path: &str) {
        let mut tree = Tree::new();
        let root = tree.root();

        assert_eq!(
            tree.remove(root, path),
            Err(FilesystemError::NotFound {
                path: path.to_string()
            })
        );
        assert!(tree.contains(root));
    }

    #[test]
    fn remove_takes_the_front_most_duplicate() {
        let mut tree = Tree::new();
        let root = tree.root();
        let older = tree.create(root, "dup", NodeKind::File).unwrap().id;
        let newer = tree.create(root, "dup", NodeKind::File).unwrap().id;

        assert_eq!(tree.remove(root, "dup").unwrap().id, newer);
        assert_eq!(tree.resolve(root, "dup"), Ok(older));
    }

    #[rstest]
    #[case("7", "rwx")]
    #[case("0", "---")]
    #[case("04", "r--")]
    fn chmod_updates_permission(#[case] mode: &str, #[case] expected: &str) {
        let mut tree = Tree::new();
        let root = tree.root();
        let file = tree.create(root, "f", NodeKind::File).unwrap().id;

        assert_eq!(tree.chmod(root, "f", mode), Ok(file));
        assert_eq!(tree[file].permission().to_string(), expected);
    }

    #[rstest]
    #[case("8")]
    #[case("17")]
    #[case("rw")]
    #[case("")]
    fn chmod_rejects_invalid_modes(#[case] mode: &str) {
        let mut tree = Tree::new();
        let root = tree.root();
        let file = tree.create(root, "f", NodeKind::File).unwrap().id;

        assert_eq!(
            tree.chmod(root, "f", mode),
            Err(FilesystemError::InvalidMode {
                mode: mode.to_string()
            })
        );
        assert_eq!(tree[file].permission(), Permission::DEFAULT);
    }

    #[test]
    fn set_contents_only_applies_to_files() {
        let mut tree = Tree::new();
        let root = tree.root();
        let file = tree.create(root, "f", NodeKind::File).unwrap().id;
        let dir = tree.create(root, "d", NodeKind::Directory).unwrap().id;

        tree.set_contents(file, vec!["hello".into()]).unwrap();
        assert_eq!(tree[file].contents(), ["hello".to_string()]);
        assert_eq!(
            tree.set_contents(dir, Vec::new()),
            Err(FilesystemError::NotAFile {
                path: "/d".to_string()
            })
        );
    }
}

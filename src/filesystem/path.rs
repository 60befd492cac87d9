use snafu::OptionExt;
use tracing::trace;

use super::error::{FilesystemError, NotFoundSnafu};
use super::node::NodeId;
use super::tree::Tree;

/// Splits `path` at its last `/` into the containing path and the final name.
///
/// A name directly under the root keeps `/` as its containing path, so
/// `/a` splits into `("/", "a")` rather than `("", "a")`.
pub(super) fn split_name(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

impl Tree {
    /// Walks `path` from `start` and returns the node it names.
    ///
    /// A leading `/` restarts from the root, empty segments are skipped, `.`
    /// stays put and `..` climbs to the parent (clamped at the root). Kinds
    /// are not checked: a path may end on a file.
    pub fn resolve(&self, start: NodeId, path: &str) -> Result<NodeId, FilesystemError> {
        self.walk(start, path, path)
    }

    /// Linear scan of `dir`'s sibling chain. The front-most match wins.
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir).find(|&child| self[child].name() == name)
    }

    /// Looks up the entry a path names, treating the final segment as a
    /// child of the containing path.
    pub fn find_node(&self, start: NodeId, path: &str) -> Result<NodeId, FilesystemError> {
        match split_name(path.trim_end_matches('/')) {
            (_, "" | "." | "..") => self.resolve(start, path),
            (dir_path, name) => {
                let dir = self.walk(start, dir_path, path)?;
                self.find_child(dir, name).context(NotFoundSnafu { path })
            }
        }
    }

    /// Like [`Tree::resolve`], but failures report `reported` instead of the
    /// walked path.
    pub(super) fn walk(
        &self,
        start: NodeId,
        path: &str,
        reported: &str,
    ) -> Result<NodeId, FilesystemError> {
        if path.is_empty() {
            return Ok(start);
        }

        let (mut current, relative) = match path.strip_prefix('/') {
            Some(rest) => (self.root(), rest),
            None => (start, path),
        };

        for segment in relative.split('/').filter(|segment| !segment.is_empty()) {
            current = match segment {
                "." => current,
                ".." => self[current].parent().unwrap_or(current),
                name => self
                    .find_child(current, name)
                    .context(NotFoundSnafu { path: reported })?,
            };
        }

        trace!("Resolved '{path}' from {start} to {current}");
        Ok(current)
    }
}

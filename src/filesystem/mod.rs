//! In-memory directory tree.
//!
//! Nodes are kept in an arena and threaded together first-child/next-sibling
//! style: every directory points at its newest child, and each child points
//! at the sibling created before it. Lookups scan that chain front to back,
//! so the most recently created entry of a given name always wins.

mod error;
mod mutation;
mod node;
mod path;
mod traversal;
mod tree;

pub use error::FilesystemError;
pub use node::{NodeId, NodeKind};
pub use tree::Tree;

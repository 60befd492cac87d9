//! Command dispatch on top of the directory tree.
//!
//! A [`Session`] owns the tree and the current directory, parses each input
//! line into a command and answers with the text to print.

mod command;
mod session;

pub use command::HELP;
pub use session::{Outcome, Session};

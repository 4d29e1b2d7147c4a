//! Directory walking

mod walker;

pub use walker::{read_entries, walk_tree, TreeWalker};

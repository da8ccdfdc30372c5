//! File tree indexing
//!
//! Turns the flat, unordered entry list of a `FileStorage` into a directory
//! structure that can be listed level by level:
//!
//! - `FileTreeIndex`: sorted permutation plus one `DirectoryNode` per directory
//! - `DirectoryContentEntry`: an immediate child returned by a listing

mod index;

pub use index::{DirectoryContentEntry, DirectoryNode, FileTreeIndex, NodeId};

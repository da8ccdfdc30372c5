//! filetree - Index and render the file tree of an archive manifest

pub mod error;
pub mod listing;
pub mod logging;
pub mod output;
pub mod stats;
pub mod storage;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{Error, Result};
pub use listing::list_files;
pub use output::{
    FileVerifier, LineDecoration, TreeLine, TreeOptions, TreePrinter, TreeStyle, VerifyReport,
    format_file_tree, format_json, format_size, format_verify_file_tree, print_json,
};
pub use stats::{FileStats, format_file_stats};
pub use storage::{FileEntry, FileStorage, Manifest, TreePath};
pub use tree::{DirectoryContentEntry, FileTreeIndex};

//! Archive file storage
//!
//! The read-only collaborator the tree index is built from:
//!
//! - `path` - Normalized segment paths (`TreePath`)
//! - `entry` - File entries and the ordered `FileStorage`
//! - `manifest` - Loading a storage from a JSON manifest

mod entry;
mod manifest;
mod path;

pub use entry::{FileEntry, FileStorage};
pub use manifest::Manifest;
pub use path::TreePath;

//! Error types for manifest loading and tree construction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a manifest or building a file storage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("duplicate path: {0}")]
    DuplicatePath(String),

    #[error("'{file}' is a file but also a directory of '{nested}'")]
    PathConflict { file: String, nested: String },

    #[error("total file size exceeds {} bytes", u64::MAX)]
    SizeOverflow,

    #[error("no such directory: {0}")]
    UnknownDirectory(String),

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

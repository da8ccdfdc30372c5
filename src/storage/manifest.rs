//! JSON manifest loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::entry::{FileEntry, FileStorage};
use crate::error::{Error, Result};

/// On-disk description of an archive's file list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub files: Vec<FileEntry>,
}

impl Manifest {
    pub fn from_json(path: &Path, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    pub fn into_storage(self) -> Result<FileStorage> {
        let storage = FileStorage::new(self.files)?;
        tracing::debug!(
            name = self.name.as_deref().unwrap_or(""),
            files = storage.len(),
            "loaded manifest"
        );
        Ok(storage)
    }
}

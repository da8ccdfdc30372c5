//! File entries and the ordered storage that owns them.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::path::TreePath;
use crate::error::{Error, Result};

/// A single file of an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: TreePath,
    pub size: u64,
    /// Alignment filler rather than real payload.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub padding: bool,
}

impl FileEntry {
    pub fn new(path: TreePath, size: u64) -> Self {
        Self {
            path,
            size,
            padding: false,
        }
    }

    pub fn padding(path: TreePath, size: u64) -> Self {
        Self {
            path,
            size,
            padding: true,
        }
    }

    pub fn name(&self) -> &str {
        self.path.file_name().unwrap_or_default()
    }
}

impl PartialOrd for FileEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then(self.size.cmp(&other.size))
            .then(self.padding.cmp(&other.padding))
    }
}

/// Immutable, ordered collection of file entries.
///
/// Entries keep their insertion order. Construction guarantees that paths
/// are non-empty and unique, and that no file path is also used as a
/// directory by another entry.
#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    entries: Vec<FileEntry>,
}

impl FileStorage {
    pub fn new(entries: Vec<FileEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut total: u64 = 0;
        for entry in &entries {
            if entry.path.is_root() {
                return Err(Error::InvalidPath(String::new()));
            }
            if !seen.insert(&entry.path) {
                return Err(Error::DuplicatePath(entry.path.to_string()));
            }
            total = total.checked_add(entry.size).ok_or(Error::SizeOverflow)?;
        }

        // Once sorted, a file that shadows a directory is immediately
        // followed by one of the paths below it.
        let mut sorted: Vec<&TreePath> = entries.iter().map(|e| &e.path).collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[0].is_prefix_of(pair[1]) {
                return Err(Error::PathConflict {
                    file: pair[0].to_string(),
                    nested: pair[1].to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Sum of all entry sizes, padding included.
    ///
    /// Never overflows: construction rejects storages whose total does not
    /// fit in a `u64`, and every partial sum is bounded by it.
    pub fn total_file_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Sum of the sizes of non-padding entries.
    pub fn total_regular_file_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| !e.padding)
            .map(|e| e.size)
            .sum()
    }

    /// True when `dir` contains at least one entry and all of them are padding.
    pub fn is_padding_directory(&self, dir: &TreePath) -> bool {
        let mut below = self
            .entries
            .iter()
            .filter(|e| dir.is_prefix_of(&e.path) && e.path.len() > dir.len())
            .peekable();
        below.peek().is_some() && below.all(|e| e.padding)
    }
}

impl std::ops::Index<usize> for FileStorage {
    type Output = FileEntry;

    fn index(&self, index: usize) -> &FileEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a FileStorage {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Test utilities for writing temporary manifests and reports.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::storage::{FileEntry, FileStorage, Manifest, TreePath};

/// A manifest under construction, backed by a temporary directory.
///
/// The directory is removed when the value is dropped.
pub struct TestManifest {
    dir: TempDir,
    name: Option<String>,
    files: Vec<FileEntry>,
    report: BTreeMap<String, f64>,
}

impl TestManifest {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            name: None,
            files: Vec::new(),
            report: BTreeMap::new(),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn add_file(&mut self, path: &str, size: u64) -> &mut Self {
        let path = TreePath::parse(path).expect("Invalid test path");
        self.files.push(FileEntry::new(path, size));
        self
    }

    pub fn add_padding(&mut self, path: &str, size: u64) -> &mut Self {
        let path = TreePath::parse(path).expect("Invalid test path");
        self.files.push(FileEntry::padding(path, size));
        self
    }

    /// Record a verification result for `path`.
    pub fn add_verified(&mut self, path: &str, completion: f64) -> &mut Self {
        self.report.insert(path.to_string(), completion);
        self
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.files.clone()).expect("Invalid test storage")
    }

    /// Write the manifest as `manifest.json` and return its path.
    pub fn write(&self) -> PathBuf {
        let manifest = Manifest {
            name: self.name.clone(),
            files: self.files.clone(),
        };
        let json = serde_json::to_string_pretty(&manifest).expect("Failed to serialize manifest");
        let path = self.dir.path().join("manifest.json");
        fs::write(&path, json).expect("Failed to write manifest");
        path
    }

    /// Write the verification results as `report.json` and return its path.
    pub fn write_report(&self) -> PathBuf {
        let json = serde_json::to_string_pretty(&self.report).expect("Failed to serialize report");
        let path = self.dir.path().join("report.json");
        fs::write(&path, json).expect("Failed to write report");
        path
    }

    /// Write arbitrary content next to the manifest.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// A synthetic storage of `dirs` directories, each holding `depth` nested
/// levels with `files_per_dir` files at the bottom, plus one padding file
/// after every directory.
pub fn synthetic_storage(dirs: usize, depth: usize, files_per_dir: usize) -> FileStorage {
    let mut entries = Vec::with_capacity(dirs * (files_per_dir + 1));
    for d in 0..dirs {
        let mut base = format!("dir{:04}", d);
        for level in 0..depth {
            base.push_str(&format!("/level{}", level));
        }
        for f in 0..files_per_dir {
            let path = TreePath::parse(&format!("{}/file{:04}.bin", base, f))
                .expect("Invalid synthetic path");
            entries.push(FileEntry::new(path, (d * 1000 + f) as u64 + 1));
        }
        let pad = TreePath::parse(&format!(".pad/{}", d)).expect("Invalid synthetic path");
        entries.push(FileEntry::padding(pad, 16));
    }
    FileStorage::new(entries).expect("Invalid synthetic storage")
}

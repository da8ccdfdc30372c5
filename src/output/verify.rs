//! Verification overlay for the file tree.
//!
//! Decorates each file line with how much of the file was found intact by
//! a storage verifier. The walk and the directory sizes are the ones of
//! the plain tree; only the per-line decoration differs.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use termcolor::{Color, ColorSpec};

use crate::error::{Error, Result};
use crate::storage::{FileEntry, FileStorage, TreePath};

use super::config::TreeOptions;
use super::style::TreeStyle;
use super::tree::{Decoration, LineDecoration, TreePrinter};

/// Source of per-file verification results.
pub trait FileVerifier {
    /// Completed fraction of `entry` in `[0, 1]`, or `None` if unknown.
    fn completion(&self, entry: &FileEntry) -> Option<f64>;
}

impl<V: FileVerifier + ?Sized> FileVerifier for &V {
    fn completion(&self, entry: &FileEntry) -> Option<f64> {
        (**self).completion(entry)
    }
}

/// Verification state of one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerifyStatus {
    Complete,
    Partial(f64),
    Missing,
    Unknown,
}

impl VerifyStatus {
    pub fn from_completion(completion: Option<f64>) -> Self {
        match completion {
            None => VerifyStatus::Unknown,
            Some(c) if c.is_nan() => VerifyStatus::Unknown,
            Some(c) if c >= 1.0 => VerifyStatus::Complete,
            Some(c) if c <= 0.0 => VerifyStatus::Missing,
            Some(c) => VerifyStatus::Partial(c),
        }
    }

    pub fn label(&self) -> String {
        match self {
            VerifyStatus::Complete => "100%".to_string(),
            VerifyStatus::Partial(c) => format!("{:.1}%", c * 100.0),
            VerifyStatus::Missing => "0%".to_string(),
            VerifyStatus::Unknown => "?".to_string(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            VerifyStatus::Complete => Color::Green,
            VerifyStatus::Partial(_) => Color::Yellow,
            VerifyStatus::Missing | VerifyStatus::Unknown => Color::Red,
        }
    }
}

/// Verification results loaded from JSON, keyed by file path.
///
/// The JSON form is an object mapping each path to its completed fraction,
/// e.g. `{"a/x.txt": 1.0, "a/y.txt": 0.25}`. Fractions are clamped to
/// `[0, 1]` however the report is built.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct VerifyReport {
    completion: HashMap<TreePath, f64>,
}

impl VerifyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: TreePath, completion: f64) {
        self.completion.insert(path, completion.clamp(0.0, 1.0));
    }

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

    /// Report paths that match no file of `storage`, sorted.
    pub fn unmatched_paths<'r>(&'r self, storage: &FileStorage) -> Vec<&'r TreePath> {
        let known: HashSet<&TreePath> = storage.iter().map(|e| &e.path).collect();
        let mut unmatched: Vec<&TreePath> = self
            .completion
            .keys()
            .filter(|path| !known.contains(path))
            .collect();
        unmatched.sort();
        unmatched
    }
}

impl FromIterator<(TreePath, f64)> for VerifyReport {
    fn from_iter<I: IntoIterator<Item = (TreePath, f64)>>(iter: I) -> Self {
        let mut report = Self::new();
        for (path, completion) in iter {
            report.insert(path, completion);
        }
        report
    }
}

impl<'de> Deserialize<'de> for VerifyReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = HashMap::<TreePath, f64>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl FileVerifier for VerifyReport {
    fn completion(&self, entry: &FileEntry) -> Option<f64> {
        self.completion.get(&entry.path).copied()
    }
}

/// Decoration showing the verification status of file lines.
#[derive(Debug, Clone)]
pub struct VerifyDecoration<V> {
    verifier: V,
}

impl<V: FileVerifier> VerifyDecoration<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }
}

impl<V: FileVerifier> LineDecoration for VerifyDecoration<V> {
    fn decorate(&self, entry: Option<&FileEntry>) -> Option<Decoration> {
        let entry = entry?;
        let status = VerifyStatus::from_completion(self.verifier.completion(entry));
        let mut style = ColorSpec::new();
        style.set_fg(Some(status.color()));
        Some(Decoration {
            text: status.label(),
            style,
        })
    }
}

/// Render the file tree of `storage` with verification status per file.
pub fn format_verify_file_tree<V: FileVerifier>(
    storage: &FileStorage,
    verifier: V,
    prefix: &str,
    options: &TreeOptions,
    style: TreeStyle,
) -> io::Result<String> {
    let mut printer = TreePrinter::new(storage, prefix, options.clone())
        .with_style(style)
        .with_decoration(VerifyDecoration::new(verifier));
    printer.walk_root()?;
    Ok(printer.result())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn path(s: &str) -> TreePath {
        TreePath::parse(s).unwrap()
    }

    fn sample() -> FileStorage {
        FileStorage::new(vec![
            FileEntry::new(path("a/x.txt"), 10),
            FileEntry::new(path("a/y.txt"), 20),
            FileEntry::new(path("b.txt"), 5),
        ])
        .unwrap()
    }

    #[test]
    fn test_status_from_completion() {
        assert_eq!(VerifyStatus::from_completion(Some(1.0)), VerifyStatus::Complete);
        assert_eq!(VerifyStatus::from_completion(Some(0.0)), VerifyStatus::Missing);
        assert_eq!(VerifyStatus::from_completion(Some(0.5)), VerifyStatus::Partial(0.5));
        assert_eq!(VerifyStatus::from_completion(None), VerifyStatus::Unknown);
        assert_eq!(VerifyStatus::from_completion(Some(f64::NAN)), VerifyStatus::Unknown);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(VerifyStatus::Complete.label(), "100%");
        assert_eq!(VerifyStatus::Partial(0.255).label(), "25.5%");
        assert_eq!(VerifyStatus::Missing.label(), "0%");
        assert_eq!(VerifyStatus::Unknown.label(), "?");
    }

    #[test]
    fn test_verify_tree_decorates_files_only() {
        let storage = sample();
        let mut report = VerifyReport::new();
        report.insert(path("a/x.txt"), 1.0);
        report.insert(path("a/y.txt"), 0.5);

        let options = TreeOptions {
            show_directory_size: false,
            ..TreeOptions::plain()
        };
        let output =
            format_verify_file_tree(&storage, &report, "", &options, TreeStyle::default()).unwrap();
        assert_eq!(
            output,
            "├── a\n│   ├── x.txt 10 B 100%\n│   └── y.txt 20 B 50.0%\n└── b.txt 5 B ?\n"
        );
    }

    #[test]
    fn test_report_from_json_clamps() {
        let json = r#"{"a/x.txt": 1.5, "b.txt": -1}"#;
        let report = VerifyReport::from_json(&PathBuf::from("r.json"), json).unwrap();
        let storage = sample();
        assert_eq!(report.completion(&storage[0]), Some(1.0));
        assert_eq!(report.completion(&storage[2]), Some(0.0));
        assert_eq!(report.completion(&storage[1]), None);
    }

    #[test]
    fn test_deserialize_clamps() {
        let json = r#"{"a/x.txt": 2.0, "b.txt": -0.5}"#;
        let report: VerifyReport = serde_json::from_str(json).unwrap();
        let storage = sample();
        assert_eq!(report.completion(&storage[0]), Some(1.0));
        assert_eq!(report.completion(&storage[2]), Some(0.0));
    }

    #[test]
    fn test_collect_clamps() {
        let report: VerifyReport = vec![(path("a/y.txt"), 3.0)].into_iter().collect();
        assert_eq!(report.completion(&sample()[1]), Some(1.0));
    }

    #[test]
    fn test_unmatched_paths() {
        let mut report = VerifyReport::new();
        report.insert(path("a/x.txt"), 1.0);
        report.insert(path("gone.txt"), 1.0);
        let storage = sample();
        assert_eq!(report.unmatched_paths(&storage), vec![&path("gone.txt")]);
    }
}

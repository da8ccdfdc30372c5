//! Normalized, segment-based relative paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A relative path stored as its segments.
///
/// Ordering compares segment by segment, so `a/b` sorts before `a.txt`
/// and every path under a directory is contiguous once sorted. The empty
/// path is the archive root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-separated path, dropping empty and `.` segments.
    pub fn parse(s: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for segment in s.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(Error::InvalidPath(s.to_string())),
                _ => segments.push(segment.to_string()),
            }
        }
        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append one segment.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &TreePath) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Segments of `self` below `base`, if `base` is a prefix.
    pub fn strip_prefix(&self, base: &TreePath) -> Option<&[String]> {
        self.segments.strip_prefix(base.segments.as_slice())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl TryFrom<String> for TreePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TreePath> for String {
    fn from(path: TreePath) -> Self {
        path.to_string()
    }
}

//! Directory index over a sorted permutation of the storage entries.
//!
//! Sorting entries by path puts every entry below a directory into one
//! contiguous block, so each directory is described by a half-open range
//! `[first, last)` into the sorted permutation. A single forward pass over
//! the sorted entries is enough to create every directory node and
//! aggregate its size.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::storage::{FileEntry, FileStorage, TreePath};

/// Index of a node in the directory arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// One directory of the tree.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    name: String,
    /// Position of the first entry below this directory in the sorted index.
    first: usize,
    /// One past the last entry below this directory.
    last: usize,
    total_size: u64,
    padding_only: bool,
    children: BTreeMap<String, NodeId>,
}

impl DirectoryNode {
    fn new(name: String, first: usize, last: usize, total_size: u64, padding_only: bool) -> Self {
        Self {
            name,
            first,
            last,
            total_size,
            padding_only,
            children: BTreeMap::new(),
        }
    }

    /// Directory name, empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> Range<usize> {
        self.first..self.last
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Every file below this directory is a padding file.
    pub fn is_padding_only(&self) -> bool {
        self.padding_only
    }
}

/// An immediate child of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryContentEntry<'a> {
    Directory(&'a str),
    File(&'a FileEntry),
}

impl<'a> DirectoryContentEntry<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            DirectoryContentEntry::Directory(name) => name,
            DirectoryContentEntry::File(entry) => entry.name(),
        }
    }

    pub fn entry(&self) -> Option<&'a FileEntry> {
        match *self {
            DirectoryContentEntry::Directory(_) => None,
            DirectoryContentEntry::File(entry) => Some(entry),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DirectoryContentEntry::Directory(_))
    }
}

/// Directory structure derived from a `FileStorage`.
///
/// The index borrows the storage and is read-only once built.
#[derive(Debug)]
pub struct FileTreeIndex<'a> {
    storage: &'a FileStorage,
    indices: Vec<usize>,
    nodes: Vec<DirectoryNode>,
    list_padding_files: bool,
}

impl<'a> FileTreeIndex<'a> {
    pub fn new(storage: &'a FileStorage, list_padding_files: bool) -> Self {
        let indices = sorted_indices(storage);
        let nodes = build_directory_nodes(storage, &indices);

        tracing::debug!(
            entries = indices.len(),
            directories = nodes.len() - 1,
            list_padding_files,
            "built file tree index"
        );

        Self {
            storage,
            indices,
            nodes,
            list_padding_files,
        }
    }

    pub fn storage(&self) -> &'a FileStorage {
        self.storage
    }

    pub fn list_padding_files(&self) -> bool {
        self.list_padding_files
    }

    /// Storage positions in path order.
    pub fn sorted_indices(&self) -> &[usize] {
        &self.indices
    }

    /// Entry at `position` of the sorted permutation.
    pub fn sorted_entry(&self, position: usize) -> &'a FileEntry {
        let storage: &'a FileStorage = self.storage;
        &storage[self.indices[position]]
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.nodes[ROOT]
    }

    /// Every registered directory except the root, in creation order.
    pub fn directories(&self) -> impl Iterator<Item = &DirectoryNode> {
        self.nodes.iter().skip(1)
    }

    /// Number of registered directories, root excluded.
    pub fn directory_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn directory(&self, path: &TreePath) -> Option<&DirectoryNode> {
        self.lookup(path).map(|id| &self.nodes[id])
    }

    pub fn contains_directory(&self, path: &TreePath) -> bool {
        self.lookup(path).is_some()
    }

    pub fn directory_range(&self, path: &TreePath) -> Option<Range<usize>> {
        self.directory(path).map(DirectoryNode::range)
    }

    pub fn directory_size(&self, path: &TreePath) -> Option<u64> {
        self.directory(path).map(DirectoryNode::total_size)
    }

    /// Aggregate size of a directory.
    ///
    /// # Panics
    ///
    /// Panics if `path` was never registered. Callers must only pass paths
    /// obtained from this index.
    pub fn get_directory_size(&self, path: &TreePath) -> u64 {
        self.node(path).total_size
    }

    /// Whether a directory is hidden because it only holds padding files.
    pub fn is_suppressed(&self, path: &TreePath) -> bool {
        self.is_node_suppressed(self.node(path))
    }

    pub fn is_node_suppressed(&self, node: &DirectoryNode) -> bool {
        !self.list_padding_files && node.padding_only
    }

    /// Immediate children of a directory in path order.
    ///
    /// Padding files and padding-only directories are left out unless the
    /// index was built with `list_padding_files`.
    ///
    /// # Panics
    ///
    /// Panics if `path` was never registered.
    pub fn list_directory_content(&self, path: &TreePath) -> Vec<DirectoryContentEntry<'a>> {
        let node = self.node(path);
        let depth = path.len();
        let mut out = Vec::new();

        let mut i = node.first;
        while i < node.last {
            let entry = self.sorted_entry(i);
            let rest = &entry.path.segments()[depth..];

            if rest.len() > 1 {
                // Collapse the whole subdirectory into one item.
                let name = rest[0].as_str();
                let child = &self.nodes[node.children[name]];
                if !self.is_node_suppressed(child) {
                    out.push(DirectoryContentEntry::Directory(name));
                }
                i = child.last;
            } else {
                if self.list_padding_files || !entry.padding {
                    out.push(DirectoryContentEntry::File(entry));
                }
                i += 1;
            }
        }
        out
    }

    fn lookup(&self, path: &TreePath) -> Option<NodeId> {
        path.segments().iter().try_fold(ROOT, |id, segment| {
            self.nodes[id].children.get(segment).copied()
        })
    }

    fn node(&self, path: &TreePath) -> &DirectoryNode {
        match self.lookup(path) {
            Some(id) => &self.nodes[id],
            None => panic!("directory '{}' is not registered in the file tree index", path),
        }
    }
}

fn sorted_indices(storage: &FileStorage) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..storage.len()).collect();
    indices.sort_by(|&lhs, &rhs| storage[lhs].path.cmp(&storage[rhs].path));
    debug_assert!(
        indices
            .windows(2)
            .all(|w| storage[w[0]].path != storage[w[1]].path),
        "file storage contains duplicate paths"
    );
    indices
}

fn build_directory_nodes(storage: &FileStorage, indices: &[usize]) -> Vec<DirectoryNode> {
    let root_padding_only = !storage.is_empty() && storage.iter().all(|e| e.padding);
    let mut nodes = vec![DirectoryNode::new(
        String::new(),
        0,
        indices.len(),
        storage.total_file_size(),
        root_padding_only,
    )];

    for (position, &index) in indices.iter().enumerate() {
        let entry = &storage[index];
        let Some((_, parents)) = entry.path.segments().split_last() else {
            continue;
        };

        let mut current = ROOT;
        for segment in parents {
            let existing = nodes[current].children.get(segment).copied();
            current = match existing {
                Some(id) => {
                    let node = &mut nodes[id];
                    debug_assert_eq!(node.last, position, "directory range is not contiguous");
                    node.last += 1;
                    node.total_size += entry.size;
                    node.padding_only &= entry.padding;
                    id
                }
                None => {
                    let id = nodes.len();
                    nodes.push(DirectoryNode::new(
                        segment.clone(),
                        position,
                        position + 1,
                        entry.size,
                        entry.padding,
                    ));
                    nodes[current].children.insert(segment.clone(), id);
                    id
                }
            };
        }
    }
    nodes
}

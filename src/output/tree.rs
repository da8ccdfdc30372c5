//! Tree printer
//!
//! `TreePrinter` walks a `FileTreeIndex` depth-first and renders one line
//! per visible entry. The walk keeps an explicit stack of directory frames
//! instead of recursing, so deep trees cannot overflow the call stack and
//! cancellation can be checked between directories.
//!
//! Per-line extras are supplied by a `LineDecoration`; the plain tree uses
//! `NoDecoration` and the verify overlay plugs in its own decoration.

use std::io;

use termcolor::ColorSpec;

use crate::storage::{FileEntry, FileStorage, TreePath};
use crate::tree::{DirectoryContentEntry, FileTreeIndex};

use super::config::TreeOptions;
use super::style::{Segment, TreeStyle, render_line};
use super::utils::{connector, format_size};

/// Extra text appended to a line.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub text: String,
    pub style: ColorSpec,
}

/// Supplies an optional decoration for each rendered line.
///
/// `entry` is `None` for directory lines.
pub trait LineDecoration {
    fn decorate(&self, entry: Option<&FileEntry>) -> Option<Decoration>;
}

/// Decoration for the plain tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl LineDecoration for NoDecoration {
    fn decorate(&self, _entry: Option<&FileEntry>) -> Option<Decoration> {
        None
    }
}

/// One rendered line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    /// Line text without styling, after elision.
    pub label: String,
    /// Line text with styling escapes when color is enabled.
    pub rendered: String,
    /// Full path of the entry within the archive.
    pub path: TreePath,
    /// Nesting level below the walk root, starting at 0.
    pub depth: usize,
    /// File size, or aggregate size for directories.
    pub size: u64,
    /// The file entry, `None` for directories.
    pub entry: Option<&'a FileEntry>,
}

impl TreeLine<'_> {
    pub fn is_dir(&self) -> bool {
        self.entry.is_none()
    }
}

struct StackFrame<'a> {
    path: TreePath,
    content: Vec<DirectoryContentEntry<'a>>,
    cursor: usize,
    /// Guides inherited from the ancestors of this directory.
    guide: String,
}

impl<'a> StackFrame<'a> {
    fn new(path: TreePath, content: Vec<DirectoryContentEntry<'a>>, guide: String) -> Self {
        Self {
            path,
            content,
            cursor: 0,
            guide,
        }
    }
}

/// Renders a file storage as a tree.
pub struct TreePrinter<'a, D = NoDecoration> {
    index: FileTreeIndex<'a>,
    options: TreeOptions,
    style: TreeStyle,
    prefix: String,
    decoration: D,
    lines: Vec<TreeLine<'a>>,
}

impl<'a> TreePrinter<'a, NoDecoration> {
    pub fn new(storage: &'a FileStorage, prefix: impl Into<String>, options: TreeOptions) -> Self {
        Self {
            index: FileTreeIndex::new(storage, options.list_padding_files),
            options,
            style: TreeStyle::default(),
            prefix: prefix.into(),
            decoration: NoDecoration,
            lines: Vec::new(),
        }
    }
}

impl<'a, D: LineDecoration> TreePrinter<'a, D> {
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the per-line decoration.
    pub fn with_decoration<E: LineDecoration>(self, decoration: E) -> TreePrinter<'a, E> {
        TreePrinter {
            index: self.index,
            options: self.options,
            style: self.style,
            prefix: self.prefix,
            decoration,
            lines: self.lines,
        }
    }

    pub fn index(&self) -> &FileTreeIndex<'a> {
        &self.index
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Render the whole archive.
    pub fn walk_root(&mut self) -> io::Result<()> {
        self.walk(&TreePath::root())
    }

    /// Render the subtree below `root`.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a directory of the index.
    pub fn walk(&mut self, root: &TreePath) -> io::Result<()> {
        self.walk_until(root, || false).map(|_| ())
    }

    /// Render the subtree below `root`, stopping early once `should_stop`
    /// returns true.
    ///
    /// Lines from a previous walk are discarded first.
    ///
    /// `should_stop` is polled before descending into each directory, so
    /// every line already emitted is complete. Returns `false` if the walk
    /// was cancelled.
    pub fn walk_until<F>(&mut self, root: &TreePath, mut should_stop: F) -> io::Result<bool>
    where
        F: FnMut() -> bool,
    {
        self.lines.clear();
        let mut stack = vec![StackFrame::new(
            root.clone(),
            self.index.list_directory_content(root),
            String::new(),
        )];

        loop {
            let depth = stack.len().saturating_sub(1);
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let Some(&item) = frame.content.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let is_last = frame.cursor == frame.content.len();
            let (node, guide) = connector(is_last);
            let path = frame.path.join(item.name());
            let line_prefix = format!("{}{}", frame.guide, node);
            let child_guide = format!("{}{}", frame.guide, guide);

            self.emit(&path, item, &line_prefix, depth)?;

            if item.is_dir() {
                if should_stop() {
                    tracing::debug!(root = %root, lines = self.lines.len(), "tree walk cancelled");
                    return Ok(false);
                }
                let content = self.index.list_directory_content(&path);
                stack.push(StackFrame::new(path, content, child_guide));
            }
        }

        tracing::debug!(root = %root, lines = self.lines.len(), "rendered file tree");
        Ok(true)
    }

    fn emit(
        &mut self,
        path: &TreePath,
        item: DirectoryContentEntry<'a>,
        line_prefix: &str,
        depth: usize,
    ) -> io::Result<()> {
        let (name_style, size, show_size) = match item {
            DirectoryContentEntry::Directory(_) => (
                &self.style.directory,
                self.index.get_directory_size(path),
                self.options.show_directory_size,
            ),
            DirectoryContentEntry::File(entry) => (
                self.style.file_style(entry),
                entry.size,
                self.options.show_file_size,
            ),
        };
        let size_text = show_size.then(|| format_size(size));
        let decoration = self.decoration.decorate(item.entry());

        let mut segments = vec![
            Segment::plain(&self.prefix),
            Segment::plain(line_prefix),
            Segment::styled(item.name(), name_style),
        ];
        if let Some(text) = &size_text {
            segments.push(Segment::plain(" "));
            segments.push(Segment::styled(text, &self.style.size));
        }
        if let Some(decoration) = &decoration {
            segments.push(Segment::plain(" "));
            segments.push(Segment::styled(&decoration.text, &decoration.style));
        }

        let (label, rendered) =
            render_line(&segments, self.options.max_entry_size, self.options.use_color)?;

        self.lines.push(TreeLine {
            label,
            rendered,
            path: path.clone(),
            depth,
            size,
            entry: item.entry(),
        });
        Ok(())
    }

    /// The rendered text, one newline-terminated line per entry.
    pub fn result(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.rendered);
            out.push('\n');
        }
        out
    }

    /// Unstyled labels paired with their file entries, in visiting order.
    pub fn entries(&self) -> Vec<(&str, Option<&'a FileEntry>)> {
        self.lines
            .iter()
            .map(|line| (line.label.as_str(), line.entry))
            .collect()
    }

    pub fn lines(&self) -> &[TreeLine<'a>] {
        &self.lines
    }
}

/// Render the whole file tree of `storage` with default styles.
pub fn format_file_tree(
    storage: &FileStorage,
    prefix: &str,
    options: &TreeOptions,
) -> io::Result<String> {
    let mut printer = TreePrinter::new(storage, prefix, options.clone());
    printer.walk_root()?;
    Ok(printer.result())
}

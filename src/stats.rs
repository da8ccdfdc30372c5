//! Archive statistics collection and display
//!
//! Counts what a rendered tree would show: visible files and directories,
//! plus the padding files that are hidden by default.

use serde::Serialize;

use crate::output::{TreeLine, format_size};
use crate::storage::FileStorage;
use crate::tree::FileTreeIndex;

/// Collected statistics about a file storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Visible files
    pub files: usize,
    /// Visible directories, the root excluded
    pub directories: usize,
    /// Padding files counted. `collect` counts every padding file of the
    /// storage, visible or not; `from_lines` only the rendered ones.
    pub padding_files: usize,
    /// Total size of non-padding files
    pub regular_size: u64,
    /// Total size of all files
    pub total_size: u64,
}

impl FileStats {
    /// Collect statistics using the visibility rules of `index`.
    pub fn collect(index: &FileTreeIndex<'_>) -> Self {
        let storage = index.storage();
        let show_padding = index.list_padding_files();

        let padding_files = storage.iter().filter(|e| e.padding).count();
        let files = if show_padding {
            storage.len()
        } else {
            storage.len() - padding_files
        };
        let directories = index
            .directories()
            .filter(|node| !index.is_node_suppressed(node))
            .count();

        Self {
            files,
            directories,
            padding_files,
            regular_size: storage.total_regular_file_size(),
            total_size: storage.total_file_size(),
        }
    }

    /// Count the entries of an already rendered walk.
    ///
    /// Unlike `collect`, this only sees the subtree that was walked.
    pub fn from_lines(lines: &[TreeLine<'_>]) -> Self {
        let mut stats = Self::default();
        for line in lines {
            match line.entry {
                None => stats.directories += 1,
                Some(entry) => {
                    stats.files += 1;
                    stats.total_size += entry.size;
                    if entry.padding {
                        stats.padding_files += 1;
                    } else {
                        stats.regular_size += entry.size;
                    }
                }
            }
        }
        stats
    }

    /// Size matching the visible files.
    pub fn visible_size(&self, include_pad_files: bool) -> u64 {
        if include_pad_files {
            self.total_size
        } else {
            self.regular_size
        }
    }

    /// One-line summary, e.g. `1 directories, 3 files, 35 B`.
    pub fn summary(&self, include_pad_files: bool) -> String {
        format!(
            "{} directories, {} files, {}",
            self.directories,
            self.files,
            format_size(self.visible_size(include_pad_files))
        )
    }

    /// Summary preceded by `prefix`.
    ///
    /// When padding files are included and there are any, their count is
    /// appended in parentheses.
    pub fn report(&self, prefix: &str, include_pad_files: bool) -> String {
        let mut out = format!("{}{}", prefix, self.summary(include_pad_files));
        if include_pad_files && self.padding_files > 0 {
            out.push_str(&format!(" ({} padding)", self.padding_files));
        }
        out
    }
}

/// Summary line for the whole of `storage`, see `FileStats::report`.
pub fn format_file_stats(storage: &FileStorage, prefix: &str, include_pad_files: bool) -> String {
    let index = FileTreeIndex::new(storage, include_pad_files);
    FileStats::collect(&index).report(prefix, include_pad_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileEntry, TreePath};

    fn sample() -> FileStorage {
        FileStorage::new(vec![
            FileEntry::new(TreePath::parse("a/x.txt").unwrap(), 10),
            FileEntry::new(TreePath::parse("a/y.txt").unwrap(), 20),
            FileEntry::new(TreePath::parse("b.txt").unwrap(), 5),
            FileEntry::padding(TreePath::parse(".pad/0").unwrap(), 3),
        ])
        .unwrap()
    }

    #[test]
    fn test_stats_hide_padding() {
        let storage = sample();
        let index = FileTreeIndex::new(&storage, false);
        let stats = FileStats::collect(&index);
        assert_eq!(
            stats,
            FileStats {
                files: 3,
                directories: 1,
                padding_files: 1,
                regular_size: 35,
                total_size: 38,
            }
        );
        assert_eq!(stats.summary(false), "1 directories, 3 files, 35 B");
    }

    #[test]
    fn test_stats_show_padding() {
        let storage = sample();
        let index = FileTreeIndex::new(&storage, true);
        let stats = FileStats::collect(&index);
        assert_eq!(stats.files, 4);
        assert_eq!(stats.directories, 2);
    }

    #[test]
    fn test_format_file_stats() {
        let storage = sample();
        assert_eq!(
            format_file_stats(&storage, "  ", false),
            "  1 directories, 3 files, 35 B"
        );
        assert_eq!(
            format_file_stats(&storage, "", true),
            "2 directories, 4 files, 38 B (1 padding)"
        );
    }

    #[test]
    fn test_from_lines_matches_collect_for_whole_tree() {
        use crate::output::{TreeOptions, TreePrinter};

        let storage = sample();
        for show_padding in [false, true] {
            let options = TreeOptions {
                list_padding_files: show_padding,
                ..TreeOptions::plain()
            };
            let mut printer = TreePrinter::new(&storage, "", options);
            printer.walk_root().unwrap();
            let from_lines = FileStats::from_lines(printer.lines());
            let collected = FileStats::collect(printer.index());
            assert_eq!(from_lines.files, collected.files);
            assert_eq!(from_lines.directories, collected.directories);
            assert_eq!(
                from_lines.summary(show_padding),
                collected.summary(show_padding)
            );
        }
    }

    #[test]
    fn test_from_lines_subtree() {
        use crate::output::{TreeOptions, TreePrinter};

        let storage = sample();
        let mut printer = TreePrinter::new(&storage, "", TreeOptions::plain());
        printer.walk(&TreePath::parse("a").unwrap()).unwrap();
        let stats = FileStats::from_lines(printer.lines());
        assert_eq!(stats.summary(false), "0 directories, 2 files, 30 B");
    }

    #[test]
    fn test_report_from_lines_matches_format_file_stats() {
        use crate::output::{TreeOptions, TreePrinter};

        let storage = sample();
        let options = TreeOptions {
            list_padding_files: true,
            ..TreeOptions::plain()
        };
        let mut printer = TreePrinter::new(&storage, "", options);
        printer.walk_root().unwrap();
        let stats = FileStats::from_lines(printer.lines());
        assert_eq!(stats.padding_files, 1);
        assert_eq!(stats.report("> ", true), format_file_stats(&storage, "> ", true));
    }

    #[test]
    fn test_from_lines_counts_only_rendered_padding() {
        use crate::output::{TreeOptions, TreePrinter};

        let storage = sample();
        let mut printer = TreePrinter::new(&storage, "", TreeOptions::plain());
        printer.walk_root().unwrap();
        let stats = FileStats::from_lines(printer.lines());
        assert_eq!(stats.padding_files, 0);
        assert_eq!(FileStats::collect(printer.index()).padding_files, 1);
    }

    #[test]
    fn test_stats_empty_storage() {
        let storage = FileStorage::default();
        assert_eq!(format_file_stats(&storage, "", false), "0 directories, 0 files, 0 B");
    }
}

//! Shared utility functions for output formatting

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Connector for every child but the last.
pub const BRANCH: &str = "├── ";
/// Connector for the last child of a directory.
pub const CORNER: &str = "└── ";
/// Guide below a child that has later siblings.
pub const VERTICAL: &str = "│   ";
/// Guide below the last child.
pub const BLANK: &str = "    ";

pub(crate) const ELLIPSIS: char = '.';
const ELLIPSIS_LEN: usize = 3;

/// Connector and child guide for an entry.
pub fn connector(is_last: bool) -> (&'static str, &'static str) {
    if is_last {
        (CORNER, BLANK)
    } else {
        (BRANCH, VERTICAL)
    }
}

/// Calculate the prefix for the children of an entry.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    let (_, guide) = connector(is_last);
    format!("{}{}", prefix, guide)
}

/// Number of terminal cells `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `line` so that it fits in `max_width` cells, ending with dots.
///
/// Returns the number of bytes of the original line that are kept, and the
/// number of dots to append after them. Lines that already fit are kept
/// whole with no dots. When a wide character straddles the cut, the gap is
/// filled with one more dot so the result is exactly `max_width` cells.
pub fn ellipsis_cut(line: &str, max_width: usize) -> (usize, usize) {
    if display_width(line) <= max_width {
        return (line.len(), 0);
    }

    let budget = max_width.saturating_sub(ELLIPSIS_LEN);
    let mut kept = 0;
    let mut width = 0;
    for (offset, c) in line.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        kept = offset + c.len_utf8();
    }
    (kept, max_width - width)
}

/// Replace the tail of an overlong line with dots.
///
/// Returns `true` when the line was shortened.
pub fn ellipsize(line: &mut String, max_width: usize) -> bool {
    let (kept, dots) = ellipsis_cut(line, max_width);
    if kept == line.len() {
        return false;
    }
    line.truncate(kept);
    line.extend(std::iter::repeat_n(ELLIPSIS, dots));
    true
}

/// Format a size in bytes with binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    const KIB: f64 = 1024.0;

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / KIB;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < KIB {
            break;
        }
        value /= KIB;
        unit = next;
    }
    format!("{:.2} {}", value, unit)
}

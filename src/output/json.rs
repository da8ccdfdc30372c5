//! JSON output formatting

use std::io;

use serde::Serialize;

use super::tree::TreeLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One rendered line in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntry {
    pub label: String,
    pub path: String,
    pub depth: usize,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<bool>,
}

impl From<&TreeLine<'_>> for JsonEntry {
    fn from(line: &TreeLine<'_>) -> Self {
        let kind = if line.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        Self {
            label: line.label.clone(),
            path: line.path.to_string(),
            depth: line.depth,
            kind,
            size: Some(line.size),
            padding: line.entry.filter(|e| e.padding).map(|_| true),
        }
    }
}

/// Serialize rendered lines as a pretty-printed JSON array.
pub fn format_json(lines: &[TreeLine<'_>]) -> io::Result<String> {
    let entries: Vec<JsonEntry> = lines.iter().map(JsonEntry::from).collect();
    serde_json::to_string_pretty(&entries).map_err(io::Error::other)
}

/// Print rendered lines as pretty-printed JSON to stdout.
pub fn print_json(lines: &[TreeLine<'_>]) -> io::Result<()> {
    let json = format_json(lines)?;
    println!("{}", json);
    Ok(())
}

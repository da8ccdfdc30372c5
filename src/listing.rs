//! Flat file listing

use crate::storage::FileStorage;

/// Paths of the files in `storage`, in storage order.
///
/// Padding files are skipped unless `show_padding` is set. A non-empty
/// `prefix` is joined in front of every path with a single `/`.
pub fn list_files(storage: &FileStorage, prefix: &str, show_padding: bool) -> Vec<String> {
    let prefix = prefix.trim_end_matches('/');
    storage
        .iter()
        .filter(|entry| show_padding || !entry.padding)
        .map(|entry| {
            if prefix.is_empty() {
                entry.path.to_string()
            } else {
                format!("{}/{}", prefix, entry.path)
            }
        })
        .collect()
}

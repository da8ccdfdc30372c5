//! Output configuration types

/// Display toggles for tree rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Append the size of each file.
    pub show_file_size: bool,
    /// Append the aggregate size of each directory.
    pub show_directory_size: bool,
    pub use_color: bool,
    /// Show padding files and padding-only directories.
    pub list_padding_files: bool,
    /// Maximum display width of a line before it is elided.
    pub max_entry_size: Option<usize>,
}

impl TreeOptions {
    /// Options for plain text: sizes on, color off.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            ..Self::default()
        }
    }

    pub fn with_max_entry_size(mut self, width: usize) -> Self {
        self.max_entry_size = Some(width);
        self
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            show_file_size: true,
            show_directory_size: true,
            use_color: true,
            list_padding_files: false,
            max_entry_size: None,
        }
    }
}

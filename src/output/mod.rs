//! Tree formatting and display
//!
//! # Module Structure
//!
//! - `config` - Display toggles (`TreeOptions`)
//! - `style` - Entry styles, `LS_COLORS` parsing and styled line rendering
//! - `utils` - Connector glyphs, display width, elision, size formatting
//! - `tree` - The depth-first `TreePrinter`
//! - `verify` - Verification overlay decoration
//! - `json` - JSON export of rendered lines

mod config;
mod json;
mod style;
mod tree;
mod utils;
pub mod verify;

pub use config::TreeOptions;
pub use json::{EntryKind, JsonEntry, format_json, print_json};
pub use style::{Segment, TreeStyle, render_line};
pub use tree::{Decoration, LineDecoration, NoDecoration, TreeLine, TreePrinter, format_file_tree};
pub use utils::{
    BLANK, BRANCH, CORNER, VERTICAL, connector, continuation_prefix, display_width, ellipsis_cut,
    ellipsize, format_size,
};
pub use verify::{
    FileVerifier, VerifyDecoration, VerifyReport, VerifyStatus, format_verify_file_tree,
};

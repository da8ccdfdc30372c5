//! Text styles for tree entries and styled line rendering.

use std::collections::HashMap;
use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::storage::FileEntry;

use super::utils::{ELLIPSIS, ellipsis_cut};

/// Styles applied to the parts of a tree line.
#[derive(Debug, Clone)]
pub struct TreeStyle {
    pub directory: ColorSpec,
    pub file: ColorSpec,
    pub size: ColorSpec,
    /// Per-extension file styles, keyed by lowercase extension.
    extensions: HashMap<String, ColorSpec>,
}

impl Default for TreeStyle {
    fn default() -> Self {
        let mut directory = ColorSpec::new();
        directory.set_fg(Some(Color::Blue)).set_bold(true);
        let mut size = ColorSpec::new();
        size.set_fg(Some(Color::Green));

        Self {
            directory,
            file: ColorSpec::new(),
            size,
            extensions: HashMap::new(),
        }
    }
}

impl TreeStyle {
    /// Build styles from an `LS_COLORS` value.
    ///
    /// Recognizes `di` (directories), `fi` (regular files) and `*.ext`
    /// patterns. Unknown keys and malformed codes are ignored.
    pub fn from_ls_colors(ls_colors: &str) -> Self {
        let mut style = Self::default();
        for item in ls_colors.split(':') {
            let Some((key, codes)) = item.split_once('=') else {
                continue;
            };
            let Some(spec) = parse_sgr(codes) else {
                continue;
            };
            match key {
                "di" => style.directory = spec,
                "fi" => style.file = spec,
                _ => {
                    if let Some(ext) = key.strip_prefix("*.") {
                        style.extensions.insert(ext.to_lowercase(), spec);
                    }
                }
            }
        }
        style
    }

    /// Style for a file, picked by extension when one is configured.
    pub fn file_style(&self, entry: &FileEntry) -> &ColorSpec {
        entry
            .name()
            .rsplit_once('.')
            .and_then(|(_, ext)| self.extensions.get(&ext.to_lowercase()))
            .unwrap_or(&self.file)
    }
}

/// Parse `;`-separated SGR codes such as `01;34` or `38;5;208`.
fn parse_sgr(codes: &str) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    let mut codes = codes.split(';').map(|c| c.parse::<u8>().ok());

    while let Some(code) = codes.next() {
        match code? {
            0 => spec.clear(),
            1 => {
                spec.set_bold(true);
            }
            2 => {
                spec.set_dimmed(true);
            }
            3 => {
                spec.set_italic(true);
            }
            4 => {
                spec.set_underline(true);
            }
            code @ 30..=37 => {
                spec.set_fg(Some(base_color(code - 30)));
            }
            code @ 40..=47 => {
                spec.set_bg(Some(base_color(code - 40)));
            }
            code @ 90..=97 => {
                spec.set_fg(Some(base_color(code - 90))).set_intense(true);
            }
            code @ (38 | 48) => {
                let color = match codes.next()?? {
                    5 => Color::Ansi256(codes.next()??),
                    2 => Color::Rgb(codes.next()??, codes.next()??, codes.next()??),
                    _ => return None,
                };
                if code == 38 {
                    spec.set_fg(Some(color));
                } else {
                    spec.set_bg(Some(color));
                }
            }
            _ => {}
        }
    }
    Some(spec)
}

fn base_color(n: u8) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

/// A piece of a line with an optional style.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'s> {
    pub text: &'s str,
    pub style: Option<&'s ColorSpec>,
}

impl<'s> Segment<'s> {
    pub fn plain(text: &'s str) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: &'s str, style: &'s ColorSpec) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// Render segments into an unstyled label and a styled line.
///
/// The unstyled text decides elision; styles are then applied to whatever
/// part of each segment survives, and the dots are written unstyled.
pub fn render_line(
    segments: &[Segment<'_>],
    max_width: Option<usize>,
    use_color: bool,
) -> io::Result<(String, String)> {
    let plain: String = segments.iter().map(|s| s.text).collect();
    let (kept, dots) = max_width.map_or((plain.len(), 0), |width| ellipsis_cut(&plain, width));
    let dots: String = std::iter::repeat_n(ELLIPSIS, dots).collect();

    let mut out = if use_color {
        Buffer::ansi()
    } else {
        Buffer::no_color()
    };

    let mut remaining = kept;
    for segment in segments {
        if remaining == 0 {
            break;
        }
        let take = segment.text.len().min(remaining);
        let text = &segment.text[..take];
        remaining -= take;

        match segment.style {
            Some(spec) if !text.is_empty() => {
                out.set_color(spec)?;
                out.write_all(text.as_bytes())?;
                out.reset()?;
            }
            _ => out.write_all(text.as_bytes())?,
        }
    }
    out.write_all(dots.as_bytes())?;

    let rendered = String::from_utf8(out.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut label = plain;
    label.truncate(kept);
    label.push_str(&dots);
    Ok((label, rendered))
}

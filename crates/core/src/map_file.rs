//! Plain-text map format.
//!
//! The first non-blank line that does not start with `#` holds `width height`.
//! Cell tags follow as whitespace-separated integers, consumed positionally
//! without regard to line breaks. A `#` ends the current line and the first
//! token that is not an integer abandons the rest of its line. Cells the file
//! never supplies stay wall, so truncated files still load as closed maps.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::map::{Cell, MapError, MapStore, WALL};

#[derive(Debug, Error)]
pub enum MapFileError {
    #[error("map file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("map file has no `width height` header line")]
    MissingHeader,
    #[error("map header declares invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
    #[error(transparent)]
    Map(#[from] MapError),
}

pub fn parse_map(text: &str) -> Result<MapStore, MapFileError> {
    let mut lines = text.lines();

    let (width, height) = lines
        .by_ref()
        .find_map(|line| {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            parse_header(trimmed)
        })
        .ok_or(MapFileError::MissingHeader)?;

    if width <= 0 || height <= 0 {
        return Err(MapFileError::InvalidDimensions { width, height });
    }
    let (width, height) = (width as usize, height as usize);

    let mut map = MapStore::new(width, height, WALL)?;
    let total = width * height;
    let mut next = 0usize;

    'lines: for line in lines {
        let mut rest = line;
        loop {
            if next >= total {
                break 'lines;
            }
            rest = rest.trim_start();
            if rest.is_empty() || rest.starts_with('#') {
                break;
            }
            let Some((value, remainder)) = scan_int(rest) else {
                break;
            };
            map.set(next % width, next / width, value);
            next += 1;
            rest = remainder;
        }
    }

    Ok(map)
}

pub fn format_map(map: &MapStore) -> String {
    let mut out = String::with_capacity(16 + map.cells().len() * 2 + map.height());
    let _ = writeln!(out, "{} {}", map.width(), map.height());
    for row in map.cells().chunks(map.width()) {
        for tag in row {
            let _ = write!(out, "{tag} ");
        }
        out.push('\n');
    }
    out
}

pub fn load_map_file(path: &Path) -> Result<MapStore, MapFileError> {
    let text = fs::read_to_string(path)?;
    parse_map(&text)
}

/// Writes through a temporary sibling file so a crash never leaves a
/// half-written map behind.
pub fn save_map_file(path: &Path, map: &MapStore) -> Result<(), MapFileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("map.tmp");
    fs::write(&tmp_path, format_map(map))?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn parse_header(line: &str) -> Option<(i64, i64)> {
    let (width, rest) = scan_int(line)?;
    let (height, _) = scan_int(rest.trim_start())?;
    Some((i64::from(width), i64::from(height)))
}

/// Reads a leading `[+-]digits` integer, returning it with the unread tail.
fn scan_int(text: &str) -> Option<(Cell, &str)> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let value = text[..end].parse::<Cell>().ok()?;
    Some((value, &text[end..]))
}

//! Source map discovery.
//!
//! A generated JavaScript file points at its source map with a trailing
//! pragma comment:
//!
//! ```text
//! //# sourceMappingURL=data:application/json;base64,eyJ2ZXJzaW9uIjozLC4uLn0=
//! //# sourceMappingURL=a.js.map
//! ```
//!
//! The first form embeds the map in the generated file; the second names a
//! companion file relative to the generated file's directory. Only the
//! `sources` list of the map is interesting here, the mappings themselves
//! are never decoded.

use crate::path::{normalize_path, resolve_path};
use memchr::memmem;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

const SOURCE_MAPPING_URL: &[u8] = b"sourceMappingURL=";

/// Errors produced while locating or decoding a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("malformed data URI in sourceMappingURL")]
    MalformedDataUri,
    #[error("unsupported source map media type `{0}`")]
    UnsupportedMediaType(String),
    #[error("invalid base64 byte at offset {offset}")]
    InvalidBase64 { offset: usize },
    #[error("invalid percent escape at offset {offset}")]
    InvalidPercentEscape { offset: usize },
    #[error("source map payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("source map file {} could not be read", .0.display())]
    MapFileUnavailable(PathBuf),
    #[error("source map is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The subset of a version 3 source map that the repair pass reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<Option<String>>,
}

impl RawSourceMap {
    /// Original source entries in map order, skipping `null` slots.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().filter_map(|source| source.as_deref())
    }
}

/// Where a loaded source map came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapOrigin {
    /// Embedded in the generated file as a `data:` URI.
    Inline,
    /// Read from a companion file.
    File(PathBuf),
}

/// A decoded source map together with the directory its sources are
/// relative to.
#[derive(Debug, Clone)]
pub struct LoadedSourceMap {
    pub origin: MapOrigin,
    pub base_dir: PathBuf,
    pub map: RawSourceMap,
}

impl LoadedSourceMap {
    /// Original source paths, resolved against the generated file's
    /// directory and normalized.
    pub fn resolved_sources(&self) -> Vec<PathBuf> {
        self.map
            .sources()
            .map(|source| resolve_path(&self.base_dir, Path::new(source)))
            .collect()
    }
}

// =============================================================================
// Map file access
// =============================================================================

/// Reads companion source map files.
pub trait MapFileReader {
    fn read_map_file(&self, path: &Path) -> Option<String>;
}

/// Reads companion map files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMapFileReader;

impl MapFileReader for FsMapFileReader {
    fn read_map_file(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// Serves companion map files from memory, keyed by normalized path.
#[derive(Debug, Clone, Default)]
pub struct MemoryMapFileReader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryMapFileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), contents.into());
    }
}

impl MapFileReader for MemoryMapFileReader {
    fn read_map_file(&self, path: &Path) -> Option<String> {
        self.files.get(&normalize_path(path)).cloned()
    }
}

// =============================================================================
// Pragma discovery
// =============================================================================

/// Iterates `sourceMappingURL` pragma values from the end of the text
/// towards the start.
pub struct MappingUrls<'a> {
    text: &'a str,
    end: usize,
}

impl<'a> Iterator for MappingUrls<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pos) = memmem::rfind(&self.text.as_bytes()[..self.end], SOURCE_MAPPING_URL) {
            self.end = pos;
            let line_start = self.text[..pos].rfind('\n').map_or(0, |index| index + 1);
            let Some(marker) = pragma_marker(&self.text[line_start..pos]) else {
                continue;
            };
            let rest = &self.text[pos + SOURCE_MAPPING_URL.len()..];
            let line = rest.find('\n').map_or(rest, |end| &rest[..end]);
            if let Some(value) = pragma_value(line, marker) {
                return Some(value);
            }
        }
        None
    }
}

/// All `sourceMappingURL` pragma values in `text`, last one first.
pub fn mapping_urls(text: &str) -> MappingUrls<'_> {
    MappingUrls {
        text,
        end: text.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    /// `//# ...` or `//@ ...`
    Line,
    /// `/*# ... */` or `/*@ ... */`
    Block,
}

#[derive(Debug, Clone, Copy)]
struct PragmaMarker {
    style: CommentStyle,
    /// Only whitespace precedes the comment on its line.
    at_line_start: bool,
}

/// Recognize the comment marker in the text between the start of the line
/// and `sourceMappingURL=`. At least one space or tab must follow it.
fn pragma_marker(prefix: &str) -> Option<PragmaMarker> {
    let trimmed = prefix.trim_end_matches([' ', '\t']);
    if trimmed.len() == prefix.len() {
        return None;
    }
    let (before, style) = if let Some(before) =
        trimmed.strip_suffix("//#").or_else(|| trimmed.strip_suffix("//@"))
    {
        (before, CommentStyle::Line)
    } else if let Some(before) = trimmed.strip_suffix("/*#").or_else(|| trimmed.strip_suffix("/*@")) {
        (before, CommentStyle::Block)
    } else {
        return None;
    };
    Some(PragmaMarker {
        style,
        at_line_start: before.trim().is_empty(),
    })
}

/// Extract the URL from the remainder of a pragma line.
///
/// A pragma that starts its line may carry any URL. A pragma trailing code
/// on the same line must name a map file, contain no quotes and end the
/// line (after the closing `*/` for block comments).
fn pragma_value(line: &str, marker: PragmaMarker) -> Option<&str> {
    let line = line.trim_end_matches('\r');
    if marker.at_line_start {
        let value_end = line.find(char::is_whitespace).unwrap_or(line.len());
        let value = line[..value_end].trim_end_matches("*/");
        return (!value.is_empty()).then_some(value);
    }

    let value_end = line
        .find(|c: char| {
            c.is_whitespace()
                || matches!(c, '\'' | '"' | '`')
                || (marker.style == CommentStyle::Block && c == '*')
        })
        .unwrap_or(line.len());
    let (value, tail) = line.split_at(value_end);
    if value.is_empty() || is_data_uri(value) {
        return None;
    }
    let tail = tail.trim_start_matches([' ', '\t']);
    let closed = match marker.style {
        CommentStyle::Line => tail.trim().is_empty(),
        CommentStyle::Block => tail
            .strip_prefix("*/")
            .is_some_and(|after| after.trim().is_empty()),
    };
    closed.then_some(value)
}

fn is_data_uri(url: &str) -> bool {
    url.starts_with("data:")
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the JSON payload of a `data:` URI.
///
/// Accepts `application/json`, `text/json` or an omitted media type, with
/// an optional charset parameter, in either base64 or percent-encoded form.
pub fn decode_data_uri(url: &str) -> Result<String, SourceMapError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(SourceMapError::MalformedDataUri)?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or(SourceMapError::MalformedDataUri)?;

    let mut params = meta.split(';');
    let media_type = params.next().unwrap_or_default();
    if !matches!(media_type, "" | "application/json" | "text/json") {
        return Err(SourceMapError::UnsupportedMediaType(media_type.to_string()));
    }
    let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        base64_decode(payload)?
    } else {
        percent_decode(payload)?
    };
    String::from_utf8(bytes).map_err(|_| SourceMapError::InvalidUtf8)
}

/// Decode standard or URL-safe base64. Padding is optional.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, SourceMapError> {
    let mut output = Vec::with_capacity(input.len() / 4 * 3);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (offset, byte) in input.bytes().enumerate() {
        let value = match byte {
            b'A'..=b'Z' => byte - b'A',
            b'a'..=b'z' => byte - b'a' + 26,
            b'0'..=b'9' => byte - b'0' + 52,
            b'+' | b'-' => 62,
            b'/' | b'_' => 63,
            b'=' => break,
            b' ' | b'\t' | b'\r' | b'\n' => continue,
            _ => return Err(SourceMapError::InvalidBase64 { offset }),
        };
        buffer = (buffer << 6) | u32::from(value);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(output)
}

fn percent_decode(input: &str) -> Result<Vec<u8>, SourceMapError> {
    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let high = bytes.get(index + 1).and_then(|b| hex_value(*b));
            let low = bytes.get(index + 2).and_then(|b| hex_value(*b));
            match (high, low) {
                (Some(high), Some(low)) => output.push((high << 4) | low),
                _ => return Err(SourceMapError::InvalidPercentEscape { offset: index }),
            }
            index += 3;
        } else {
            output.push(bytes[index]);
            index += 1;
        }
    }
    Ok(output)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Locate and decode the source map of a generated file.
///
/// An inline map takes precedence over a companion map file. Returns
/// `Ok(None)` when the text carries no `sourceMappingURL` pragma at all.
pub fn load_source_map(
    text: &str,
    base_dir: &Path,
    reader: &dyn MapFileReader,
) -> Result<Option<LoadedSourceMap>, SourceMapError> {
    if let Some(url) = mapping_urls(text).find(|url| is_data_uri(url)) {
        trace!("decoding inline source map");
        let json = decode_data_uri(url)?;
        let map = serde_json::from_str(&json)?;
        return Ok(Some(LoadedSourceMap {
            origin: MapOrigin::Inline,
            base_dir: base_dir.to_path_buf(),
            map,
        }));
    }

    if let Some(url) = mapping_urls(text).find(|url| !is_data_uri(url)) {
        let map_path = resolve_path(base_dir, Path::new(url));
        trace!(map_file = %map_path.display(), "reading companion source map");
        let json = reader
            .read_map_file(&map_path)
            .ok_or_else(|| SourceMapError::MapFileUnavailable(map_path.clone()))?;
        let map = serde_json::from_str(&json)?;
        return Ok(Some(LoadedSourceMap {
            origin: MapOrigin::File(map_path),
            base_dir: base_dir.to_path_buf(),
            map,
        }));
    }

    Ok(None)
}

#[cfg(test)]
#[path = "tests/source_map_tests.rs"]
mod source_map_tests;

//! KMZ container access.
//!
//! A KMZ is a zip archive holding one KML document plus icons. Only the
//! first `.kml` entry (in archive order) is decompressed; every other entry
//! is skipped by name without being read.

use std::io::{Cursor, Read};

use tracing::{debug, trace};
use zip::ZipArchive;

use crate::error::{KmzError, KmzResult};

/// File extension of the markup entry, compared case-insensitively.
pub const MARKUP_EXTENSION: &str = ".kml";

/// Upper bound for pre-allocating the entry buffer.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// The markup document pulled out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupEntry {
    /// Entry name inside the archive (`"<inline>"` for uncompressed input).
    pub name: String,
    pub text: String,
}

/// Whether an archive entry name refers to a markup document.
pub fn is_markup_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(MARKUP_EXTENSION)
}

/// Read the first markup entry of a KMZ archive.
///
/// Uncompressed KML (the buffer starts with `<` after an optional BOM and
/// whitespace) is returned as-is so both `.kmz` and `.kml` downloads go
/// through the same path.
pub fn read_markup_entry(data: &[u8]) -> KmzResult<MarkupEntry> {
    if looks_like_markup(data) {
        debug!(bytes = data.len(), "Input is uncompressed markup");
        return Ok(MarkupEntry {
            name: "<inline>".to_string(),
            text: decode_utf8(data.to_vec())?,
        });
    }

    let mut archive = ZipArchive::new(Cursor::new(data))?;

    for index in 0..archive.len() {
        let name = archive.by_index_raw(index)?.name().to_string();
        if !is_markup_name(&name) {
            trace!(entry = %name, "Skipping non-markup entry");
            continue;
        }

        let mut entry = archive.by_index(index)?;
        let mut raw = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
        entry
            .read_to_end(&mut raw)
            .map_err(|e| KmzError::CorruptArchive(format!("Failed to inflate '{}': {}", name, e)))?;

        debug!(entry = %name, bytes = raw.len(), "Read markup entry");
        return Ok(MarkupEntry {
            name,
            text: decode_utf8(raw)?,
        });
    }

    Err(KmzError::NoMarkupEntry)
}

/// Read just the markup text of a KMZ archive.
pub fn read_markup(data: &[u8]) -> KmzResult<String> {
    read_markup_entry(data).map(|entry| entry.text)
}

fn looks_like_markup(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'<')
}

fn decode_utf8(raw: Vec<u8>) -> KmzResult<String> {
    let text = String::from_utf8(raw).map_err(|e| {
        KmzError::malformed(e.utf8_error().valid_up_to(), "markup is not valid UTF-8")
    })?;
    match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

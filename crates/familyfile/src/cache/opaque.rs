//! Caches without a known record layout.
//!
//! Only printable text and raw bytes are recovered from these.

use crate::cache::printable_magic;
use crate::codec::primitives::{is_printable_ascii, lossy, to_hex};
use crate::limits::CACHE_HEADER_LEN;
use crate::model::{GlobalRecords, OpaqueCache};

/// Shortest printable run kept in [`OpaqueCache::text`].
const MIN_TEXT_RUN: usize = 4;

/// Decodes `bookmarks.cache`, `colortags.cache` or `associations.cache`.
pub fn decode_opaque(data: &[u8]) -> OpaqueCache {
    let runs: Vec<String> = data
        .get(8..)
        .unwrap_or_default()
        .split(|&b| !is_printable_ascii(b))
        .filter(|run| run.len() >= MIN_TEXT_RUN)
        .map(lossy)
        .collect();

    OpaqueCache {
        size: data.len(),
        magic: printable_magic(data),
        text: runs.join(" "),
        data: data.to_vec(),
    }
}

/// Decodes `globalRecords.cache` into a hex dump.
pub fn decode_global_records(data: &[u8]) -> GlobalRecords {
    GlobalRecords {
        size: data.len(),
        hex: to_hex(data),
    }
}

/// Decodes `find.cache`: every printable byte after the size and magic.
pub fn decode_find(data: &[u8]) -> String {
    let text: Vec<u8> = data
        .get(8..)
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|&b| is_printable_ascii(b))
        .collect();
    lossy(&text)
}

/// Decodes `descriptions.cache`.
///
/// Printable bytes after the 16-byte header; null bytes between strings
/// become single spaces.
pub fn decode_descriptions(data: &[u8]) -> String {
    let mut text = Vec::new();
    for &b in data.get(CACHE_HEADER_LEN..).unwrap_or_default() {
        if is_printable_ascii(b) {
            text.push(b);
        } else if b == 0 && !text.is_empty() && text.last() != Some(&b' ') {
            text.push(b' ');
        }
    }
    lossy(&text).trim_end().to_string()
}

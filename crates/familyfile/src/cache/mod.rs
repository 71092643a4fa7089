//! Side-cache file decoders.
//!
//! Most caches open with the same header:
//!
//! ```text
//! 0   4 bytes   declared file size (LE)
//! 4   4 bytes   magic
//! 8   4 bytes   record count (LE)
//! 12  4 bytes   extra header bytes (meaning unknown)
//! ```
//!
//! A file too short for its header decodes to no records. A wrong magic
//! rejects that one file with [`CacheError::BadMagic`].

pub mod changes;
pub mod names;
pub mod opaque;
pub mod place_usage;
pub mod places;
pub mod timestamps;

pub use changes::{decode_changes, decode_member};
pub use names::{decode_first_names, decode_search_names, decode_surnames};
pub use opaque::{decode_descriptions, decode_find, decode_global_records, decode_opaque};
pub use place_usage::decode_place_usage;
pub use places::decode_places_cache;
pub use timestamps::decode_timestamps;

use crate::codec::primitives::{is_printable_ascii, u32_le};
use crate::error::CacheError;

/// Known side-cache files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Places,
    PlaceUsage,
    FirstNames,
    Surnames,
    SearchNames,
    Timestamps,
    Bookmarks,
    ColorTags,
    Associations,
    GlobalRecords,
    Find,
    Descriptions,
}

impl CacheKind {
    pub const ALL: [CacheKind; 12] = [
        CacheKind::Places,
        CacheKind::PlaceUsage,
        CacheKind::FirstNames,
        CacheKind::Surnames,
        CacheKind::SearchNames,
        CacheKind::Timestamps,
        CacheKind::Bookmarks,
        CacheKind::ColorTags,
        CacheKind::Associations,
        CacheKind::GlobalRecords,
        CacheKind::Find,
        CacheKind::Descriptions,
    ];

    /// Looks up a cache kind by its file name within the bundle.
    pub fn from_file_name(name: &str) -> Option<CacheKind> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CacheKind::Places => "places.cache",
            CacheKind::PlaceUsage => "placeUsage.cache",
            CacheKind::FirstNames => "fmnames.cache",
            CacheKind::Surnames => "surnames.cache",
            CacheKind::SearchNames => "shNames.cache",
            CacheKind::Timestamps => "timestamps.cache",
            CacheKind::Bookmarks => "bookmarks.cache",
            CacheKind::ColorTags => "colortags.cache",
            CacheKind::Associations => "associations.cache",
            CacheKind::GlobalRecords => "globalRecords.cache",
            CacheKind::Find => "find.cache",
            CacheKind::Descriptions => "descriptions.cache",
        }
    }
}

// =============================================================================
// HEADER HELPERS
// =============================================================================

/// Rejects `data` unless bytes 4..8 equal `expected`.
pub(crate) fn check_magic(data: &[u8], expected: &'static str) -> Result<(), CacheError> {
    let found = data.get(4..8).unwrap_or_default();
    if found == expected.as_bytes() {
        Ok(())
    } else {
        Err(CacheError::BadMagic {
            expected,
            found: String::from_utf8_lossy(found).into_owned(),
        })
    }
}

/// Returns bytes 4..8 as text when all four are printable ASCII.
pub(crate) fn printable_magic(data: &[u8]) -> String {
    match data.get(4..8) {
        Some(magic) if magic.iter().all(|&b| is_printable_ascii(b)) => {
            String::from_utf8_lossy(magic).into_owned()
        }
        _ => String::new(),
    }
}

/// Record count stored at byte 8.
pub(crate) fn record_count(data: &[u8]) -> usize {
    u32_le(data, 8).map_or(0, |c| c as usize)
}

/// Reads up to `count` u32 offsets starting at `start`.
///
/// The table is clamped to the entries actually present. Offsets at or past
/// the end of `data` are dropped.
pub(crate) fn offset_table(data: &[u8], start: usize, count: usize) -> Vec<usize> {
    let available = data.len().saturating_sub(start) / 4;
    (0..count.min(available))
        .filter_map(|i| u32_le(data, start + i * 4).ok())
        .map(|off| off as usize)
        .filter(|&off| off < data.len())
        .collect()
}

//! Name index caches: `fmnames.cache`, `surnames.cache` and `shNames.cache`.

use crate::cache::{check_magic, offset_table, record_count};
use crate::codec::primitives::{lossy, u16_le};
use crate::error::CacheError;
use crate::limits::SURNAMES_CACHE_MAGIC;
use crate::model::{FirstNameEntry, SearchName, SurnameEntry};

// =============================================================================
// FIRST NAMES
// =============================================================================

const FIRST_NAMES_HEADER_LEN: usize = 12;
const FIRST_NAME_MIN_SIZE: usize = 8;

/// Decodes `fmnames.cache`.
///
/// A 12-byte header (size, magic, count) precedes an offset table. Each record
/// is a size byte, 5 bytes of metadata, a 2-byte phonetic code and the name;
/// the size counts everything after the size byte.
pub fn decode_first_names(data: &[u8]) -> Result<Vec<FirstNameEntry>, CacheError> {
    if data.len() < FIRST_NAMES_HEADER_LEN {
        return Ok(Vec::new());
    }

    let offsets = offset_table(data, FIRST_NAMES_HEADER_LEN, record_count(data));
    let mut entries = Vec::with_capacity(offsets.len());
    for o in offsets {
        let size = data[o] as usize;
        if size < FIRST_NAME_MIN_SIZE {
            continue;
        }
        let Some(record) = data.get(o..o + 1 + size) else {
            continue;
        };
        let mut meta = [0u8; 5];
        meta.copy_from_slice(&record[1..6]);
        entries.push(FirstNameEntry {
            name: lossy(&record[8..]),
            meta,
            phonetic: lossy(&record[6..8]),
        });
    }
    Ok(entries)
}

// =============================================================================
// SURNAMES
// =============================================================================

/// Decodes `surnames.cache`.
///
/// After the size and magic, entries are `(SURNAME, GIVEN)` text separated by
/// binary bytes. Entries are found by scanning for the parentheses; repeated
/// closing parentheses are skipped.
pub fn decode_surnames(data: &[u8]) -> Result<Vec<SurnameEntry>, CacheError> {
    if data.len() < 8 {
        return Ok(Vec::new());
    }
    check_magic(data, SURNAMES_CACHE_MAGIC)?;

    let content = &data[8..];
    let mut entries = Vec::new();
    let mut pos = 0;
    while let Some(open) = find_byte(content, pos, b'(') {
        let Some(close) = find_byte(content, open, b')') else {
            break;
        };
        let raw = &content[open..=close];
        let inner = &raw[1..raw.len() - 1];
        let (surname, given) = match inner.windows(2).position(|w| w == b", ") {
            Some(split) => (&inner[..split], &inner[split + 2..]),
            None => (inner, &[][..]),
        };
        entries.push(SurnameEntry {
            surname: lossy(surname),
            given_name: lossy(given),
            raw_entry: lossy(raw),
        });

        pos = close + 1;
        while content.get(pos) == Some(&b')') {
            pos += 1;
        }
    }
    Ok(entries)
}

fn find_byte(data: &[u8], from: usize, needle: u8) -> Option<usize> {
    data.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

// =============================================================================
// SEARCH NAMES
// =============================================================================

const SEARCH_NAMES_HEADER_LEN: usize = 20;

/// Decodes `shNames.cache`.
///
/// The count is a u16 at byte 4. Names are null-delimited from byte 20; any
/// name holding an ASCII control byte is dropped and does not count.
pub fn decode_search_names(data: &[u8]) -> Result<Vec<SearchName>, CacheError> {
    if data.len() < SEARCH_NAMES_HEADER_LEN {
        return Ok(Vec::new());
    }
    let count = u16_le(data, 4).map_or(0, usize::from);

    let mut names = Vec::new();
    let mut pos = SEARCH_NAMES_HEADER_LEN;
    while names.len() < count && pos < data.len() {
        let end = find_byte(data, pos, 0).unwrap_or(data.len());
        let name = &data[pos..end];
        if !name.is_empty() && name.iter().all(|&b| b >= 0x20 && b != 0x7F) {
            names.push(SearchName { name: lossy(name) });
        }
        pos = end + 1;
    }
    Ok(names)
}

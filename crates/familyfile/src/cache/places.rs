//! `places.cache`: full place names.
//!
//! Header (16 bytes, magic `ahcp`), then an offset table with one u32 per
//! record. Each record:
//!
//! ```text
//! 0   4 bytes   record size, including this header
//! 4   4 bytes   place ID
//! 8   8 bytes   opaque reference
//! 16  ...       UTF-8 name (size - 16 bytes)
//! ```

use crate::cache::{check_magic, offset_table, record_count};
use crate::codec::primitives::{lossy, u32_le};
use crate::error::CacheError;
use crate::limits::{CACHE_HEADER_LEN, PLACES_CACHE_MAGIC};
use crate::model::Place;

const RECORD_HEADER_LEN: usize = 16;

pub fn decode_places_cache(data: &[u8]) -> Result<Vec<Place>, CacheError> {
    if data.len() < CACHE_HEADER_LEN {
        return Ok(Vec::new());
    }
    check_magic(data, PLACES_CACHE_MAGIC)?;

    let offsets = offset_table(data, CACHE_HEADER_LEN, record_count(data));
    let mut places = Vec::with_capacity(offsets.len());
    for o in offsets {
        let Some(head) = data.get(o..o + RECORD_HEADER_LEN) else {
            continue;
        };
        let size = u32_le(head, 0).map_or(0, |s| s as usize);
        let id = u32_le(head, 4).unwrap_or(0);

        let name = size
            .checked_sub(RECORD_HEADER_LEN)
            .filter(|&len| len > 0)
            .and_then(|len| data.get(o + RECORD_HEADER_LEN..o + RECORD_HEADER_LEN + len))
            .map(lossy)
            .unwrap_or_default();

        places.push(Place {
            id,
            name,
            reference: head[8..].to_vec(),
        });
    }
    Ok(places)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a `places.cache` with the given `(id, name)` entries.
    pub(crate) fn places_cache(entries: &[(u32, &str)]) -> Vec<u8> {
        let table_len = entries.len() * 4;
        let mut records = Vec::new();
        let mut offsets = Vec::new();
        for (i, (id, name)) in entries.iter().enumerate() {
            offsets.push((CACHE_HEADER_LEN + table_len + records.len()) as u32);
            records.extend_from_slice(&((RECORD_HEADER_LEN + name.len()) as u32).to_le_bytes());
            records.extend_from_slice(&id.to_le_bytes());
            records.extend_from_slice(&[i as u8; 8]);
            records.extend_from_slice(name.as_bytes());
        }

        let mut data = Vec::new();
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(PLACES_CACHE_MAGIC.as_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        for off in offsets {
            data.extend_from_slice(&off.to_le_bytes());
        }
        data.extend(records);
        let total = data.len() as u32;
        data[..4].copy_from_slice(&total.to_le_bytes());
        data
    }

    #[test]
    fn test_decode_places() {
        let data = places_cache(&[(1, "Springfield, Illinois"), (2, "Paris")]);
        let places = decode_places_cache(&data).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id, 1);
        assert_eq!(places[0].name, "Springfield, Illinois");
        assert_eq!(places[0].reference, vec![0u8; 8]);
        assert_eq!(places[1].name, "Paris");
        assert_eq!(places[1].reference, vec![1u8; 8]);
    }

    #[test]
    fn test_short_file_has_no_records() {
        assert!(decode_places_cache(b"\0\0\0\0ahcp").unwrap().is_empty());
        assert!(decode_places_cache(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let mut data = places_cache(&[(1, "Rome")]);
        data[4..8].copy_from_slice(b"xxxx");
        assert!(matches!(
            decode_places_cache(&data),
            Err(CacheError::BadMagic { expected: "ahcp", .. })
        ));
    }

    #[test]
    fn test_out_of_range_record_skipped() {
        let mut data = places_cache(&[(1, "Rome"), (2, "Oslo")]);
        // point the first offset past the end
        data[16..20].copy_from_slice(&0xFFFFu32.to_le_bytes());
        let places = decode_places_cache(&data).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Oslo");
    }

    #[test]
    fn test_name_past_end_is_empty() {
        let mut data = places_cache(&[(7, "Lisbon")]);
        data.truncate(data.len() - 2);
        let places = decode_places_cache(&data).unwrap();
        assert_eq!(places[0].id, 7);
        assert_eq!(places[0].name, "");
    }
}

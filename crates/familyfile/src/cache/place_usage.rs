//! `placeUsage.cache`: which records refer to each place.
//!
//! After the 16-byte header (magic `hcup`) and a 4-byte sub-header come
//! `count` variable-length records:
//!
//! ```text
//! 0   4 bytes   total size, including this field
//! 4   4 bytes   entry count n
//! 8   4 bytes   place ID
//! 12  4 bytes   padding
//! 16  n * 8     (referencing ID u32, type code u32)
//! ```

use crate::cache::{check_magic, record_count};
use crate::codec::primitives::Reader;
use crate::error::{CacheError, ShortRead};
use crate::limits::{CACHE_HEADER_LEN, PLACE_USAGE_CACHE_MAGIC};
use crate::model::{PlaceUsage, PlaceUsageEntry};

const RECORDS_START: usize = CACHE_HEADER_LEN + 4;
const RECORD_HEADER_LEN: usize = 16;
const ENTRY_LEN: usize = 8;

pub fn decode_place_usage(data: &[u8]) -> Result<Vec<PlaceUsage>, CacheError> {
    if data.len() < CACHE_HEADER_LEN {
        return Ok(Vec::new());
    }
    check_magic(data, PLACE_USAGE_CACHE_MAGIC)?;

    let count = record_count(data);
    let mut usages = Vec::new();
    let mut pos = RECORDS_START;
    while usages.len() < count {
        let Some(record) = record_at(data, pos) else {
            break;
        };
        let Ok(usage) = decode_record(record) else {
            break;
        };
        usages.push(usage);
        pos += record.len();
    }
    Ok(usages)
}

/// Returns the record starting at `pos` when its declared size is sane.
fn record_at(data: &[u8], pos: usize) -> Option<&[u8]> {
    let total = Reader::at(data, pos).read_u32().ok()? as usize;
    if total < RECORD_HEADER_LEN {
        return None;
    }
    data.get(pos..pos.checked_add(total)?)
}

fn decode_record(record: &[u8]) -> Result<PlaceUsage, ShortRead> {
    let mut reader = Reader::new(record);
    reader.skip(4)?;
    let n = reader.read_u32()? as usize;
    let place_id = reader.read_u32()?;
    reader.skip(4)?;

    let room = reader.remaining_len() / ENTRY_LEN;
    let mut entries = Vec::with_capacity(n.min(room));
    for _ in 0..n.min(room) {
        entries.push(PlaceUsageEntry {
            ref_id: reader.read_u32()?,
            type_code: reader.read_u32()?,
        });
    }
    Ok(PlaceUsage { place_id, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_record(place_id: u32, entries: &[(u32, u32)]) -> Vec<u8> {
        let total = RECORD_HEADER_LEN + entries.len() * ENTRY_LEN;
        let mut rec = Vec::with_capacity(total);
        rec.extend_from_slice(&(total as u32).to_le_bytes());
        rec.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        rec.extend_from_slice(&place_id.to_le_bytes());
        rec.extend_from_slice(&[0u8; 4]);
        for (ref_id, type_code) in entries {
            rec.extend_from_slice(&ref_id.to_le_bytes());
            rec.extend_from_slice(&type_code.to_le_bytes());
        }
        rec
    }

    fn usage_cache(count: u32, records: &[Vec<u8>]) -> Vec<u8> {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(PLACE_USAGE_CACHE_MAGIC.as_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&[0u8; 8]);
        for rec in records {
            data.extend_from_slice(rec);
        }
        data
    }

    #[test]
    fn test_decode_usage() {
        let data = usage_cache(
            2,
            &[
                usage_record(5, &[(100, 0x20C4), (200, 0x20C8)]),
                usage_record(6, &[]),
            ],
        );
        let usages = decode_place_usage(&data).unwrap();
        assert_eq!(usages.len(), 2);
        assert_eq!(usages[0].place_id, 5);
        assert_eq!(
            usages[0].entries,
            vec![
                PlaceUsageEntry { ref_id: 100, type_code: 0x20C4 },
                PlaceUsageEntry { ref_id: 200, type_code: 0x20C8 },
            ]
        );
        assert_eq!(usages[1].place_id, 6);
        assert!(usages[1].entries.is_empty());
    }

    #[test]
    fn test_entry_count_clamped_to_record() {
        let mut rec = usage_record(9, &[(1, 2)]);
        rec[4..8].copy_from_slice(&50u32.to_le_bytes());
        let usages = decode_place_usage(&usage_cache(1, &[rec])).unwrap();
        assert_eq!(usages[0].entries.len(), 1);
    }

    #[test]
    fn test_bad_size_stops() {
        let mut bad = usage_record(2, &[]);
        bad[..4].copy_from_slice(&8u32.to_le_bytes());
        let data = usage_cache(3, &[usage_record(1, &[(1, 1)]), bad, usage_record(3, &[])]);
        let usages = decode_place_usage(&data).unwrap();
        assert_eq!(usages.len(), 1);

        let mut overrun = usage_record(4, &[]);
        overrun[..4].copy_from_slice(&1000u32.to_le_bytes());
        assert!(decode_place_usage(&usage_cache(1, &[overrun])).unwrap().is_empty());
    }

    #[test]
    fn test_bad_magic_and_short_file() {
        let mut data = usage_cache(0, &[]);
        data[4..8].copy_from_slice(b"ahcp");
        assert!(matches!(
            decode_place_usage(&data),
            Err(CacheError::BadMagic { expected: "hcup", .. })
        ));
        assert!(decode_place_usage(b"\0\0\0\0hcup").unwrap().is_empty());
    }
}

//! `timestamps.cache`: fixed 20-byte records after a 16-byte header (magic `icst`).

use crate::cache::{check_magic, record_count};
use crate::codec::primitives::to_hex;
use crate::error::CacheError;
use crate::limits::{CACHE_HEADER_LEN, TIMESTAMP_RECORD_LEN, TIMESTAMPS_CACHE_MAGIC};
use crate::model::TimestampEntry;

pub fn decode_timestamps(data: &[u8]) -> Result<Vec<TimestampEntry>, CacheError> {
    if data.len() < CACHE_HEADER_LEN {
        return Ok(Vec::new());
    }
    check_magic(data, TIMESTAMPS_CACHE_MAGIC)?;

    Ok(data[CACHE_HEADER_LEN..]
        .chunks_exact(TIMESTAMP_RECORD_LEN)
        .take(record_count(data))
        .map(|rec| TimestampEntry {
            data: rec.to_vec(),
            hex: to_hex(rec),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamps_cache(count: u32, records: &[[u8; TIMESTAMP_RECORD_LEN]]) -> Vec<u8> {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(TIMESTAMPS_CACHE_MAGIC.as_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        for rec in records {
            data.extend_from_slice(rec);
        }
        data
    }

    #[test]
    fn test_records() {
        let data = timestamps_cache(2, &[[0xAB; 20], [0x01; 20]]);
        let entries = decode_timestamps(&data).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hex, "ab".repeat(20));
        assert_eq!(entries[1].data, vec![1u8; 20]);
    }

    #[test]
    fn test_count_and_partial_record_limit() {
        let mut data = timestamps_cache(5, &[[0; 20]]);
        data.extend_from_slice(&[0xFF; 7]);
        assert_eq!(decode_timestamps(&data).unwrap().len(), 1);

        let data = timestamps_cache(1, &[[0; 20], [1; 20]]);
        assert_eq!(decode_timestamps(&data).unwrap().len(), 1);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = timestamps_cache(0, &[]);
        data[4] = b'x';
        assert!(decode_timestamps(&data).is_err());
    }
}

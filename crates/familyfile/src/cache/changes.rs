//! Member change logs (`.changes` files).
//!
//! A change log is a sequence of `u32 LE size` + `size` bytes records. A zero
//! size or a record running past the end of the file ends the log.

use crate::codec::primitives::Reader;
use crate::model::{ChangeRecord, Member};

pub fn decode_changes(data: &[u8]) -> Vec<ChangeRecord> {
    let mut reader = Reader::new(data);
    let mut records = Vec::new();

    loop {
        let offset = reader.position();
        let Ok(size) = reader.read_u32() else {
            break;
        };
        if size == 0 {
            break;
        }
        let Ok(bytes) = reader.read_bytes(size as usize) else {
            break;
        };
        records.push(ChangeRecord {
            offset,
            size: bytes.len(),
            data: bytes.to_vec(),
        });
    }

    records
}

/// Builds a [`Member`] from its name and change-log bytes.
pub fn decode_member(name: &str, changes: &[u8]) -> Member {
    Member {
        name: name.to_string(),
        changes: decode_changes(changes),
    }
}

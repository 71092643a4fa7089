//! Record scanner for the primary data file.
//!
//! Records are found by searching for [`RECORD_MARKER`]. The header fields sit
//! around the marker:
//!
//! ```text
//! marker-8   4 bytes   padding (sometimes overflow from the previous record)
//! marker-4   2 bytes   sequence number (LE)
//! marker-2   2 bytes   type code (LE)
//! marker+0   4 bytes   marker 05 03 02 01
//! marker+4   4 bytes   declared data length (LE)
//! marker+8   4 bytes   record ID (LE)
//! marker+12  ...       data
//! ```

use crate::codec::primitives::{u16_le, u32_le};
use crate::limits::{RECORD_DATA_OFFSET, RECORD_HEADER_BACK_OFFSET, RECORD_MARKER};

/// Record kinds distinguished by the 2-byte type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum RecordKind {
    Person = 0x20C4,
    Family = 0x20C8,
    Schema = 0x20CC,
    Source = 0x20D0,
    Media = 0x20D4,
    Place = 0x20D8,
    Note = 0x2104,
    Document = 0x2108,
    Report = 0x210C,
}

impl RecordKind {
    /// Creates a RecordKind from its type code.
    pub fn from_u16(v: u16) -> Option<RecordKind> {
        match v {
            0x20C4 => Some(RecordKind::Person),
            0x20C8 => Some(RecordKind::Family),
            0x20CC => Some(RecordKind::Schema),
            0x20D0 => Some(RecordKind::Source),
            0x20D4 => Some(RecordKind::Media),
            0x20D8 => Some(RecordKind::Place),
            0x2104 => Some(RecordKind::Note),
            0x2108 => Some(RecordKind::Document),
            0x210C => Some(RecordKind::Report),
            _ => None,
        }
    }

    /// Short lowercase name used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Person => "person",
            RecordKind::Family => "family",
            RecordKind::Schema => "schema",
            RecordKind::Source => "source",
            RecordKind::Media => "media",
            RecordKind::Place => "place",
            RecordKind::Note => "note",
            RecordKind::Document => "document",
            RecordKind::Report => "report",
        }
    }
}

/// One record located in the primary data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Byte offset of the record header (marker - 8, clamped at 0).
    pub offset: usize,
    /// Byte offset of the marker.
    pub marker_pos: usize,
    pub type_code: u16,
    pub seq_num: u16,
    /// Data length as declared by the header.
    pub data_len: u32,
    pub id: u32,
    /// Data window, possibly extended past `data_len` (see [`scan_records`]).
    pub data: &'a [u8],
}

impl<'a> RawRecord<'a> {
    /// Builds a record directly from its parts; used by tests and synthetic streams.
    pub fn new(type_code: u16, id: u32, seq_num: u16, data: &'a [u8]) -> Self {
        Self {
            offset: 0,
            marker_pos: RECORD_HEADER_BACK_OFFSET,
            type_code,
            seq_num,
            data_len: data.len() as u32,
            id,
            data,
        }
    }

    /// Returns the decoded record kind, if the type code is known.
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_u16(self.type_code)
    }

    /// Absolute file offset of the first data byte.
    pub fn data_offset(&self) -> usize {
        self.marker_pos + RECORD_DATA_OFFSET
    }
}

fn find_marker(data: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(RECORD_MARKER.len())
        .position(|w| w == RECORD_MARKER)
        .map(|i| from + i)
}

/// Scans the whole buffer for records.
///
/// Scanning stops silently at the first position with no further marker; the
/// remaining bytes are trailer data.
///
/// After the scan, every record whose declared data ends before the next
/// record's marker is extended up to that marker. Real files contain records
/// (notably families) whose fields run past the declared length into the gap or
/// into the next header's padding. The TLV parser stops on zero padding, so the
/// extra bytes are harmless when they are not field data.
pub fn scan_records(data: &[u8]) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(marker_pos) = find_marker(data, pos) {
        let seq_num = marker_pos
            .checked_sub(4)
            .and_then(|o| u16_le(data, o).ok())
            .unwrap_or(0);
        let type_code = marker_pos
            .checked_sub(2)
            .and_then(|o| u16_le(data, o).ok())
            .unwrap_or(0);
        let data_len = u32_le(data, marker_pos + 4).unwrap_or(0);
        let id = u32_le(data, marker_pos + 8).unwrap_or(0);

        let data_start = (marker_pos + RECORD_DATA_OFFSET).min(data.len());
        let data_end = data_start.saturating_add(data_len as usize).min(data.len());

        records.push(RawRecord {
            offset: marker_pos.saturating_sub(RECORD_HEADER_BACK_OFFSET),
            marker_pos,
            type_code,
            seq_num,
            data_len,
            id,
            data: &data[data_start..data_end],
        });

        pos = marker_pos + RECORD_MARKER.len();
    }

    extend_overflow(data, &mut records);
    records
}

fn extend_overflow<'a>(data: &'a [u8], records: &mut [RawRecord<'a>]) {
    let next_markers: Vec<usize> = records
        .iter()
        .skip(1)
        .map(|r| r.marker_pos)
        .chain(std::iter::once(data.len()))
        .collect();

    for (record, boundary) in records.iter_mut().zip(next_markers) {
        let data_start = record.data_offset();
        if data_start >= data.len() {
            continue;
        }
        let boundary = boundary.min(data.len());
        let declared_end = data_start.saturating_add(record.data_len as usize);
        if boundary > declared_end {
            record.data = &data[data_start..boundary];
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Builds one record with a 4-byte timestamp ahead of `payload`.
    pub(crate) fn make_record(seq: u16, kind: RecordKind, id: u32, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; 4];
        buf.extend_from_slice(&seq.to_le_bytes());
        buf.extend_from_slice(&(kind as u16).to_le_bytes());
        buf.extend_from_slice(&RECORD_MARKER);
        buf.extend_from_slice(&((payload.len() + 4) as u32).to_le_bytes());
        buf.extend_from_slice(&id.to_le_bytes());
        buf.extend_from_slice(&[0u8; 4]);
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_single_record() {
        let raw = make_record(1, RecordKind::Person, 100, b"test data payload");
        let records = scan_records(&raw);
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.kind(), Some(RecordKind::Person));
        assert_eq!(rec.seq_num, 1);
        assert_eq!(rec.id, 100);
        assert_eq!(rec.offset, 0);
        assert_eq!(rec.marker_pos, 8);
        assert_eq!(rec.data.len(), 4 + 17);
        assert_eq!(&rec.data[4..], b"test data payload");
    }

    #[test]
    fn test_multiple_records() {
        let mut data = make_record(1, RecordKind::Person, 10, b"person");
        data.extend(make_record(2, RecordKind::Family, 20, b"family"));
        data.extend(make_record(3, RecordKind::Schema, 30, b"schema"));

        let records = scan_records(&data);
        assert_eq!(records.len(), 3);
        let expected = [
            (RecordKind::Person, 10, 1),
            (RecordKind::Family, 20, 2),
            (RecordKind::Schema, 30, 3),
        ];
        for (rec, (kind, id, seq)) in records.iter().zip(expected) {
            assert_eq!(rec.kind(), Some(kind));
            assert_eq!(rec.id, id);
            assert_eq!(rec.seq_num, seq);
        }
    }

    #[test]
    fn test_overflow_extension() {
        let mut data = make_record(1, RecordKind::Person, 10, b"short");
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
        data.extend(make_record(2, RecordKind::Family, 20, b"next"));

        let records = scan_records(&data);
        assert_eq!(records.len(), 2);

        let expected_len = records[1].marker_pos - records[0].data_offset();
        assert_eq!(records[0].data.len(), expected_len);
        // gap bytes plus the next record's padding/seq/type are now visible
        assert_eq!(&records[0].data[9..13], &[0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_last_record_extends_to_end() {
        let mut data = make_record(1, RecordKind::Place, 5, b"Paris");
        data.extend_from_slice(b"trailer");
        let records = scan_records(&data);
        assert_eq!(records.len(), 1);
        assert!(records[0].data.ends_with(b"trailer"));
    }

    #[test]
    fn test_declared_length_clipped() {
        let mut data = make_record(1, RecordKind::Person, 1, b"abc");
        // declare far more data than present
        data[12..16].copy_from_slice(&1000u32.to_le_bytes());
        let records = scan_records(&data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.len(), data.len() - 20);
    }

    #[test]
    fn test_no_marker() {
        let records = scan_records(b"no marker here at all, just regular data bytes");
        assert!(records.is_empty());
        assert!(scan_records(&[]).is_empty());
    }

    #[test]
    fn test_marker_at_buffer_start() {
        let mut data = RECORD_MARKER.to_vec();
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(&9u32.to_le_bytes());
        data.extend_from_slice(b"wxyz");
        let records = scan_records(&data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].type_code, 0);
        assert_eq!(records[0].id, 9);
        assert_eq!(records[0].data, b"wxyz");
    }

    #[test]
    fn test_truncated_header() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&RECORD_MARKER);
        data.extend_from_slice(&[0x10, 0x00]);
        let records = scan_records(&data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data_len, 0);
        assert!(records[0].data.is_empty());
    }

    proptest! {
        #[test]
        fn prop_scan_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            for rec in scan_records(&data) {
                prop_assert!(rec.marker_pos + 4 <= data.len());
            }
        }
    }
}

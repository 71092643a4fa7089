//! Tag-length-value field parsing.
//!
//! Every field header is `total_len: u16 LE, tag: u16 LE`, where `total_len`
//! counts the 4 header bytes too. The same scheme is nested inside event payloads.

use crate::codec::primitives::u16_le;
use crate::codec::record::{RawRecord, RecordKind};
use crate::diagnostics::Diagnostics;
use crate::error::ShortRead;
use crate::limits::{EVENT_FIXED_PREFIX_LEN, FAMILY_DATA_FILE, RECORD_PREAMBLE_LEN, TLV_HEADER_LEN};

/// One field of a record's TLV area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvField<'a> {
    pub tag: u16,
    /// Offset of the field header within the record data.
    pub offset: usize,
    pub data: &'a [u8],
    /// `total_len` as written in the field header.
    pub declared_len: u16,
    /// The field ran past the end of the record and was clipped.
    pub truncated: bool,
}

/// Parses the TLV fields of a record's data window.
///
/// Skips the 6-byte preamble. A `total_len` below 4 ends the list; a field that
/// overruns the buffer is clipped and ends the list after being emitted.
pub fn parse_tlv_fields(data: &[u8]) -> Vec<TlvField<'_>> {
    if data.len() < RECORD_PREAMBLE_LEN {
        return Vec::new();
    }
    parse_tlv_from(data, RECORD_PREAMBLE_LEN)
}

/// Parses TLV fields starting at an arbitrary position.
pub fn parse_tlv_from(data: &[u8], start: usize) -> Vec<TlvField<'_>> {
    let mut fields = Vec::new();
    let mut pos = start;

    while pos + TLV_HEADER_LEN <= data.len() {
        let (Ok(total_len), Ok(tag)) = (u16_le(data, pos), u16_le(data, pos + 2)) else {
            break;
        };
        if (total_len as usize) < TLV_HEADER_LEN {
            break;
        }

        let declared_end = pos + total_len as usize;
        let truncated = declared_end > data.len();
        let end = declared_end.min(data.len());

        fields.push(TlvField {
            tag,
            offset: pos,
            data: &data[pos + TLV_HEADER_LEN..end],
            declared_len: total_len,
            truncated,
        });

        if truncated {
            break;
        }
        pos = end;
    }

    fields
}

/// Parses a record's fields, reporting a short record or a clipped last field.
pub(crate) fn record_fields<'a>(rec: &RawRecord<'a>, diags: &Diagnostics) -> Vec<TlvField<'a>> {
    let kind = rec.kind().map_or("unknown", RecordKind::name);
    if rec.data.len() < RECORD_PREAMBLE_LEN {
        diags.add(
            FAMILY_DATA_FILE,
            Some(rec.offset),
            format!("{kind} record {} has {} data bytes, no fields", rec.id, rec.data.len()),
            None,
        );
        return Vec::new();
    }

    let fields = parse_tlv_fields(rec.data);
    if let Some(last) = fields.last().filter(|f| f.truncated) {
        let cause = ShortRead {
            offset: last.offset,
            width: last.declared_len as usize,
            len: rec.data.len(),
        };
        diags.add(
            FAMILY_DATA_FILE,
            Some(rec.data_offset() + last.offset),
            format!("{kind} record {} field 0x{:04X} truncated", rec.id, last.tag),
            Some(&cause),
        );
    }
    fields
}

/// One nested entry of an event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubField<'a> {
    pub tag: u16,
    /// `total_len` including the 4 header bytes.
    pub len: u16,
    pub data: &'a [u8],
}

/// Iterator over the nested sub-fields of an event payload.
///
/// Starts after the 18-byte fixed prefix. Unlike the outer parser it never
/// clips: an entry that overruns the payload ends iteration.
#[derive(Debug, Clone)]
pub struct SubFields<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SubFields<'a> {
    pub fn new(event_data: &'a [u8]) -> Self {
        Self {
            data: event_data,
            pos: EVENT_FIXED_PREFIX_LEN,
        }
    }
}

impl<'a> Iterator for SubFields<'a> {
    type Item = SubField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.pos;
        let len = u16_le(self.data, pos).ok()?;
        let tag = u16_le(self.data, pos + 2).ok()?;
        if (len as usize) < TLV_HEADER_LEN {
            self.pos = self.data.len();
            return None;
        }
        let end = pos + len as usize;
        let Some(data) = self.data.get(pos + TLV_HEADER_LEN..end) else {
            self.pos = self.data.len();
            return None;
        };
        self.pos = end;
        Some(SubField { tag, len, data })
    }
}

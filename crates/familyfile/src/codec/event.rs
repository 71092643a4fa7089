//! Event payload decoding, shared by person and family records.
//!
//! An event field's data has an 18-byte fixed prefix (the schema reference sits
//! at byte 16) followed by nested sub-fields: a date, a note reference, memo text
//! and a trailing source-citation table. Place references are inline
//! `[[pt:NNN]]` markers found anywhere in the payload.

use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::codec::primitives::{lossy, strip_nulls, u16_le, u32_le};
use crate::codec::tlv::{SubField, SubFields};
use crate::limits::{
    EVENT_FIXED_PREFIX_LEN, EVENT_SCHEMA_OFFSET, NOTE_EVENT_TAG_LIMIT, SHORT_SUB_FIELD_LEN,
};
use crate::model::{Event, NoteRef, SourceCitation};
use crate::util::format_event_date;

lazy_static! {
    static ref PLACE_REF: Regex =
        Regex::new(r"\[\[pt:(\d+)\]\]").expect("valid place reference regex");
}

const CITATION_TABLE_HEADER_LEN: usize = 8;
const CITATION_ENTRY_HEADER_LEN: usize = 8;

/// Decodes an event field into an [`Event`].
pub fn decode_event(tag: u16, data: &[u8]) -> Event {
    Event {
        tag,
        schema_id: schema_id(data),
        place_refs: extract_place_refs(data),
        date: format_event_date(data),
        text: extract_event_text(data),
        source_citations: extract_event_citations(data),
        raw_data: data.to_vec(),
    }
}

/// Event definition referenced by the payload; zero means none.
pub fn schema_id(data: &[u8]) -> Option<u16> {
    if data.len() < EVENT_FIXED_PREFIX_LEN {
        return None;
    }
    u16_le(data, EVENT_SCHEMA_OFFSET).ok().filter(|&id| id != 0)
}

/// Every `[[pt:NNN]]` place ID in `data`, in order of appearance.
pub fn extract_place_refs(data: &[u8]) -> Vec<u32> {
    PLACE_REF
        .captures_iter(data)
        .filter_map(|caps| {
            let digits = caps.get(1)?.as_bytes();
            std::str::from_utf8(digits).ok()?.parse().ok()
        })
        .collect()
}

/// Removes `[[pt:NNN]]` markers from text.
pub fn strip_place_refs(text: &[u8]) -> Vec<u8> {
    PLACE_REF.replace_all(text, &b""[..]).into_owned()
}

/// Note record referenced by the payload: the first tag-0 sub-field of
/// exactly 8 bytes holding a nonzero ID.
pub fn extract_note_ref(data: &[u8]) -> Option<u32> {
    SubFields::new(data)
        .filter(|sub| sub.tag == 0 && sub.len == SHORT_SUB_FIELD_LEN)
        .find_map(|sub| u32_le(sub.data, 0).ok().filter(|&id| id != 0))
}

/// Note back-reference of a note-carrying event (tag below 0x03E8).
pub fn event_note_ref(event: &Event) -> Option<NoteRef> {
    if event.tag >= NOTE_EVENT_TAG_LIMIT {
        return None;
    }
    extract_note_ref(&event.raw_data).map(|note_id| NoteRef {
        note_id,
        event_tag: event.tag,
        schema_id: event.schema_id.unwrap_or(0),
    })
}

/// Memo text of the event.
///
/// Takes the first tag-0 sub-field longer than 8 bytes whose first non-null
/// byte is printable. Citation tables start with binary lengths and are skipped
/// by that test.
pub fn extract_event_text(data: &[u8]) -> String {
    for sub in SubFields::new(data).filter(is_memo_text) {
        let text = lossy(&strip_place_refs(&strip_nulls(sub.data)));
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    String::new()
}

fn is_memo_text(sub: &SubField<'_>) -> bool {
    sub.tag == 0
        && sub.len > SHORT_SUB_FIELD_LEN
        && sub.data.iter().find(|&&b| b != 0).is_some_and(|&b| b >= 0x20)
}

/// Citations of the event, read from its last sub-field that is not memo text.
pub fn extract_event_citations(data: &[u8]) -> Vec<SourceCitation> {
    SubFields::new(data)
        .filter(|sub| !is_memo_text(sub))
        .last()
        .map(|sub| decode_citation_table(sub.data))
        .unwrap_or_default()
}

/// Decodes a source-citation table.
///
/// ```text
/// u32 inner length | u32 count | count x (u16 entry len, u16 skipped, u32 source id, detail)
/// ```
///
/// The entry length includes its own 8-byte header. The first malformed or
/// truncated entry ends the table.
pub fn decode_citation_table(data: &[u8]) -> Vec<SourceCitation> {
    let Ok(count) = u32_le(data, 4) else {
        return Vec::new();
    };

    let mut citations = Vec::new();
    let mut pos = CITATION_TABLE_HEADER_LEN;
    for _ in 0..count {
        if pos + CITATION_ENTRY_HEADER_LEN > data.len() {
            break;
        }
        let Ok(entry_len) = u16_le(data, pos) else {
            break;
        };
        let entry_len = entry_len as usize;
        if entry_len < CITATION_ENTRY_HEADER_LEN || pos + entry_len > data.len() {
            break;
        }
        let Ok(source_id) = u32_le(data, pos + 4) else {
            break;
        };
        let detail = lossy(&strip_nulls(&data[pos + CITATION_ENTRY_HEADER_LEN..pos + entry_len]));
        citations.push(SourceCitation { source_id, detail });
        pos += entry_len;
    }
    citations
}

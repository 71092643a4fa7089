//! Inline note record decoder (type 0x2104).

use crate::codec::primitives::{is_printable_ascii, lossy};
use crate::codec::record::RawRecord;
use crate::diagnostics::Diagnostics;
use crate::limits::{FAMILY_DATA_FILE, MIN_NOTE_TEXT_RUN, TEXT_RECORD_PREAMBLE_LEN};
use crate::markup::{parse_markup, plain_text};
use crate::model::Note;

/// UTF-8 encoding of `«`.
const OPEN_BYTES: [u8; 2] = [0xC2, 0xAB];
/// UTF-8 encoding of `»`.
const CLOSE_BYTES: [u8; 2] = [0xC2, 0xBB];

pub fn decode_note(rec: &RawRecord<'_>, diags: &Diagnostics) -> Note {
    let mut note = Note {
        id: rec.id,
        seq_num: rec.seq_num,
        ..Default::default()
    };

    let text = rec
        .data
        .get(TEXT_RECORD_PREAMBLE_LEN..)
        .map(extract_note_text)
        .unwrap_or_default();
    if text.is_empty() {
        diags.add(
            FAMILY_DATA_FILE,
            Some(rec.offset),
            format!("note record {} has no text", rec.id),
            None,
        );
        return note;
    }

    note.markup = parse_markup(&text);
    note.display_text = plain_text(&note.markup);
    note.raw_text = text;
    note
}

/// Locates the note text inside the record body.
///
/// Text normally starts at the first `«`. It runs to the last closing tag
/// matching the first opening tag, or to the first null byte when there is no
/// such closing tag. Without any `«`, the first run of five printable ASCII
/// bytes starts the text.
pub fn extract_note_text(body: &[u8]) -> String {
    if let Some(start) = find(body, &OPEN_BYTES) {
        return lossy(trim_markup_end(&body[start..]));
    }

    let Some(start) = body
        .windows(MIN_NOTE_TEXT_RUN)
        .position(|w| w.iter().all(|&b| is_printable_ascii(b)))
    else {
        return String::new();
    };
    lossy(until_null(&body[start..]))
}

fn trim_markup_end(text: &[u8]) -> &[u8] {
    let inner = &text[OPEN_BYTES.len()..];
    let name_len = inner
        .iter()
        .position(|&b| b == b'=' || b == CLOSE_BYTES[0] || b == 0)
        .unwrap_or(inner.len());
    let name = &inner[..name_len];

    if !name.is_empty() {
        let mut closing = Vec::with_capacity(name.len() + 5);
        closing.extend_from_slice(&OPEN_BYTES);
        closing.push(b'/');
        closing.extend_from_slice(name);
        closing.extend_from_slice(&CLOSE_BYTES);
        if let Some(pos) = rfind(text, &closing) {
            return &text[..pos + closing.len()];
        }
    }
    until_null(text)
}

fn until_null(text: &[u8]) -> &[u8] {
    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    &text[..end]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

//! Standalone note files.
//!
//! Note files hold markup text directly. Their name links them to an owner:
//! `p<person>-<event tag>-<source>.note`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::codec::primitives::lossy;
use crate::markup::{parse_markup, plain_text};
use crate::model::Note;

lazy_static! {
    static ref NOTE_FILE_NAME: Regex =
        Regex::new(r"^p(\d+)-(\d+)-(\d+)\.note$").expect("valid note file name regex");
}

/// Owner IDs encoded in a note file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteFileName {
    pub person_id: u32,
    pub event_tag: u32,
    pub source_id: u32,
}

impl NoteFileName {
    /// Parses `p12-400-0.note`. Numbers that overflow u32 fail the parse.
    pub fn parse(name: &str) -> Option<NoteFileName> {
        let caps = NOTE_FILE_NAME.captures(name)?;
        Some(NoteFileName {
            person_id: caps[1].parse().ok()?,
            event_tag: caps[2].parse().ok()?,
            source_id: caps[3].parse().ok()?,
        })
    }
}

/// Decodes one note file. Names that do not follow the pattern leave the
/// owner fields at zero.
pub fn decode_note_file(name: &str, data: &[u8]) -> Note {
    let owner = NoteFileName::parse(name).unwrap_or_default();
    let raw_text = lossy(data);
    let markup = parse_markup(&raw_text);
    Note {
        person_id: owner.person_id,
        event_tag: owner.event_tag,
        source_id: owner.source_id,
        filename: name.to_string(),
        display_text: plain_text(&markup),
        markup,
        raw_text,
        ..Default::default()
    }
}

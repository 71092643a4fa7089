//! Events and the small records hanging off persons, families and events.

use serde::Serialize;

use crate::model::is_zero;

/// A TLV field no decoder claimed. Kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawField {
    pub tag: u16,
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Declared total length of the field, header included.
    pub size: u16,
}

impl RawField {
    pub fn new(tag: u16, data: &[u8], size: u16) -> Self {
        Self {
            tag,
            data: data.to_vec(),
            size,
        }
    }
}

/// Reference to a source record, with free-text detail (page, film number...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCitation {
    pub source_id: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

/// Back-reference from an event to an inline note record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteRef {
    pub note_id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub event_tag: u16,
    #[serde(skip_serializing_if = "is_zero")]
    pub schema_id: u16,
}

/// A life event on a person or a family.
///
/// `tag` identifies the field; tags below 0x03E8 also mark note-carrying events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    pub tag: u16,
    /// Event definition record that names this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub place_refs: Vec<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_citations: Vec<SourceCitation>,
    #[serde(skip)]
    pub raw_data: Vec<u8>,
}

pub type PersonEvent = Event;
pub type FamilyEvent = Event;

//! Record dispatch for the primary data file.

use log::debug;

use crate::codec::family::decode_family;
use crate::codec::media::decode_media;
use crate::codec::note::decode_note;
use crate::codec::person::decode_person;
use crate::codec::place::decode_place;
use crate::codec::record::{RawRecord, RecordKind, scan_records};
use crate::codec::schema::decode_schema;
use crate::codec::source::decode_source;
use crate::diagnostics::Diagnostics;
use crate::model::{EventDefinition, Family, MediaRef, Note, Person, Place, Source};

/// Entities decoded from the record stream, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyData {
    pub persons: Vec<Person>,
    pub families: Vec<Family>,
    pub places: Vec<Place>,
    pub event_definitions: Vec<EventDefinition>,
    pub sources: Vec<Source>,
    pub notes: Vec<Note>,
    pub media_refs: Vec<MediaRef>,
    /// Document records seen (recognized, not decoded).
    pub documents: usize,
    /// Report records seen (recognized, not decoded).
    pub reports: usize,
    /// Records with an unknown type code.
    pub unknown: usize,
}

/// Scans `data` and decodes every record it finds.
pub fn decode_family_data(data: &[u8], diags: &Diagnostics) -> FamilyData {
    decode_records(&scan_records(data), diags)
}

/// Decodes already scanned records.
pub fn decode_records(records: &[RawRecord<'_>], diags: &Diagnostics) -> FamilyData {
    let mut out = FamilyData::default();

    for rec in records {
        match rec.kind() {
            Some(RecordKind::Person) => out.persons.push(decode_person(rec, diags)),
            Some(RecordKind::Family) => out.families.push(decode_family(rec, diags)),
            Some(RecordKind::Schema) => out.event_definitions.push(decode_schema(rec, diags)),
            Some(RecordKind::Source) => out.sources.push(decode_source(rec, diags)),
            Some(RecordKind::Media) => out.media_refs.push(decode_media(rec, diags)),
            Some(RecordKind::Place) => out.places.push(decode_place(rec, diags)),
            Some(RecordKind::Note) => out.notes.push(decode_note(rec, diags)),
            Some(RecordKind::Document) => out.documents += 1,
            Some(RecordKind::Report) => out.reports += 1,
            None => out.unknown += 1,
        }
    }

    debug!(
        "event=decode_records module=familydata status=ok records={} persons={} families={} places={} schemas={} sources={} notes={} media={} documents={} reports={} unknown={}",
        records.len(),
        out.persons.len(),
        out.families.len(),
        out.places.len(),
        out.event_definitions.len(),
        out.sources.len(),
        out.notes.len(),
        out.media_refs.len(),
        out.documents,
        out.reports,
        out.unknown,
    );

    out
}

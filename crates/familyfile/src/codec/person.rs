//! Person record decoder (type 0x20C4).

use crate::codec::event::{decode_citation_table, decode_event, event_note_ref};
use crate::codec::primitives::clean_string;
use crate::codec::record::RawRecord;
use crate::codec::tlv::record_fields;
use crate::diagnostics::Diagnostics;
use crate::limits::EVENT_TAG_MIN;
use crate::model::{Person, RawField, Sex};

// Person field tags
const TAG_SURNAME: u16 = 0x000C;
const TAG_PREFIX: u16 = 0x0019;
const TAG_SEX: u16 = 0x001B;
const TAG_GIVEN_NAME: u16 = 0x001E;
const TAG_NAME_CITATIONS: u16 = 0x0020;
const TAG_SUFFIX: u16 = 0x0021;
const TAG_SURNAME_ALT: u16 = 0x0023;
const TAG_USER_ID: u16 = 0x0046;

/// Decodes a person record. Never fails; problems go to `diags`.
pub fn decode_person(rec: &RawRecord<'_>, diags: &Diagnostics) -> Person {
    let mut person = Person::new(rec.id, rec.seq_num);

    for field in record_fields(rec, diags) {
        match field.tag {
            TAG_GIVEN_NAME => person.given_name = clean_string(field.data),
            TAG_SURNAME | TAG_SURNAME_ALT => {
                if person.surname.is_empty() {
                    person.surname = clean_string(field.data);
                }
            }
            TAG_SEX => {
                if let Some(&flag) = field.data.first() {
                    person.sex = Sex::from_flag(flag);
                }
            }
            TAG_PREFIX => person.prefix = clean_string(field.data),
            TAG_SUFFIX => person.suffix = clean_string(field.data),
            TAG_USER_ID => person.user_id = clean_string(field.data),
            TAG_NAME_CITATIONS => {
                person.source_citations.extend(decode_citation_table(field.data));
            }
            tag if tag >= EVENT_TAG_MIN => {
                let event = decode_event(tag, field.data);
                if let Some(note_ref) = event_note_ref(&event) {
                    person.note_refs.push(note_ref);
                }
                person.events.push(event);
            }
            tag => person
                .raw_fields
                .push(RawField::new(tag, field.data, field.declared_len)),
        }
    }

    person
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::event::tests::{citation_table, event_payload};
    use crate::codec::record::RecordKind;
    use crate::codec::tlv::tests::{record_data, tlv};
    use crate::model::NoteRef;
    use crate::util::date::tests::dated_event;

    fn person_record(data: &[u8]) -> RawRecord<'_> {
        RawRecord::new(RecordKind::Person as u16, 42, 7, data)
    }

    #[test]
    fn test_names_and_sex() {
        let data = record_data(&[
            tlv(TAG_GIVEN_NAME, b"Alice\0\0"),
            tlv(TAG_SURNAME, b"Smith\0"),
            tlv(TAG_SEX, &[2]),
            tlv(TAG_PREFIX, b"Dr."),
            tlv(TAG_SUFFIX, b"Jr."),
            tlv(TAG_USER_ID, b"A-17"),
        ]);
        let diags = Diagnostics::unlimited();
        let p = decode_person(&person_record(&data), &diags);
        assert_eq!(p.id, 42);
        assert_eq!(p.seq_num, 7);
        assert_eq!(p.given_name, "Alice");
        assert_eq!(p.surname, "Smith");
        assert_eq!(p.sex, Sex::Female);
        assert_eq!(p.prefix, "Dr.");
        assert_eq!(p.suffix, "Jr.");
        assert_eq!(p.user_id, "A-17");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_first_surname_wins() {
        let data = record_data(&[
            tlv(TAG_SURNAME_ALT, b"Jones"),
            tlv(TAG_SURNAME, b"Smith"),
        ]);
        let p = decode_person(&person_record(&data), &Diagnostics::unlimited());
        assert_eq!(p.surname, "Jones");

        let data = record_data(&[tlv(TAG_SURNAME, b"\0\0"), tlv(TAG_SURNAME_ALT, b"Brown")]);
        let p = decode_person(&person_record(&data), &Diagnostics::unlimited());
        assert_eq!(p.surname, "Brown");
    }

    #[test]
    fn test_events_and_note_refs() {
        let mut birth = dated_event(0, 2, 5, 1901);
        birth.extend(tlv(0, b"at home [[pt:12]]"));
        let note = event_payload(3, &[tlv(0, &900u32.to_le_bytes())]);
        let data = record_data(&[tlv(0x0410, &birth), tlv(0x0200, &note), tlv(0x0500, &note)]);

        let p = decode_person(&person_record(&data), &Diagnostics::unlimited());
        assert_eq!(p.events.len(), 3);
        assert_eq!(p.events[0].date, "2 May 1901");
        assert_eq!(p.events[0].place_refs, vec![12]);
        assert_eq!(p.events[0].text, "at home");
        assert_eq!(p.events[1].schema_id, Some(3));
        // 0x0410 and 0x0500 are past the note threshold
        assert_eq!(
            p.note_refs,
            vec![NoteRef { note_id: 900, event_tag: 0x0200, schema_id: 3 }]
        );
    }

    #[test]
    fn test_name_citations_and_raw_fields() {
        let data = record_data(&[
            tlv(TAG_NAME_CITATIONS, &citation_table(&[(8, "birth record")])),
            tlv(0x0005, b"\x01\x02"),
        ]);
        let p = decode_person(&person_record(&data), &Diagnostics::unlimited());
        assert_eq!(p.source_citations.len(), 1);
        assert_eq!(p.source_citations[0].source_id, 8);
        assert_eq!(p.source_citations[0].detail, "birth record");
        assert_eq!(p.raw_fields.len(), 1);
        assert_eq!(p.raw_fields[0].tag, 0x0005);
        assert_eq!(p.raw_fields[0].data, vec![1, 2]);
        assert_eq!(p.raw_fields[0].size, 6);
    }

    #[test]
    fn test_short_record_is_minimal() {
        let diags = Diagnostics::unlimited();
        let p = decode_person(&person_record(&[0, 1, 2]), &diags);
        assert_eq!(p, Person::new(42, 7));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_unknown_sex_flag() {
        let data = record_data(&[tlv(TAG_SEX, &[9])]);
        let p = decode_person(&person_record(&data), &Diagnostics::unlimited());
        assert_eq!(p.sex, Sex::Unknown);
    }
}

//! Event definition ("schema") record decoder (type 0x20CC).

use crate::codec::primitives::clean_string;
use crate::codec::record::RawRecord;
use crate::codec::tlv::record_fields;
use crate::diagnostics::Diagnostics;
use crate::model::{EventDefinition, RawField};

pub(crate) const TAG_DISPLAY_NAME: u16 = 0x0014;
const TAG_GEDCOM_CODE: u16 = 0x0019;
const TAG_SHORT_LABEL: u16 = 0x0028;
const TAG_ABBREVIATION: u16 = 0x0032;
const TAG_ABBREVIATION2: u16 = 0x0037;
const TAG_ABBREVIATION3: u16 = 0x003C;
const TAG_SENTENCE_FORM: u16 = 0x006E;
const TAG_PREPOSITION: u16 = 0x0078;

pub fn decode_schema(rec: &RawRecord<'_>, diags: &Diagnostics) -> EventDefinition {
    let mut def = EventDefinition {
        id: rec.id,
        seq_num: rec.seq_num,
        ..Default::default()
    };

    for field in record_fields(rec, diags) {
        let slot = match field.tag {
            TAG_DISPLAY_NAME => &mut def.display_name,
            TAG_GEDCOM_CODE => &mut def.gedcom_code,
            TAG_SHORT_LABEL => &mut def.short_label,
            TAG_ABBREVIATION => &mut def.abbreviation,
            TAG_ABBREVIATION2 => &mut def.abbreviation2,
            TAG_ABBREVIATION3 => &mut def.abbreviation3,
            TAG_SENTENCE_FORM => &mut def.sentence_form,
            TAG_PREPOSITION => &mut def.preposition,
            tag => {
                def.raw_fields
                    .push(RawField::new(tag, field.data, field.declared_len));
                continue;
            }
        };
        *slot = clean_string(field.data);
    }

    def
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::record::RecordKind;
    use crate::codec::tlv::tests::{record_data, tlv};

    #[test]
    fn test_naming_variants() {
        let data = record_data(&[
            tlv(TAG_DISPLAY_NAME, b"Birth\0"),
            tlv(TAG_GEDCOM_CODE, b"BIRT"),
            tlv(TAG_SHORT_LABEL, b"born"),
            tlv(TAG_ABBREVIATION, b"b."),
            tlv(TAG_ABBREVIATION2, b"bn"),
            tlv(TAG_ABBREVIATION3, b"B"),
            tlv(TAG_SENTENCE_FORM, b"[Name] was born"),
            tlv(TAG_PREPOSITION, b"in"),
            tlv(0x0090, &[1, 2, 3]),
        ]);
        let rec = RawRecord::new(RecordKind::Schema as u16, 8, 1, &data);
        let def = decode_schema(&rec, &Diagnostics::unlimited());
        assert_eq!(def.id, 8);
        assert_eq!(def.display_name, "Birth");
        assert_eq!(def.gedcom_code, "BIRT");
        assert_eq!(def.short_label, "born");
        assert_eq!(def.abbreviation, "b.");
        assert_eq!(def.abbreviation2, "bn");
        assert_eq!(def.abbreviation3, "B");
        assert_eq!(def.sentence_form, "[Name] was born");
        assert_eq!(def.preposition, "in");
        assert_eq!(def.raw_fields.len(), 1);
        assert_eq!(def.raw_fields[0].tag, 0x0090);
    }

    #[test]
    fn test_empty_schema() {
        let rec = RawRecord::new(RecordKind::Schema as u16, 9, 0, &[0; 6]);
        let diags = Diagnostics::unlimited();
        let def = decode_schema(&rec, &diags);
        assert_eq!(def.id, 9);
        assert!(def.display_name.is_empty());
        assert!(diags.is_empty());
    }
}

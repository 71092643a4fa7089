//! Family record decoder (type 0x20C8).

use crate::codec::event::{decode_event, event_note_ref};
use crate::codec::primitives::{u16_le, u32_le};
use crate::codec::record::RawRecord;
use crate::codec::tlv::record_fields;
use crate::diagnostics::Diagnostics;
use crate::limits::EVENT_TAG_MIN;
use crate::model::{Family, RawField};

const TAG_PARTNER1: u16 = 0x0050;
const TAG_PARTNER2: u16 = 0x0051;
const TAG_CHILD_FIRST: u16 = 0x00FA;
const TAG_CHILD_LAST: u16 = 0x00FF;

/// Decodes a family record. Never fails; problems go to `diags`.
pub fn decode_family(rec: &RawRecord<'_>, diags: &Diagnostics) -> Family {
    let mut family = Family::new(rec.id, rec.seq_num);

    for field in record_fields(rec, diags) {
        match field.tag {
            TAG_PARTNER1 => family.partner1 = partner_id(field.data),
            TAG_PARTNER2 => family.partner2 = partner_id(field.data),
            TAG_CHILD_FIRST..=TAG_CHILD_LAST => {
                // child IDs sit in the upper 24 bits
                let child = u32_le(field.data, 0).map(|raw| raw >> 8).unwrap_or(0);
                if child != 0 {
                    family.children.push(child);
                }
            }
            tag if tag >= EVENT_TAG_MIN => {
                let event = decode_event(tag, field.data);
                if let Some(note_ref) = event_note_ref(&event) {
                    family.note_refs.push(note_ref);
                }
                family.events.push(event);
            }
            tag => family
                .raw_fields
                .push(RawField::new(tag, field.data, field.declared_len)),
        }
    }

    family
}

/// Partner person ID: u32, or a legacy u16 when the field is shorter. Zero is unknown.
fn partner_id(data: &[u8]) -> Option<u32> {
    let id = match u32_le(data, 0) {
        Ok(id) => id,
        Err(_) => u32::from(u16_le(data, 0).ok()?),
    };
    (id != 0).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::record::RecordKind;
    use crate::codec::tlv::tests::{record_data, tlv};
    use crate::util::date::tests::dated_event;

    fn family_record(data: &[u8]) -> RawRecord<'_> {
        RawRecord::new(RecordKind::Family as u16, 500, 2, data)
    }

    fn child(id: u32) -> Vec<u8> {
        (id << 8).to_le_bytes().to_vec()
    }

    #[test]
    fn test_partners_and_children() {
        let data = record_data(&[
            tlv(TAG_PARTNER1, &10u32.to_le_bytes()),
            tlv(TAG_PARTNER2, &11u32.to_le_bytes()),
            tlv(0x00FA, &child(20)),
            tlv(0x00FB, &child(21)),
            tlv(0x00FF, &child(22)),
        ]);
        let f = decode_family(&family_record(&data), &Diagnostics::unlimited());
        assert_eq!(f.id, 500);
        assert_eq!(f.partner1, Some(10));
        assert_eq!(f.partner2, Some(11));
        assert_eq!(f.children, vec![20, 21, 22]);
        assert_eq!(f.partners().collect::<Vec<_>>(), vec![10, 11]);
    }

    #[test]
    fn test_legacy_u16_partner() {
        let data = record_data(&[tlv(TAG_PARTNER1, &300u16.to_le_bytes()), tlv(TAG_PARTNER2, &[7])]);
        let f = decode_family(&family_record(&data), &Diagnostics::unlimited());
        assert_eq!(f.partner1, Some(300));
        assert_eq!(f.partner2, None);
    }

    #[test]
    fn test_zero_ids_skipped() {
        let data = record_data(&[
            tlv(TAG_PARTNER1, &0u32.to_le_bytes()),
            tlv(0x00FA, &0xFFu32.to_le_bytes()),
            tlv(0x00FB, &child(4)),
        ]);
        let f = decode_family(&family_record(&data), &Diagnostics::unlimited());
        assert_eq!(f.partner1, None);
        assert_eq!(f.children, vec![4]);
    }

    #[test]
    fn test_marriage_event() {
        let data = record_data(&[
            tlv(TAG_PARTNER1, &1u32.to_le_bytes()),
            tlv(0x0410, &dated_event(0, 12, 6, 1925)),
            tlv(0x0060, b"misc"),
        ]);
        let f = decode_family(&family_record(&data), &Diagnostics::unlimited());
        assert_eq!(f.events.len(), 1);
        assert_eq!(f.events[0].tag, 0x0410);
        assert_eq!(f.events[0].date, "12 Jun 1925");
        assert_eq!(f.raw_fields.len(), 1);
        assert_eq!(f.raw_fields[0].tag, 0x0060);
        assert!(f.note_refs.is_empty());
    }
}

//! Media record decoder (type 0x20D4). Metadata only.

use crate::codec::record::RawRecord;
use crate::codec::tlv::record_fields;
use crate::diagnostics::Diagnostics;
use crate::model::{MediaRef, RawField};

pub fn decode_media(rec: &RawRecord<'_>, diags: &Diagnostics) -> MediaRef {
    MediaRef {
        id: rec.id,
        seq_num: rec.seq_num,
        raw_fields: record_fields(rec, diags)
            .into_iter()
            .map(|f| RawField::new(f.tag, f.data, f.declared_len))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::record::RecordKind;
    use crate::codec::tlv::tests::{record_data, tlv};

    #[test]
    fn test_fields_kept_raw() {
        let data = record_data(&[tlv(0x0010, b"photo.jpg"), tlv(0x0011, &[0, 1])]);
        let rec = RawRecord::new(RecordKind::Media as u16, 77, 3, &data);
        let m = decode_media(&rec, &Diagnostics::unlimited());
        assert_eq!(m.id, 77);
        assert_eq!(m.seq_num, 3);
        assert_eq!(m.raw_fields.len(), 2);
        assert_eq!(m.raw_fields[0].data, b"photo.jpg".to_vec());
        assert_eq!(m.raw_fields[1].size, 6);
    }
}

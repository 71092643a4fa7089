//! Source record decoder (type 0x20D0).

use crate::codec::primitives::clean_string;
use crate::codec::record::RawRecord;
use crate::codec::schema::TAG_DISPLAY_NAME;
use crate::codec::tlv::record_fields;
use crate::diagnostics::Diagnostics;
use crate::limits::MIN_SOURCE_TITLE_LEN;
use crate::model::{RawField, Source};

/// Decodes a source record.
///
/// The title comes from the first non-empty display-name tag. Without one, the first field
/// whose text is longer than two bytes stands in. Every field is also kept raw.
pub fn decode_source(rec: &RawRecord<'_>, diags: &Diagnostics) -> Source {
    let mut source = Source {
        id: rec.id,
        seq_num: rec.seq_num,
        ..Default::default()
    };

    let fields = record_fields(rec, diags);
    for field in &fields {
        if field.tag == TAG_DISPLAY_NAME && source.title.is_empty() {
            source.title = clean_string(field.data);
        }
        source
            .raw_fields
            .push(RawField::new(field.tag, field.data, field.declared_len));
    }

    if source.title.is_empty() {
        source.title = fields
            .iter()
            .map(|f| clean_string(f.data))
            .find(|s| s.len() > MIN_SOURCE_TITLE_LEN)
            .unwrap_or_default();
    }

    source
}

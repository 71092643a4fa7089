//! Place record decoder (type 0x20D8).
//!
//! Place records have no TLV area: the name is the first printable run after
//! an 8-byte preamble. Long names are cut at a fixed width here; the
//! `places.cache` enrichment pass restores them.

use crate::codec::primitives::extract_printable;
use crate::codec::record::RawRecord;
use crate::diagnostics::Diagnostics;
use crate::limits::{FAMILY_DATA_FILE, TEXT_RECORD_PREAMBLE_LEN};
use crate::model::Place;

pub fn decode_place(rec: &RawRecord<'_>, diags: &Diagnostics) -> Place {
    let Some(body) = rec.data.get(TEXT_RECORD_PREAMBLE_LEN..).filter(|b| !b.is_empty()) else {
        diags.add(
            FAMILY_DATA_FILE,
            Some(rec.offset),
            format!("place record {} has no name bytes", rec.id),
            None,
        );
        return Place::new(rec.id, "");
    };
    Place::new(rec.id, extract_printable(body))
}

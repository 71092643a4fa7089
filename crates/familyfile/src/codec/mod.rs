//! Binary decoding of the primary data file.
//!
//! The file is a stream of marker-delimited records. Each record carries a
//! 6-byte preamble and a run of tag-length-value fields, except places and
//! inline notes, which hold plain text after an 8-byte preamble.

pub mod event;
pub mod family;
pub mod familydata;
pub mod header;
pub mod media;
pub mod note;
pub mod person;
pub mod place;
pub mod primitives;
pub mod record;
pub mod schema;
pub mod source;
pub mod tlv;

pub use event::{decode_citation_table, decode_event, extract_place_refs};
pub use familydata::{FamilyData, decode_family_data, decode_records};
pub use header::decode_header;
pub use primitives::Reader;
pub use record::{RawRecord, RecordKind, scan_records};
pub use tlv::{SubField, SubFields, TlvField, parse_tlv_fields};

//! Format constants for the version 14 family file bundle.
//!
//! Every value here was derived from sample files; none of them come from a
//! published format description.

/// Format version this crate decodes.
pub const FORMAT_VERSION: u32 = 14;

/// Magic at the start of the primary data file.
pub const FAMILY_DATA_MAGIC: &str = "3SDUAU~R";

/// Diagnostic file tag of the primary data file.
pub const FAMILY_DATA_FILE: &str = "familydata";

/// Anything shorter cannot hold the magic plus one record header.
pub const MIN_FAMILY_DATA_LEN: usize = 16;

/// Marker that locates every record in the primary data file.
pub const RECORD_MARKER: [u8; 4] = [0x05, 0x03, 0x02, 0x01];

/// Distance from the start of a record header to its marker.
pub const RECORD_HEADER_BACK_OFFSET: usize = 8;

/// Distance from the marker to the record's data window.
pub const RECORD_DATA_OFFSET: usize = 12;

/// Timestamp (4) + repeated size (2) ahead of the first TLV field.
pub const RECORD_PREAMBLE_LEN: usize = 6;

/// Size of a TLV field header: total length (2) + tag (2).
pub const TLV_HEADER_LEN: usize = 4;

/// Bytes skipped ahead of place names and inline note text.
pub const TEXT_RECORD_PREAMBLE_LEN: usize = 8;

/// Fixed prefix of an event payload ahead of its sub-TLV entries.
pub const EVENT_FIXED_PREFIX_LEN: usize = 18;

/// Offset of the schema reference inside an event payload.
pub const EVENT_SCHEMA_OFFSET: usize = 16;

/// Tags at or above this value are events.
pub const EVENT_TAG_MIN: u16 = 0x0100;

/// Events below this tag also carry a note back-reference.
pub const NOTE_EVENT_TAG_LIMIT: u16 = 0x03E8;

/// Total length of a date or note-reference sub-TLV.
pub const SHORT_SUB_FIELD_LEN: u16 = 8;

/// Header strings (device, model, serial, app path) start scanning here.
pub const HEADER_STRINGS_OFFSET: usize = 80;

/// The header string scan gives up past this offset.
pub const HEADER_SCAN_LIMIT: usize = 256;

/// Maximum nesting depth of «» markup.
pub const MAX_MARKUP_DEPTH: usize = 20;

/// Minimum printable run accepted as inline note text without markup.
pub const MIN_NOTE_TEXT_RUN: usize = 5;

/// Fallback source titles must be longer than this.
pub const MIN_SOURCE_TITLE_LEN: usize = 2;

/// Size of one timestamps.cache record.
pub const TIMESTAMP_RECORD_LEN: usize = 20;

/// Magic of `places.cache`.
pub const PLACES_CACHE_MAGIC: &str = "ahcp";

/// Magic of `placeUsage.cache`.
pub const PLACE_USAGE_CACHE_MAGIC: &str = "hcup";

/// Magic of `surnames.cache`.
pub const SURNAMES_CACHE_MAGIC: &str = "10ns";

/// Magic of `timestamps.cache`.
pub const TIMESTAMPS_CACHE_MAGIC: &str = "icst";

/// Standard cache header: size (4) + magic (4) + count (4) + extra (4).
pub const CACHE_HEADER_LEN: usize = 16;

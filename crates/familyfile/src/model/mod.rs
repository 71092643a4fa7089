//! Data model for a decoded family file.
//!
//! Entities reference each other by integer ID only. Every type serializes to
//! JSON with snake_case names; empty strings, empty lists, zero IDs and absent
//! options are left out.

pub mod cache;
pub mod event;
pub mod family;
pub mod family_file;
pub mod note;
pub mod person;
pub mod place;
pub mod source;

use serde::Serializer;

pub use cache::{
    ChangeRecord, FirstNameEntry, GlobalRecords, Member, OpaqueCache, SearchName, SurnameEntry,
    TimestampEntry,
};
pub use event::{Event, FamilyEvent, NoteRef, PersonEvent, RawField, SourceCitation};
pub use family::Family;
pub use family_file::{FamilyFile, Header};
pub use note::{MarkupNode, Note};
pub use person::{Person, Sex};
pub use place::{Place, PlaceUsage, PlaceUsageEntry};
pub use source::{EventDefinition, MediaRef, Source};

/// `skip_serializing_if` predicate for zero numbers.
pub(crate) fn is_zero<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

/// Serializes opaque bytes as a lowercase hex string.
pub(crate) fn hex_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::codec::primitives::to_hex(bytes))
}

//! Decoder for version 14 genealogy "family file" bundles.
//!
//! A bundle is a directory holding one primary data file, a signature file,
//! a set of side caches, standalone note files and per-member change logs.
//! This crate turns the bytes of those files into a typed [`FamilyFile`].
//!
//! # Quick Start
//!
//! ```rust
//! use familyfile::{BundleData, decode_bundle};
//!
//! let mut data = b"3SDUAU~R".to_vec();
//! data.resize(64, 0);
//!
//! let ff = decode_bundle(&BundleData::new(data).with_signature("v14")).unwrap();
//! assert_eq!(ff.version, 14);
//! assert_eq!(ff.signature, "v14");
//! assert!(ff.persons.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`codec`]: record scanner, TLV parser and per-record decoders
//! - [`cache`]: side-cache decoders
//! - [`markup`]: «» note markup
//! - [`enrich`]: place-name repair from `places.cache`
//! - [`decode`]: the bundle decoder and its options
//! - [`model`]: decoded entities
//! - [`error`], [`diagnostics`]: fatal errors and collected warnings
//! - [`limits`]: format constants
//!
//! # Robustness
//!
//! The format is undocumented. Decoding prefers partial output with warnings
//! over failure:
//! - Only an unreadable, too short or wrong-magic primary file is fatal
//! - A bad side cache is skipped with a warning
//! - A bad record yields a minimally populated entity and a warning
//! - All reads are bounds-checked; no input makes the decoder panic

pub mod cache;
pub mod codec;
pub mod decode;
pub mod diagnostics;
pub mod enrich;
pub mod error;
pub mod limits;
pub mod markup;
pub mod model;
pub mod notes;
pub mod util;

// Re-export commonly used types at crate root
pub use decode::{BundleData, BundleFiles, DecodeOptions, Decoder, FormatVersion, decode_bundle};
pub use diagnostics::Diagnostics;
pub use error::{CacheError, DecodeError, Diagnostic, ErrorCode, ShortRead};
pub use markup::{parse_markup, plain_text};
pub use model::{
    Event, EventDefinition, Family, FamilyEvent, FamilyFile, Header, MarkupNode, MediaRef, Note,
    NoteRef, Person, PersonEvent, Place, PlaceUsage, Sex, Source, SourceCitation,
};
pub use util::{DateQualifier, PackedDate, format_event_date};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

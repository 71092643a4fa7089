//! Utility modules for family file decoding.

pub mod date;

pub use date::{DateQualifier, PackedDate, format_event_date};

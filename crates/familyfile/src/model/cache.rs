//! Entries recovered from the side-cache files and member change logs.

use serde::Serialize;

/// A given name from `fmnames.cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstNameEntry {
    pub name: String,
    #[serde(skip)]
    pub meta: [u8; 5],
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phonetic: String,
}

/// A `(SURNAME, GIVEN)` entry from `surnames.cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurnameEntry {
    pub surname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_entry: String,
}

/// A searchable full name from `shNames.cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchName {
    pub name: String,
}

/// One 20-byte record of `timestamps.cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampEntry {
    #[serde(skip)]
    pub data: Vec<u8>,
    pub hex: String,
}

/// A cache whose layout is not understood; only printable text is surfaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpaqueCache {
    pub size: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub magic: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Raw dump of `globalRecords.cache`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalRecords {
    pub size: usize,
    pub hex: String,
}

/// A sync member with its decoded change log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeRecord>,
}

/// One length-prefixed entry of a `.changes` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Offset of the size prefix.
    pub offset: usize,
    pub size: usize,
    #[serde(skip)]
    pub data: Vec<u8>,
}

//! Places and the place-usage reverse index.

use serde::Serialize;

use crate::model::hex_bytes;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Place {
    pub id: u32,
    pub name: String,
    /// Opaque cache bytes, only used for cross-matching.
    #[serde(
        rename = "ref",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "hex_bytes"
    )]
    pub reference: Vec<u8>,
}

impl Place {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reference: Vec::new(),
        }
    }
}

/// Entities that refer to one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceUsage {
    pub place_id: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<PlaceUsageEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceUsageEntry {
    pub ref_id: u32,
    pub type_code: u32,
}

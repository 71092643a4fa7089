//! The top-level aggregate.

use serde::Serialize;

use crate::model::{
    EventDefinition, Family, FirstNameEntry, GlobalRecords, MediaRef, Member, Note, OpaqueCache,
    Person, Place, PlaceUsage, SearchName, Source, SurnameEntry, TimestampEntry,
};

/// Metadata from the start of the primary data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub magic: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub serial: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub app_path: String,
}

/// Everything decoded from one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FamilyFile {
    pub version: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    /// SHA-256 of the primary data file, lowercase hex.
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub families: Vec<Family>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub place_usages: Vec<PlaceUsage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_definitions: Vec<EventDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_refs: Vec<MediaRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub first_names: Vec<FirstNameEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surnames: Vec<SurnameEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_names: Vec<SearchName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timestamps: Vec<TimestampEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<OpaqueCache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tags: Option<OpaqueCache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<OpaqueCache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_records: Option<GlobalRecords>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub find_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl FamilyFile {
    pub fn person(&self, id: u32) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn family(&self, id: u32) -> Option<&Family> {
        self.families.iter().find(|f| f.id == id)
    }

    pub fn place(&self, id: u32) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

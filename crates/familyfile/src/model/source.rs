//! Event definitions, sources and media references.

use serde::Serialize;

use crate::model::{RawField, is_zero};

/// Naming variants for one class of event (birth, marriage, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventDefinition {
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gedcom_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub abbreviation: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub abbreviation2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub abbreviation3: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sentence_form: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub preposition: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<RawField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Source {
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<RawField>,
}

/// Media metadata. The binary payload is never decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<RawField>,
}

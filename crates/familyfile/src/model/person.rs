//! Person records.

use serde::Serialize;

use crate::model::{NoteRef, PersonEvent, RawField, SourceCitation, is_zero};

/// Sex flag of a person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Maps the stored flag byte: 1 is male, 2 is female, anything else unknown.
    pub fn from_flag(flag: u8) -> Sex {
        match flag {
            1 => Sex::Male,
            2 => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Sex::Unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub surname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Sex::is_unknown")]
    pub sex: Sex,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PersonEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note_refs: Vec<NoteRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_citations: Vec<SourceCitation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<RawField>,
}

impl Person {
    pub fn new(id: u32, seq_num: u16) -> Self {
        Self {
            id,
            seq_num,
            ..Default::default()
        }
    }

    /// "Given Surname", skipping empty parts.
    pub fn full_name(&self) -> String {
        [self.given_name.as_str(), self.surname.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! Family records.

use serde::Serialize;

use crate::model::{FamilyEvent, NoteRef, RawField, is_zero};

/// A couple and their children. Either partner may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Family {
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner2: Option<u32>,
    /// Child person IDs in record order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<FamilyEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note_refs: Vec<NoteRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<RawField>,
}

impl Family {
    pub fn new(id: u32, seq_num: u16) -> Self {
        Self {
            id,
            seq_num,
            ..Default::default()
        }
    }

    /// Known partner IDs, in partner order.
    pub fn partners(&self) -> impl Iterator<Item = u32> + '_ {
        self.partner1.into_iter().chain(self.partner2)
    }
}

//! Notes and their markup tree.

use serde::Serialize;

use crate::model::is_zero;

/// A note, either an inline record or a standalone `.note` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Note {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub seq_num: u16,
    #[serde(skip_serializing_if = "is_zero")]
    pub person_id: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub event_tag: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub source_id: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filename: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markup: Vec<MarkupNode>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_text: String,
}

/// One node of a parsed «» markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    Text { text: String },
    Bold { children: Vec<MarkupNode> },
    Italic { children: Vec<MarkupNode> },
    Underline { children: Vec<MarkupNode> },
    FontFlag { value: String, children: Vec<MarkupNode> },
    Color { value: String, children: Vec<MarkupNode> },
    Url { value: String, children: Vec<MarkupNode> },
    SourceCitation { value: String, children: Vec<MarkupNode> },
}

impl MarkupNode {
    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text { text: text.into() }
    }

    /// Child nodes; empty for text.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Text { .. } => &[],
            MarkupNode::Bold { children }
            | MarkupNode::Italic { children }
            | MarkupNode::Underline { children }
            | MarkupNode::FontFlag { children, .. }
            | MarkupNode::Color { children, .. }
            | MarkupNode::Url { children, .. }
            | MarkupNode::SourceCitation { children, .. } => children,
        }
    }
}

//! «» note markup.
//!
//! Notes use a tiny tag language delimited by guillemets:
//!
//! ```text
//! «b»bold«/b» «i»italic«/i» «u»underlined«/u»
//! «ff=1»font flag«/ff» «c=FF0000FF»colored«/c»
//! «url=https://example.org»link«/url» «s=12»cited«/s»
//! ```
//!
//! Parsing is recursive descent with a depth limit. It never fails: unknown
//! tags pass through as text, stray closing tags are dropped, branches nested
//! past the depth limit are dropped whole and an unclosed
//! `«` turns the rest of the input into text.

use crate::limits::MAX_MARKUP_DEPTH;
use crate::model::MarkupNode;

const OPEN: char = '\u{AB}';
const CLOSE: char = '\u{BB}';

/// Parses markup text into a node tree.
pub fn parse_markup(text: &str) -> Vec<MarkupNode> {
    let mut parser = Parser { input: text, pos: 0 };
    parser.parse_until(None, 0)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

enum TagKind<'t> {
    Simple(&'static str),
    Attributed(&'static str, &'t str),
}

impl<'a> Parser<'a> {
    fn parse_until(&mut self, end_tag: Option<&str>, depth: usize) -> Vec<MarkupNode> {
        let mut nodes = Vec::new();
        if depth > MAX_MARKUP_DEPTH {
            if let Some(name) = end_tag {
                self.skip_branch(name);
            }
            return nodes;
        }

        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            let Some(open) = rest.find(OPEN) else {
                push_text(&mut nodes, rest);
                self.pos = self.input.len();
                break;
            };
            push_text(&mut nodes, &rest[..open]);

            let tag_start = self.pos + open + OPEN.len_utf8();
            let Some(close) = self.input[tag_start..].find(CLOSE) else {
                push_text(&mut nodes, &rest[open..]);
                self.pos = self.input.len();
                break;
            };
            let tag = &self.input[tag_start..tag_start + close];
            self.pos = tag_start + close + CLOSE.len_utf8();

            if let Some(closed) = tag.strip_prefix('/') {
                if end_tag == Some(closed) {
                    return nodes;
                }
                // stray closing tag
                continue;
            }

            match classify(tag) {
                Some(TagKind::Simple(name)) => {
                    let children = self.parse_until(Some(name), depth + 1);
                    nodes.push(match name {
                        "b" => MarkupNode::Bold { children },
                        "i" => MarkupNode::Italic { children },
                        _ => MarkupNode::Underline { children },
                    });
                }
                Some(TagKind::Attributed(name, value)) => {
                    let value = value.to_string();
                    let children = self.parse_until(Some(name), depth + 1);
                    nodes.push(match name {
                        "ff" => MarkupNode::FontFlag { value, children },
                        "c" => MarkupNode::Color { value, children },
                        "url" => MarkupNode::Url { value, children },
                        _ => MarkupNode::SourceCitation { value, children },
                    });
                }
                None => push_text(&mut nodes, &format!("{OPEN}{tag}{CLOSE}")),
            }
        }

        nodes
    }

    /// Moves past the `«/name»` closing the current branch, or to the end of
    /// input. Nested tags of the same name are balanced.
    fn skip_branch(&mut self, name: &str) {
        let mut open = 0usize;
        while let Some(start) = self.input[self.pos..].find(OPEN) {
            let tag_start = self.pos + start + OPEN.len_utf8();
            let Some(close) = self.input[tag_start..].find(CLOSE) else {
                break;
            };
            let tag = &self.input[tag_start..tag_start + close];
            self.pos = tag_start + close + CLOSE.len_utf8();

            if tag.strip_prefix('/') == Some(name) {
                if open == 0 {
                    return;
                }
                open -= 1;
            } else if classify(tag).is_some_and(|kind| kind.name() == name) {
                open += 1;
            }
        }
        self.pos = self.input.len();
    }
}

impl TagKind<'_> {
    fn name(&self) -> &'static str {
        match self {
            TagKind::Simple(name) | TagKind::Attributed(name, _) => *name,
        }
    }
}

fn classify(tag: &str) -> Option<TagKind<'_>> {
    match tag {
        "b" => return Some(TagKind::Simple("b")),
        "i" => return Some(TagKind::Simple("i")),
        "u" => return Some(TagKind::Simple("u")),
        _ => {}
    }
    let (name, value) = tag.split_once('=')?;
    let name = match name {
        "ff" => "ff",
        "c" => "c",
        "url" => "url",
        "s" => "s",
        _ => return None,
    };
    Some(TagKind::Attributed(name, value))
}

/// Appends text, merging with a preceding text node.
fn push_text(nodes: &mut Vec<MarkupNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(MarkupNode::Text { text: last }) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(MarkupNode::text(text));
    }
}

/// Flattens a tree to plain text.
///
/// Leftover `«...»` spans and lone guillemets are removed, so the result never
/// contains either delimiter.
pub fn plain_text(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    strip_delimiters(&out)
}

fn collect_text(nodes: &[MarkupNode], out: &mut String) {
    for node in nodes {
        match node {
            MarkupNode::Text { text } => out.push_str(text),
            other => collect_text(other.children(), out),
        }
    }
}

fn strip_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(OPEN) {
        let after = &rest[open + OPEN.len_utf8()..];
        match after.find(CLOSE) {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after[close + CLOSE.len_utf8()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out.retain(|c| c != OPEN && c != CLOSE);
    out
}

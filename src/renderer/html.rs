//! HTML serializer.
//!
//! Turns a subtree into markup. Attributes come out in the order they were
//! first set, so two renders of the same state serialize identically.
//! Value properties are not attributes and are not serialized.

use std::fmt::Write;

use crate::engine::document;
use crate::types::{NodeId, NodeKind};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialize `node` and its descendants. A stale node serializes to "".
pub fn to_html(node: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: NodeId) {
    match document::kind(node) {
        Some(NodeKind::Text) => {
            if let Some(text) = document::text(node) {
                escape_text(out, &text);
            }
        }
        Some(NodeKind::Element) => {
            let tag = document::tag_name(node).unwrap_or_default();
            out.push('<');
            out.push_str(&tag);
            for (key, value) in document::attributes(node) {
                // Infallible for String
                let _ = write!(out, " {key}=\"");
                escape_attribute(out, &value);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            for child in document::children(node) {
                write_node(out, child);
            }
            let _ = write!(out, "</{tag}>");
        }
        Some(NodeKind::None) | None => {}
    }
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
}

//! Plain-text outline of a subtree.
//!
//! Block elements start their own line, inline content flows on the current
//! one. Form controls are drawn as `[ ]` / `[x]` checkboxes, `[value]` text
//! inputs and `(label)` buttons, and are reported with the line they sit on
//! so a host can route key presses to them.
//!
//! ```text
//! # TODO List
//! [Задание] (+)
//! - [ ] Сделать домашку (🗑️)
//! - [x] Пойти домой (🗑️)
//! ```

use crate::engine::document;
use crate::types::{NodeId, NodeKind};

const BLOCK_ELEMENTS: &[&str] = &[
    "body", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ol", "p", "section", "ul",
];

/// What kind of control a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    TextInput,
    Checkbox,
    Button,
}

/// A control found while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub node: NodeId,
    pub kind: ControlKind,
    /// Index into [`Outline::lines`].
    pub line: usize,
}

/// Drawn lines plus the controls on them, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub lines: Vec<String>,
    pub controls: Vec<Control>,
}

impl Outline {
    /// Controls on a given line.
    pub fn controls_on(&self, line: usize) -> impl Iterator<Item = &Control> {
        self.controls.iter().filter(move |c| c.line == line)
    }
}

/// Draw `root` as text.
pub fn outline(root: NodeId) -> Outline {
    let mut builder = Builder::default();
    builder.node(root);
    builder.break_line();
    Outline {
        lines: builder.lines,
        controls: builder.controls,
    }
}

#[derive(Default)]
struct Builder {
    lines: Vec<String>,
    current: String,
    controls: Vec<Control>,
}

impl Builder {
    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    /// Append an inline piece, separated from the previous one by a space.
    fn push_inline(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
        self.current.push_str(piece);
    }

    fn control(&mut self, node: NodeId, kind: ControlKind, drawn: &str) {
        self.push_inline(drawn);
        self.controls.push(Control {
            node,
            kind,
            line: self.lines.len(),
        });
    }

    fn node(&mut self, node: NodeId) {
        match document::kind(node) {
            Some(NodeKind::Text) => {
                let text = document::text(node).unwrap_or_default();
                self.push_inline(text.trim());
            }
            Some(NodeKind::Element) => self.element(node),
            Some(NodeKind::None) | None => {}
        }
    }

    fn element(&mut self, node: NodeId) {
        let tag = document::tag_name(node).unwrap_or_default();
        match tag.as_str() {
            "input" => {
                if document::get_attribute(node, "type").as_deref() == Some("checkbox") {
                    let mark = if document::has_attribute(node, "checked") {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    self.control(node, ControlKind::Checkbox, mark);
                } else {
                    let value = document::value(node);
                    let shown = if value.is_empty() {
                        document::get_attribute(node, "placeholder").unwrap_or_default()
                    } else {
                        value
                    };
                    self.control(node, ControlKind::TextInput, &format!("[{shown}]"));
                }
            }
            "button" => {
                let label = document::text_content(node);
                self.control(node, ControlKind::Button, &format!("({})", label.trim()));
            }
            _ if BLOCK_ELEMENTS.contains(&tag.as_str()) => {
                self.break_line();
                match tag.as_str() {
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.current.push_str("# "),
                    "li" => self.current.push_str("- "),
                    _ => {}
                }
                for child in document::children(node) {
                    self.node(child);
                }
                self.break_line();
            }
            _ => {
                for child in document::children(node) {
                    self.node(child);
                }
            }
        }
    }
}

//! Document - Node arena and tree operations.
//!
//! Manages the lifecycle of document nodes:
//! - Slot allocation with a free pool for O(1) reuse
//! - Generation counters so stale handles never alias a reused slot
//! - Tree structure (parent/children), attributes, text and input values
//! - Lookup by `id` attribute
//!
//! The document is thread-local. Each thread owns one document, the way a
//! browser page owns one `document`.

use std::cell::RefCell;

use tracing::trace;

use super::listeners;
use crate::error::{DomError, Result};
use crate::types::{EventMask, NodeId, NodeKind};

// =============================================================================
// Node Storage
// =============================================================================

#[derive(Debug, Default)]
struct NodeData {
    kind: NodeKind,
    generation: u32,
    tag: String,
    text: String,
    attributes: Vec<(String, String)>,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listens: EventMask,
}

impl NodeData {
    /// Clear everything but the generation.
    fn clear(&mut self) {
        let generation = self.generation;
        *self = NodeData {
            generation,
            ..Default::default()
        };
    }
}

#[derive(Default)]
struct Document {
    nodes: Vec<NodeData>,
    free: Vec<u32>,
    allocated: usize,
    body: Option<NodeId>,
}

impl Document {
    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes
            .get(id.index as usize)
            .filter(|node| node.generation == id.generation && node.kind != NodeKind::None)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes
            .get_mut(id.index as usize)
            .filter(|node| node.generation == id.generation && node.kind != NodeKind::None)
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.nodes.push(NodeData::default());
                (self.nodes.len() - 1) as u32
            }
        };
        let node = &mut self.nodes[index as usize];
        node.kind = kind;
        self.allocated += 1;
        NodeId::new(index, node.generation)
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn unlink(&mut self, child: NodeId) {
        let parent = self.get_mut(child).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|&c| c != child);
            }
        }
    }

    /// Validate that `child` may be inserted under `parent`.
    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        if parent_node.kind == NodeKind::Text {
            return Err(DomError::TextNodeChildren(parent));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn collect_subtree(&self, root: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.get(root) {
            out.push(root);
            for &child in &node.children {
                self.collect_subtree(child, out);
            }
        }
    }
}

thread_local! {
    static DOCUMENT: RefCell<Document> = RefCell::new(Document::default());
}

fn with_doc<R>(f: impl FnOnce(&Document) -> R) -> R {
    DOCUMENT.with(|doc| f(&doc.borrow()))
}

fn with_doc_mut<R>(f: impl FnOnce(&mut Document) -> R) -> R {
    DOCUMENT.with(|doc| f(&mut doc.borrow_mut()))
}

// =============================================================================
// Creation
// =============================================================================

/// Create a detached element node.
pub fn create_element(tag: &str) -> NodeId {
    let id = with_doc_mut(|doc| {
        let id = doc.allocate(NodeKind::Element);
        doc.nodes[id.index as usize].tag = tag.to_ascii_lowercase();
        id
    });
    trace!(node = %id, tag, "created element");
    id
}

/// Create a detached text node.
pub fn create_text_node(text: &str) -> NodeId {
    with_doc_mut(|doc| {
        let id = doc.allocate(NodeKind::Text);
        doc.nodes[id.index as usize].text = text.to_string();
        id
    })
}

/// The document body, created on first use.
pub fn body() -> NodeId {
    let existing = with_doc(|doc| doc.body.filter(|&id| doc.get(id).is_some()));
    if let Some(body) = existing {
        return body;
    }
    let body = create_element("body");
    with_doc_mut(|doc| doc.body = Some(body));
    body
}

// =============================================================================
// Release
// =============================================================================

/// Release a node and its whole subtree.
///
/// The node is detached from its parent first. Listeners registered on any
/// released node are dropped. Returns the number of nodes released; a stale
/// id releases nothing.
pub fn release(id: NodeId) -> usize {
    let released = with_doc_mut(|doc| {
        let mut subtree = Vec::new();
        doc.collect_subtree(id, &mut subtree);
        if subtree.is_empty() {
            return subtree;
        }
        doc.unlink(id);
        // Reversed so the subtree root's slot is handed out first
        for &node_id in subtree.iter().rev() {
            let node = &mut doc.nodes[node_id.index as usize];
            node.clear();
            node.generation = node.generation.wrapping_add(1);
            doc.free.push(node_id.index);
        }
        doc.allocated -= subtree.len();
        if doc.body == Some(id) {
            doc.body = None;
        }
        subtree
    });

    for &node_id in &released {
        listeners::cleanup_node(node_id);
    }
    if !released.is_empty() {
        trace!(node = %id, count = released.len(), "released subtree");
    }
    released.len()
}

// =============================================================================
// Lookups
// =============================================================================

/// Check if a handle still points at a live node.
pub fn exists(id: NodeId) -> bool {
    with_doc(|doc| doc.get(id).is_some())
}

/// Kind of the node, `None` if stale.
pub fn kind(id: NodeId) -> Option<NodeKind> {
    with_doc(|doc| doc.get(id).map(|n| n.kind))
}

/// Lowercased tag name of an element.
pub fn tag_name(id: NodeId) -> Option<String> {
    with_doc(|doc| {
        doc.get(id)
            .filter(|n| n.kind == NodeKind::Element)
            .map(|n| n.tag.clone())
    })
}

/// Data of a text node.
pub fn text(id: NodeId) -> Option<String> {
    with_doc(|doc| {
        doc.get(id)
            .filter(|n| n.kind == NodeKind::Text)
            .map(|n| n.text.clone())
    })
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(id: NodeId) -> String {
    with_doc(|doc| {
        let mut subtree = Vec::new();
        doc.collect_subtree(id, &mut subtree);
        subtree
            .into_iter()
            .filter_map(|node_id| doc.get(node_id))
            .filter(|n| n.kind == NodeKind::Text)
            .map(|n| n.text.as_str())
            .collect()
    })
}

pub fn parent(id: NodeId) -> Option<NodeId> {
    with_doc(|doc| doc.get(id).and_then(|n| n.parent))
}

pub fn children(id: NodeId) -> Vec<NodeId> {
    with_doc(|doc| doc.get(id).map(|n| n.children.clone()).unwrap_or_default())
}

/// Check if the node is attached under the body.
pub fn is_connected(id: NodeId) -> bool {
    with_doc(|doc| match doc.body {
        Some(body) => doc.get(id).is_some() && doc.is_inclusive_ancestor(body, id),
        None => false,
    })
}

/// Find the first connected element whose `id` attribute equals `dom_id`.
///
/// Depth-first, document order. Detached subtrees are not searched.
pub fn get_element_by_id(dom_id: &str) -> Option<NodeId> {
    with_doc(|doc| {
        let body = doc.body?;
        let mut subtree = Vec::new();
        doc.collect_subtree(body, &mut subtree);
        subtree.into_iter().find(|&node_id| {
            doc.get(node_id).is_some_and(|n| {
                n.attributes
                    .iter()
                    .any(|(key, value)| key == "id" && value == dom_id)
            })
        })
    })
}

/// Number of live nodes, attached or not.
pub fn node_count() -> usize {
    with_doc(|doc| doc.allocated)
}

// =============================================================================
// Attributes and Properties
// =============================================================================

/// Set an attribute, replacing any previous value for the same key.
///
/// Setting an attribute on a text node is ignored.
pub fn set_attribute(id: NodeId, key: &str, value: &str) -> Result<()> {
    with_doc_mut(|doc| {
        let node = doc.node_mut(id)?;
        if node.kind != NodeKind::Element {
            return Ok(());
        }
        match node.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attributes.push((key.to_string(), value.to_string())),
        }
        Ok(())
    })
}

pub fn get_attribute(id: NodeId, key: &str) -> Option<String> {
    with_doc(|doc| {
        doc.get(id).and_then(|n| {
            n.attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    })
}

pub fn has_attribute(id: NodeId, key: &str) -> bool {
    get_attribute(id, key).is_some()
}

pub fn remove_attribute(id: NodeId, key: &str) -> Result<()> {
    with_doc_mut(|doc| {
        doc.node_mut(id)?.attributes.retain(|(k, _)| k != key);
        Ok(())
    })
}

/// All attributes in the order they were first set.
pub fn attributes(id: NodeId) -> Vec<(String, String)> {
    with_doc(|doc| doc.get(id).map(|n| n.attributes.clone()).unwrap_or_default())
}

/// Current value property (text typed into an input).
pub fn value(id: NodeId) -> String {
    with_doc(|doc| doc.get(id).map(|n| n.value.clone()).unwrap_or_default())
}

pub fn set_value(id: NodeId, value: &str) -> Result<()> {
    with_doc_mut(|doc| {
        doc.node_mut(id)?.value = value.to_string();
        Ok(())
    })
}

/// Listener kinds attached to the node.
pub fn listens(id: NodeId) -> EventMask {
    with_doc(|doc| doc.get(id).map(|n| n.listens).unwrap_or_default())
}

pub(crate) fn add_listens(id: NodeId, mask: EventMask) -> Result<()> {
    with_doc_mut(|doc| {
        doc.node_mut(id)?.listens |= mask;
        Ok(())
    })
}

pub(crate) fn set_listens(id: NodeId, mask: EventMask) -> Result<()> {
    with_doc_mut(|doc| {
        doc.node_mut(id)?.listens = mask;
        Ok(())
    })
}

// =============================================================================
// Tree Mutation
// =============================================================================

/// Append `child` as the last child of `parent`.
///
/// A child that already has a parent is moved.
pub fn append_child(parent: NodeId, child: NodeId) -> Result<()> {
    with_doc_mut(|doc| {
        doc.check_insert(parent, child)?;
        doc.unlink(child);
        doc.node_mut(child)?.parent = Some(parent);
        doc.node_mut(parent)?.children.push(child);
        Ok(())
    })
}

/// Remove `child` from `parent`, leaving it detached but alive.
pub fn remove_child(parent: NodeId, child: NodeId) -> Result<()> {
    with_doc_mut(|doc| {
        doc.node(parent)?;
        if doc.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        doc.unlink(child);
        Ok(())
    })
}

/// Put `new_child` at the position of `old_child` under `parent`.
///
/// `old_child` ends up detached but alive.
pub fn replace_child(parent: NodeId, new_child: NodeId, old_child: NodeId) -> Result<()> {
    with_doc_mut(|doc| {
        if doc.node(old_child)?.parent != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: old_child,
            });
        }
        if new_child == old_child {
            return Ok(());
        }
        doc.check_insert(parent, new_child)?;
        doc.unlink(new_child);
        let position = doc
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == old_child)
            .ok_or(DomError::NotAChild {
                parent,
                child: old_child,
            })?;
        doc.node_mut(parent)?.children[position] = new_child;
        doc.node_mut(old_child)?.parent = None;
        doc.node_mut(new_child)?.parent = Some(parent);
        Ok(())
    })
}

/// Swap `old` for `new` in whatever parent `old` has.
///
/// A detached `old` is left alone. Returns the parent, if any.
pub fn replace_with(old: NodeId, new: NodeId) -> Result<Option<NodeId>> {
    let Some(parent) = with_doc(|doc| doc.node(old).map(|n| n.parent))? else {
        return Ok(None);
    };
    replace_child(parent, new, old)?;
    Ok(Some(parent))
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Drop every node and listener on this thread.
pub fn reset_document() {
    with_doc_mut(|doc| *doc = Document::default());
    listeners::reset_listeners();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_document();
    }

    #[test]
    fn test_create_and_lookup() {
        setup();

        let div = create_element("DIV");
        let text_node = create_text_node("hello");

        assert_eq!(kind(div), Some(NodeKind::Element));
        assert_eq!(tag_name(div).as_deref(), Some("div"));
        assert_eq!(text(text_node).as_deref(), Some("hello"));
        assert_eq!(tag_name(text_node), None);
        assert_eq!(node_count(), 2);
    }

    #[test]
    fn test_append_and_text_content() {
        setup();

        let ul = create_element("ul");
        let li = create_element("li");
        append_child(li, create_text_node("a")).unwrap();
        append_child(ul, li).unwrap();
        append_child(ul, create_text_node("b")).unwrap();

        assert_eq!(children(ul).len(), 2);
        assert_eq!(parent(li), Some(ul));
        assert_eq!(text_content(ul), "ab");
    }

    #[test]
    fn test_append_moves_child() {
        setup();

        let a = create_element("div");
        let b = create_element("div");
        let child = create_element("span");
        append_child(a, child).unwrap();
        append_child(b, child).unwrap();

        assert!(children(a).is_empty());
        assert_eq!(children(b), vec![child]);
    }

    #[test]
    fn test_hierarchy_errors() {
        setup();

        let outer = create_element("div");
        let inner = create_element("div");
        append_child(outer, inner).unwrap();

        assert_eq!(
            append_child(inner, outer),
            Err(DomError::HierarchyRequest { parent: inner, child: outer })
        );
        assert!(append_child(outer, outer).is_err());

        let t = create_text_node("x");
        assert_eq!(append_child(t, create_element("b")), Err(DomError::TextNodeChildren(t)));
    }

    #[test]
    fn test_replace_child_keeps_position() {
        setup();

        let ul = create_element("ul");
        let first = create_element("li");
        let second = create_element("li");
        let third = create_element("li");
        for li in [first, second, third] {
            append_child(ul, li).unwrap();
        }

        let fresh = create_element("li");
        replace_child(ul, fresh, second).unwrap();

        assert_eq!(children(ul), vec![first, fresh, third]);
        assert_eq!(parent(second), None);
        assert!(exists(second));
    }

    #[test]
    fn test_replace_child_not_a_child() {
        setup();

        let ul = create_element("ul");
        let stray = create_element("li");
        let fresh = create_element("li");

        assert_eq!(
            replace_child(ul, fresh, stray),
            Err(DomError::NotAChild { parent: ul, child: stray })
        );
        assert_eq!(
            remove_child(ul, stray),
            Err(DomError::NotAChild { parent: ul, child: stray })
        );
    }

    #[test]
    fn test_replace_with_detached_is_noop() {
        setup();

        let old = create_element("div");
        let new = create_element("div");
        assert_eq!(replace_with(old, new), Ok(None));
    }

    #[test]
    fn test_release_subtree_and_reuse() {
        setup();

        let root = create_element("div");
        let child = create_element("p");
        append_child(child, create_text_node("x")).unwrap();
        append_child(root, child).unwrap();

        assert_eq!(release(child), 2);
        assert!(!exists(child));
        assert!(children(root).is_empty());
        assert_eq!(node_count(), 1);

        // Slot is reused with a new generation
        let reused = create_element("p");
        assert_eq!(reused.index, child.index);
        assert_ne!(reused.generation, child.generation);
        assert!(!exists(child));
        assert_eq!(release(child), 0);
    }

    #[test]
    fn test_release_reuses_slots_root_first() {
        setup();

        let list = create_element("ul");
        let item = create_element("li");
        append_child(item, create_text_node("a")).unwrap();
        append_child(list, item).unwrap();
        let text_slot = children(item)[0].index;

        assert_eq!(release(list), 3);

        assert_eq!(create_element("ul").index, list.index);
        assert_eq!(create_element("li").index, item.index);
        assert_eq!(create_text_node("b").index, text_slot);
        assert_eq!(node_count(), 3);
    }

    #[test]
    fn test_attributes() {
        setup();

        let input = create_element("input");
        set_attribute(input, "type", "text").unwrap();
        set_attribute(input, "id", "new-todo").unwrap();
        set_attribute(input, "type", "checkbox").unwrap();

        assert_eq!(get_attribute(input, "type").as_deref(), Some("checkbox"));
        assert_eq!(attributes(input).len(), 2);

        remove_attribute(input, "type").unwrap();
        assert!(!has_attribute(input, "type"));

        let t = create_text_node("x");
        set_attribute(t, "id", "ignored").unwrap();
        assert!(attributes(t).is_empty());
    }

    #[test]
    fn test_get_element_by_id_only_connected() {
        setup();

        let detached = create_element("div");
        set_attribute(detached, "id", "target").unwrap();
        assert_eq!(get_element_by_id("target"), None);

        append_child(body(), detached).unwrap();
        assert_eq!(get_element_by_id("target"), Some(detached));
        assert!(is_connected(detached));
    }

    #[test]
    fn test_value_property() {
        setup();

        let input = create_element("input");
        assert_eq!(value(input), "");
        set_value(input, "Buy milk").unwrap();
        assert_eq!(value(input), "Buy milk");
        assert!(!has_attribute(input, "value"));
    }

    #[test]
    fn test_stale_handle_errors() {
        setup();

        let node = create_element("div");
        release(node);
        assert_eq!(set_attribute(node, "id", "x"), Err(DomError::NodeNotFound(node)));
        assert_eq!(set_value(node, "x"), Err(DomError::NodeNotFound(node)));
    }
}

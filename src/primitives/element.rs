//! Element Primitive - Declarative node construction.
//!
//! The one general-purpose construction primitive. Every piece of UI is
//! declared through it: tag, attributes, children and listeners in, one
//! finished node out.
//!
//! # Example
//!
//! ```ignore
//! use todo_widget::primitives::{attrs, create_element, element, on, Child, Children, ElementProps};
//!
//! let row = create_element("div", ElementProps {
//!     attributes: attrs([("class", "add-todo")]),
//!     children: vec![
//!         Child::Node(element("input", attrs([("id", "new-todo")]), Children::None)),
//!         Child::Node(create_element("button", ElementProps {
//!             children: "+".into(),
//!             on: vec![on("click", |_| println!("clicked"))],
//!             ..Default::default()
//!         })),
//!     ].into(),
//!     ..Default::default()
//! });
//! ```

use tracing::trace;

use crate::engine::{document, listeners};
use crate::types::{EventKind, NodeId};
use super::types::{Attributes, Child, Children, ElementProps};

// =============================================================================
// Helper: Append one child
// =============================================================================

/// Append a child entry, dropping anything that is not text or a live node.
fn append(parent: NodeId, child: Child) {
    let node = match child {
        Child::Text(text) => document::create_text_node(&text),
        Child::Node(node) => node,
        Child::Empty => {
            trace!(%parent, "skipping empty child");
            return;
        }
    };
    if let Err(err) = document::append_child(parent, node) {
        trace!(%parent, child = %node, %err, "skipping child");
    }
}

// =============================================================================
// Element Factory
// =============================================================================

/// Create an element from a tag, attributes, children and listeners.
///
/// - Attributes are set as given.
/// - A single text becomes one text node, a single node is appended as is,
///   a sequence is appended in order.
/// - Sequence entries that are neither text nor a live node are skipped.
/// - Listeners are attached by event name; unknown names are skipped.
///
/// Never fails: malformed input is dropped silently.
pub fn create_element(tag: &str, props: ElementProps) -> NodeId {
    let ElementProps {
        attributes,
        children,
        on,
    } = props;

    // 1. CREATE NODE
    let node = document::create_element(tag);

    // 2. ATTRIBUTES
    for (key, value) in &attributes {
        if let Err(err) = document::set_attribute(node, key, value) {
            trace!(%node, key, %err, "skipping attribute");
        }
    }

    // 3. CHILDREN
    match children {
        Children::None => {}
        Children::Text(text) => append(node, Child::Text(text)),
        Children::Node(child) => append(node, Child::Node(child)),
        Children::Many(entries) => {
            for entry in entries {
                append(node, entry);
            }
        }
    }

    // 4. LISTENERS
    for (name, handler) in on {
        let Some(kind) = EventKind::from_name(&name) else {
            trace!(%node, event = %name, "skipping unknown event");
            continue;
        };
        // Listeners live as long as the node; release drops them.
        if let Err(err) = listeners::add_event_listener(node, kind, handler) {
            trace!(%node, %err, "skipping listener");
        }
    }

    node
}

/// Shorthand for an element without listeners.
pub fn element(tag: &str, attributes: Attributes, children: Children) -> NodeId {
    create_element(
        tag,
        ElementProps {
            attributes,
            children,
            ..Default::default()
        },
    )
}

// =============================================================================
// Tests
// =============================================================================

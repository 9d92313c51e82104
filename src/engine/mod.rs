//! Document Engine - Node arena, tree operations and event listeners.
//!
//! The engine manages the core data structures:
//! - Document: node allocation, generations, parent/children, attributes
//! - Listeners: per-node event handlers and dispatch
//!
//! # Architecture
//!
//! Nodes are NOT objects. They are handles into a thread-local arena:
//!
//! ```text
//! n0v0: body    (parent=None, children=[n1v0])
//! n1v0: div     (parent=n0v0, class="todo-list", children=[n2v0, ...])
//! n2v0: h1      (parent=n1v0, children=[n3v0])
//! n3v0: #text   "TODO List"
//! ```
//!
//! Handles are `Copy`, cheap to capture in callbacks, and safe to keep after
//! release: a stale handle simply stops resolving.

pub mod document;
pub mod listeners;

pub use document::{
    append_child, attributes, body, children, create_element, create_text_node, exists,
    get_attribute, get_element_by_id, has_attribute, is_connected, kind, listens, node_count,
    parent, release, remove_attribute, remove_child, replace_child, replace_with,
    reset_document, set_attribute, set_value, tag_name, text, text_content, value,
};
pub use listeners::{add_event_listener, click, dispatch, input, Event, Listener};

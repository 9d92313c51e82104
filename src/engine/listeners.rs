//! Listeners - Event handler registry and dispatch.
//!
//! State and handler registry for document events.
//! Does NOT read terminal input (that is the host's job).
//!
//! # API
//!
//! - `add_event_listener(node, kind, fn)` - Subscribe to an event on a node
//! - `dispatch(event)` - Run the listeners of the event's target
//! - `click(node)` - Dispatch a click
//! - `input(node, value)` - Set an input's value and dispatch `input`
//!
//! Events do not bubble: only listeners on the target run.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use todo_widget::engine::{create_element, listeners};
//! use todo_widget::EventKind;
//!
//! let button = create_element("button");
//! let cleanup = listeners::add_event_listener(button, EventKind::Click, Rc::new(|event| {
//!     println!("clicked {}", event.target);
//! }))?;
//!
//! listeners::click(button);
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::document;
use crate::error::Result;
use crate::types::{EventKind, EventMask, NodeId};

// =============================================================================
// TYPES
// =============================================================================

/// Event delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Node the event was dispatched to.
    pub target: NodeId,
    /// Target's value property at dispatch time.
    pub value: String,
}

impl Event {
    /// Build an event for `target`, reading its current value.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            value: document::value(target),
        }
    }
}

/// Event handler (Rc so it can be cloned out of the registry before running).
pub type Listener = Rc<dyn Fn(&Event)>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct ListenerRegistry {
    handlers: HashMap<NodeId, Vec<(usize, EventKind, Listener)>>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn mask_for(&self, node: NodeId) -> EventMask {
        self.handlers
            .get(&node)
            .map(|handlers| {
                handlers
                    .iter()
                    .fold(EventMask::NONE, |mask, (_, kind, _)| mask | kind.mask())
            })
            .unwrap_or_default()
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe `handler` to `kind` events on `node`.
///
/// Fails if the node is gone. Returns cleanup function.
pub fn add_event_listener(
    node: NodeId,
    kind: EventKind,
    handler: Listener,
) -> Result<impl FnOnce()> {
    document::add_listens(node, kind.mask())?;

    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers.entry(node).or_default().push((id, kind, handler));
        id
    });

    Ok(move || {
        let mask = REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.handlers.get_mut(&node) {
                handlers.retain(|(handler_id, _, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.handlers.remove(&node);
                }
            }
            reg.mask_for(node)
        });
        // Node may already be released
        let _ = document::set_listens(node, mask);
    })
}

/// Run every listener of the target for this event kind, in registration order.
///
/// Handlers are cloned out before running, so they may add or remove
/// listeners and release nodes (including the target). Returns true if any
/// listener ran.
pub fn dispatch(event: &Event) -> bool {
    let handlers: Vec<Listener> = REGISTRY.with(|reg| {
        reg.borrow()
            .handlers
            .get(&event.target)
            .map(|handlers| {
                handlers
                    .iter()
                    .filter(|(_, kind, _)| *kind == event.kind)
                    .map(|(_, _, handler)| handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    });

    trace!(target_node = %event.target, kind = %event.kind, listeners = handlers.len(), "dispatch");

    for handler in &handlers {
        handler(event);
    }
    !handlers.is_empty()
}

/// Dispatch a click on `node`.
pub fn click(node: NodeId) -> bool {
    dispatch(&Event::new(EventKind::Click, node))
}

/// Set the value of `node` and dispatch an `input` event, like a user edit.
pub fn input(node: NodeId, value: &str) -> Result<bool> {
    document::set_value(node, value)?;
    Ok(dispatch(&Event::new(EventKind::Input, node)))
}

/// Number of listeners on a node.
pub fn listener_count(node: NodeId) -> usize {
    REGISTRY.with(|reg| reg.borrow().handlers.get(&node).map_or(0, Vec::len))
}

/// Total number of listeners on this thread.
pub fn total_listener_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().handlers.values().map(Vec::len).sum())
}

/// Drop all listeners of a node.
/// Called when the node is released so handlers (and what they capture) are freed.
pub fn cleanup_node(node: NodeId) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().handlers.remove(&node);
    });
}

pub(crate) fn reset_listeners() {
    REGISTRY.with(|reg| *reg.borrow_mut() = ListenerRegistry::new());
}

//! Core types for todo-widget.
//!
//! These types define the foundation that everything builds on.
//! They flow through the document engine and define what hosts understand.

use std::fmt;

// =============================================================================
// Node Identity
// =============================================================================

/// Handle to a node in the thread-local document.
///
/// `index` addresses the arena slot. Slots are reused after release, so the
/// `generation` is bumped every time a slot is freed. A stale handle never
/// resolves to the node that later took its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl NodeId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Node Kind
// =============================================================================

/// What a document node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Free arena slot.
    #[default]
    None,
    /// Element with a tag, attributes and children.
    Element,
    /// Leaf text node.
    Text,
}

// =============================================================================
// Events
// =============================================================================

/// Event kinds the document dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Value of an input changed (fired after every edit).
    Input,
    /// Node was activated.
    Click,
}

impl EventKind {
    /// Parse an event name as used in listener maps ("input", "click").
    ///
    /// Unknown names return `None` and are ignored by the factory.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input" => Some(Self::Input),
            "click" => Some(Self::Click),
            _ => None,
        }
    }

    /// Event name as used in listener maps.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Click => "click",
        }
    }

    /// Mask bit for this kind.
    pub const fn mask(&self) -> EventMask {
        match self {
            Self::Input => EventMask::INPUT,
            Self::Click => EventMask::CLICK,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Event Mask (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Listener kinds attached to a node, as a bitfield.
    ///
    /// Hosts read this to find interactive nodes without touching the
    /// handler registry. Combine with bitwise OR: `EventMask::INPUT | EventMask::CLICK`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct EventMask: u8 {
        const NONE = 0;
        const INPUT = 1 << 0;
        const CLICK = 1 << 1;
    }
}

// =============================================================================
// Task Identity
// =============================================================================

/// Identifier of a task record, unique within the list that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Value used for the row's `id` attribute, e.g. `task-3`.
    pub fn dom_id(&self) -> String {
        format!("task-{}", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::from_name("click"), Some(EventKind::Click));
        assert_eq!(EventKind::from_name("input"), Some(EventKind::Input));
        assert_eq!(EventKind::from_name("change"), None);
        assert_eq!(EventKind::Click.name(), "click");
    }

    #[test]
    fn test_event_mask() {
        let mask = EventKind::Click.mask() | EventKind::Input.mask();
        assert!(mask.contains(EventMask::CLICK));
        assert!(mask.contains(EventMask::INPUT));
        assert!(!EventMask::default().contains(EventMask::CLICK));
    }

    #[test]
    fn test_task_dom_id() {
        assert_eq!(TaskId(7).dom_id(), "task-7");
        assert_eq!(TaskId(7).to_string(), "7");
    }
}

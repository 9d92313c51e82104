//! Primitive types - Props, children and callbacks.
//!
//! These types define the interface of the element factory.

use std::rc::Rc;

use crate::engine::listeners::{Event, Listener};
use crate::types::NodeId;

// =============================================================================
// Callback Types
// =============================================================================

/// Callback receiving a text value (input changes).
pub type TextCallback = Rc<dyn Fn(&str)>;

/// Callback with no arguments (button actions).
pub type ActionCallback = Rc<dyn Fn()>;

/// Callback receiving a task id.
pub type TaskCallback = Rc<dyn Fn(crate::types::TaskId)>;

// =============================================================================
// Attributes
// =============================================================================

/// Attribute mapping. Order of application is not significant.
pub type Attributes = Vec<(String, String)>;

/// Build an attribute mapping from string pairs.
pub fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

// =============================================================================
// Children
// =============================================================================

/// One entry of a children sequence.
///
/// `Empty` stands for anything that is neither text nor a node; the factory
/// skips it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Child {
    Text(String),
    Node(NodeId),
    #[default]
    Empty,
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Child::Text(value.to_string())
    }
}

impl From<String> for Child {
    fn from(value: String) -> Self {
        Child::Text(value)
    }
}

impl From<NodeId> for Child {
    fn from(value: NodeId) -> Self {
        Child::Node(value)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Empty, Into::into)
    }
}

/// Children argument of the factory: one text, one node, or a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Children {
    #[default]
    None,
    Text(String),
    Node(NodeId),
    Many(Vec<Child>),
}

impl From<&str> for Children {
    fn from(value: &str) -> Self {
        Children::Text(value.to_string())
    }
}

impl From<String> for Children {
    fn from(value: String) -> Self {
        Children::Text(value)
    }
}

impl From<NodeId> for Children {
    fn from(value: NodeId) -> Self {
        Children::Node(value)
    }
}

impl From<Vec<Child>> for Children {
    fn from(value: Vec<Child>) -> Self {
        Children::Many(value)
    }
}

impl From<Vec<NodeId>> for Children {
    fn from(value: Vec<NodeId>) -> Self {
        Children::Many(value.into_iter().map(Child::Node).collect())
    }
}

// =============================================================================
// Element Props
// =============================================================================

/// Properties for the element factory.
///
/// # Example
///
/// ```ignore
/// use todo_widget::primitives::{attrs, create_element, on, ElementProps};
///
/// let button = create_element("button", ElementProps {
///     attributes: attrs([("id", "add-btn")]),
///     children: "+".into(),
///     on: vec![on("click", |_| println!("add"))],
/// });
/// ```
#[derive(Default)]
pub struct ElementProps {
    /// Attributes to set (string keys to string values).
    pub attributes: Attributes,

    /// Children to append, in order.
    pub children: Children,

    /// Event name to handler. Unknown event names are ignored.
    pub on: Vec<(String, Listener)>,
}

/// Pair an event name with a handler for [`ElementProps::on`].
pub fn on(event: &str, handler: impl Fn(&Event) + 'static) -> (String, Listener) {
    (event.to_string(), Rc::new(handler))
}

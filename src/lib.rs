//! # todo-widget
//!
//! Declarative node tree, component lifecycle and a TODO list widget.
//!
//! ## Architecture
//!
//! The document is a thread-local arena of nodes addressed by generational
//! [`NodeId`] handles. Components render subtrees through the element
//! factory and replace them wholesale on `update()`:
//!
//! ```text
//! state change → Component::update → render → replace_with → release old subtree
//! ```
//!
//! Hosts present the attached tree and feed user actions back in as
//! `input` / `click` events.
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeId, EventKind, EventMask, TaskId)
//! - [`engine`] - Node arena, tree operations, event listeners
//! - [`primitives`] - Element factory (`create_element`, `element`)
//! - [`component`] - Mount / update / unmount lifecycle
//! - [`todo`] - TodoList, AddTask, TaskItem
//! - [`renderer`] - HTML and terminal outline rendering
//! - [`host`] - Alerts, page-load hook, terminal host
//! - [`config`] - TOML configuration

pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod primitives;
pub mod renderer;
pub mod todo;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ConfigError, DomError, Result};

pub use engine::{
    append_child, body, get_element_by_id, release, replace_with, reset_document, Event,
};

pub use primitives::{
    attrs, create_element, element, on, Attributes, Child, Children, ElementProps,
};

pub use component::{shared, Component, MountState, Shared};

pub use config::TodoConfig;

pub use todo::{AddTask, TaskItem, TaskRecord, TodoList};

pub use renderer::{outline, to_html, Outline};

pub use host::{alert, mount_to_body, TerminalOptions};

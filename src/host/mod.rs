//! Host - Where the document meets the outside world.
//!
//! - [`alert`] - Blocking notifications
//! - [`terminal`] - crossterm presentation and key routing
//! - [`mount_to_body`] - Page-load hook for a root component

pub mod alert;
pub mod terminal;

use tracing::info;

use crate::component::{Component, Shared};
use crate::engine::document;
use crate::error::Result;
use crate::types::NodeId;

pub use alert::{alert, on_alert, take_alerts};
pub use terminal::{map_key, run, HostAction, TerminalHost, TerminalOptions};

/// Mount `root` and attach its node to the document body.
pub fn mount_to_body<C: Component>(root: &Shared<C>) -> Result<NodeId> {
    let node = root.borrow_mut().mount();
    document::append_child(document::body(), node)?;
    info!(%node, "root mounted");
    Ok(node)
}

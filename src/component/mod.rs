//! Component - Render / mount / update lifecycle.
//!
//! A component owns private state and turns it into a node subtree with
//! [`Component::render`]. The lifecycle is caller-driven:
//!
//! ```text
//! Unmounted ──mount()──▶ Mounted(node) ──update()──▶ Mounted(new node)
//! ```
//!
//! - `mount()` renders, caches and returns the node. The caller attaches it.
//! - `update()` renders again, swaps the new node in for the cached one in
//!   its parent and releases the old subtree. No diffing.
//!
//! Nothing re-renders on its own: a state change is invisible until the
//! owner calls `update()`.
//!
//! # Example
//!
//! ```ignore
//! struct Counter { clicks: u32, mount: MountState }
//!
//! impl Component for Counter {
//!     fn render(&mut self) -> NodeId {
//!         element("span", Attributes::new(), format!("{}", self.clicks).into())
//!     }
//!     fn mount_state(&self) -> MountState { self.mount }
//!     fn set_mount_state(&mut self, state: MountState) { self.mount = state; }
//! }
//!
//! let node = counter.mount();
//! append_child(body(), node)?;
//! counter.clicks += 1;
//! counter.update()?;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::engine::document;
use crate::error::{DomError, Result};
use crate::types::NodeId;

/// Component shared between its owner and the callbacks it renders.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a component for sharing.
pub fn shared<T>(component: T) -> Shared<T> {
    Rc::new(RefCell::new(component))
}

// =============================================================================
// Mount State
// =============================================================================

/// Where a component is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    /// Mounted; holds the node produced by the last render.
    Mounted(NodeId),
}

impl MountState {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            MountState::Unmounted => None,
            MountState::Mounted(node) => Some(*node),
        }
    }
}

// =============================================================================
// Component Trait
// =============================================================================

pub trait Component {
    /// Build a fresh, detached subtree from the current state.
    fn render(&mut self) -> NodeId;

    fn mount_state(&self) -> MountState;

    fn set_mount_state(&mut self, state: MountState);

    /// Node produced by the last render, if mounted.
    fn node(&self) -> Option<NodeId> {
        self.mount_state().node()
    }

    /// First render: cache and return the node for the caller to attach.
    ///
    /// Mounting again renders a new node and moves the cache to it; the old
    /// node belongs to whoever holds it (usually a parent subtree that is
    /// about to be released).
    fn mount(&mut self) -> NodeId {
        let node = self.render();
        self.set_mount_state(MountState::Mounted(node));
        debug!(%node, "mounted");
        node
    }

    /// Re-render and replace the cached node in its parent.
    ///
    /// The old subtree is released. A detached cached node is simply
    /// swapped out.
    fn update(&mut self) -> Result<NodeId> {
        let Some(old) = self.node() else {
            return Err(DomError::NotMounted);
        };
        let new = self.render();
        if let Err(err) = document::replace_with(old, new) {
            document::release(new);
            return Err(err);
        }
        let released = document::release(old);
        self.set_mount_state(MountState::Mounted(new));
        debug!(%old, %new, released, "updated");
        Ok(new)
    }

    /// Detach and release the current node.
    fn unmount(&mut self) {
        if let Some(node) = self.node() {
            document::release(node);
        }
        self.set_mount_state(MountState::Unmounted);
    }
}

// =============================================================================
// Tests
// =============================================================================

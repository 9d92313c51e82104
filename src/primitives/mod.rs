//! Primitives - The element factory and its prop types.
//!
//! - [`create_element`] - Element from tag, attributes, children and listeners
//! - [`element`] - Same, without listeners
//!
//! # Architecture
//!
//! The factory is the only way UI gets declared. Components call it from
//! `render()` and get back a [`NodeId`](crate::NodeId) for a finished,
//! detached subtree. Attaching is the caller's job.

mod element;
mod types;

pub use element::{create_element, element};
pub use types::*;

//! Renderers - Present the document outside the engine.
//!
//! - [`to_html`] - Markup for a subtree (also used to compare renders)
//! - [`outline`] - Text lines and control positions for terminal hosts

mod html;
mod outline;

pub use html::to_html;
pub use outline::{outline, Control, ControlKind, Outline};

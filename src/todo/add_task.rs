//! AddTask - The new-task input row.
//!
//! Stateless: the owner passes the current pending text and two callbacks.
//! The input's value is re-applied from `value` on every render, so a
//! re-render never loses what the user typed.

use crate::component::{Component, MountState};
use crate::engine::document;
use crate::primitives::{
    attrs, create_element, on, ActionCallback, Child, ElementProps, TextCallback,
};
use crate::types::NodeId;

/// Properties for [`AddTask`].
pub struct AddTaskProps {
    /// Placeholder of the text input.
    pub placeholder: String,
    /// Pending text shown in the input.
    pub value: String,
    /// Called with the input's value after every edit.
    pub on_input: TextCallback,
    /// Called when the add button is clicked.
    pub on_add: ActionCallback,
}

pub struct AddTask {
    props: AddTaskProps,
    mount: MountState,
}

impl AddTask {
    pub fn new(props: AddTaskProps) -> Self {
        Self {
            props,
            mount: MountState::Unmounted,
        }
    }
}

impl Component for AddTask {
    fn render(&mut self) -> NodeId {
        let on_input = self.props.on_input.clone();
        let input = create_element(
            "input",
            ElementProps {
                attributes: attrs([
                    ("id", "new-todo"),
                    ("type", "text"),
                    ("placeholder", self.props.placeholder.as_str()),
                ]),
                on: vec![on("input", move |event| on_input(&event.value))],
                ..Default::default()
            },
        );
        // Freshly created, cannot be stale
        let _ = document::set_value(input, &self.props.value);

        let on_add = self.props.on_add.clone();
        let button = create_element(
            "button",
            ElementProps {
                attributes: attrs([("id", "add-btn")]),
                children: "+".into(),
                on: vec![on("click", move |_| on_add())],
            },
        );

        create_element(
            "div",
            ElementProps {
                attributes: attrs([("class", "add-todo")]),
                children: vec![Child::Node(input), Child::Node(button)].into(),
                ..Default::default()
            },
        )
    }

    fn mount_state(&self) -> MountState {
        self.mount
    }

    fn set_mount_state(&mut self, state: MountState) {
        self.mount = state;
    }
}

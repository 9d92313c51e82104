//! TaskItem - One row of the list with a two-click delete.
//!
//! The first click on the delete button arms the confirmation and
//! re-renders the row with the button highlighted. The second click asks
//! the owner to remove the task. The highlight is ordinary component state
//! read by `render()`, so it survives any re-render.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error};

use crate::component::{Component, MountState, Shared};
use crate::primitives::{
    attrs, create_element, element, on, Attributes, Child, ElementProps, TaskCallback,
};
use crate::types::{NodeId, TaskId};
use super::task::TaskRecord;

/// Inline style of an armed delete button.
pub const CONFIRM_STYLE: &str = "background-color: #ff8080";

/// Callbacks into the owning list.
#[derive(Clone)]
pub struct TaskItemCallbacks {
    /// Remove the task with this id.
    pub on_remove: TaskCallback,
    /// Flip completion of the task with this id.
    pub on_toggle: TaskCallback,
}

/// Result of a click on the delete button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePress {
    /// First click: confirmation armed, nothing removed.
    Armed,
    /// Second click: remove this task.
    Confirmed(TaskId),
}

pub struct TaskItem {
    task: TaskRecord,
    confirm_armed: bool,
    callbacks: TaskItemCallbacks,
    this: Weak<RefCell<TaskItem>>,
    mount: MountState,
}

impl TaskItem {
    pub fn new(task: TaskRecord, callbacks: TaskItemCallbacks) -> Shared<TaskItem> {
        Rc::new_cyclic(|this| {
            RefCell::new(TaskItem {
                task,
                confirm_armed: false,
                callbacks,
                this: this.clone(),
                mount: MountState::Unmounted,
            })
        })
    }

    pub fn task(&self) -> &TaskRecord {
        &self.task
    }

    /// Refresh the task snapshot before the owner re-renders this row.
    pub fn set_task(&mut self, task: TaskRecord) {
        self.task = task;
    }

    pub fn is_confirm_armed(&self) -> bool {
        self.confirm_armed
    }

    /// Register a click on the delete button.
    pub fn press_delete(&mut self) -> DeletePress {
        if self.confirm_armed {
            DeletePress::Confirmed(self.task.id)
        } else {
            self.confirm_armed = true;
            DeletePress::Armed
        }
    }

    /// Click handler body. Never holds a borrow of the item while calling
    /// into the owner, since the owner re-renders (and re-borrows) items.
    fn handle_delete_click(item: &Shared<TaskItem>) {
        let press = item.borrow_mut().press_delete();
        match press {
            DeletePress::Armed => {
                let id = item.borrow().task.id;
                debug!(task = %id, "delete armed");
                if let Err(err) = item.borrow_mut().update() {
                    error!(task = %id, %err, "failed to re-render task row");
                }
            }
            DeletePress::Confirmed(id) => {
                let on_remove = item.borrow().callbacks.on_remove.clone();
                on_remove(id);
            }
        }
    }

    fn render_checkbox(&self) -> NodeId {
        let id = self.task.id;
        let on_toggle = self.callbacks.on_toggle.clone();
        let mut attributes = attrs([("type", "checkbox")]);
        if self.task.is_completed {
            attributes.push(("checked".to_string(), String::new()));
        }
        create_element(
            "input",
            ElementProps {
                attributes,
                on: vec![on("click", move |_| on_toggle(id))],
                ..Default::default()
            },
        )
    }

    fn render_delete_button(&self) -> NodeId {
        let this = self.this.clone();
        let attributes = if self.confirm_armed {
            attrs([("class", "delete confirm"), ("style", CONFIRM_STYLE)])
        } else {
            attrs([("class", "delete")])
        };
        create_element(
            "button",
            ElementProps {
                attributes,
                children: "🗑️".into(),
                on: vec![on("click", move |_| {
                    if let Some(item) = this.upgrade() {
                        TaskItem::handle_delete_click(&item);
                    }
                })],
            },
        )
    }
}

impl Component for TaskItem {
    fn render(&mut self) -> NodeId {
        let label_attributes = if self.task.is_completed {
            attrs([("class", "completed")])
        } else {
            Attributes::new()
        };
        element(
            "li",
            attrs([("id", self.task.id.dom_id().as_str())]),
            vec![
                Child::Node(self.render_checkbox()),
                Child::Node(element("label", label_attributes, self.task.name.as_str().into())),
                Child::Node(self.render_delete_button()),
            ]
            .into(),
        )
    }

    fn mount_state(&self) -> MountState {
        self.mount
    }

    fn set_mount_state(&mut self, state: MountState) {
        self.mount = state;
    }
}

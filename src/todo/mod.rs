//! TODO widget - Components built on the element factory.
//!
//! - [`TodoList`] - Root: tasks, pending input, id generator
//! - [`AddTask`] - Input row (`input#new-todo`, `button#add-btn`)
//! - [`TaskItem`] - One `li` per task with checkbox and two-click delete
//! - [`TaskRecord`] / [`TaskIdGenerator`] - Plain data
//!
//! ```text
//! div.todo-list
//! ├── h1
//! ├── div.add-todo ── input#new-todo, button#add-btn
//! └── ul#todos
//!     └── li#task-N ── input[type=checkbox], label, button.delete
//! ```

mod add_task;
mod list;
mod task;
mod task_item;

pub use add_task::{AddTask, AddTaskProps};
pub use list::TodoList;
pub use task::{TaskIdGenerator, TaskRecord};
pub use task_item::{DeletePress, TaskItem, TaskItemCallbacks, CONFIRM_STYLE};

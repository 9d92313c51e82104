//! TodoList - The root component.
//!
//! Owns the tasks, the pending input text, the task id generator and the
//! row components. Every state change that is visible goes through one
//! path: mutate state, then a single `update()` (if mounted).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, error};

use crate::component::{Component, MountState, Shared};
use crate::config::TodoConfig;
use crate::error::Result;
use crate::host::alert;
use crate::primitives::{attrs, element, Attributes, Child};
use crate::types::{NodeId, TaskId};
use super::add_task::{AddTask, AddTaskProps};
use super::task::{TaskIdGenerator, TaskRecord};
use super::task_item::{TaskItem, TaskItemCallbacks};

pub struct TodoList {
    tasks: Vec<TaskRecord>,
    pending_input: String,
    ids: TaskIdGenerator,
    /// Row components by task id, kept across renders.
    items: HashMap<TaskId, Shared<TaskItem>>,
    config: TodoConfig,
    this: Weak<RefCell<TodoList>>,
    mount: MountState,
}

impl TodoList {
    /// Create the list, seeding one incomplete task per configured name.
    pub fn new(config: TodoConfig) -> Shared<TodoList> {
        let mut ids = TaskIdGenerator::new();
        let tasks = config
            .tasks
            .iter()
            .map(|name| TaskRecord::new(ids.next_id(), name.as_str()))
            .collect();

        Rc::new_cyclic(|this| {
            RefCell::new(TodoList {
                tasks,
                pending_input: String::new(),
                ids,
                items: HashMap::new(),
                config,
                this: this.clone(),
                mount: MountState::Unmounted,
            })
        })
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn config(&self) -> &TodoConfig {
        &self.config
    }

    /// Re-render if mounted. State changes on an unmounted list just wait
    /// for the first `mount()`.
    fn refresh(&mut self) -> Result<()> {
        if self.node().is_some() {
            self.update()?;
        }
        Ok(())
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Remember the text typed so far. Does not re-render.
    pub fn on_add_input_change(&mut self, text: &str) {
        self.pending_input = text.to_string();
    }

    /// Add a task from the pending input.
    ///
    /// With an empty input this raises the configured alert and changes
    /// nothing, returning `Ok(None)`. Otherwise the task is appended, the
    /// input cleared and the list re-rendered.
    pub fn on_add_task(&mut self) -> Result<Option<TaskId>> {
        if self.pending_input.is_empty() {
            alert::alert(&self.config.empty_task_message);
            return Ok(None);
        }

        let name = std::mem::take(&mut self.pending_input);
        let task = TaskRecord::new(self.ids.next_id(), name);
        let id = task.id;
        debug!(task = %id, name = %task.name, "task added");
        self.tasks.push(task);

        self.refresh()?;
        Ok(Some(id))
    }

    /// Remove the task with `id` and re-render.
    ///
    /// An unknown id changes nothing and returns `Ok(None)`.
    pub fn remove_task_by_id(&mut self, id: TaskId) -> Result<Option<TaskRecord>> {
        let Some(position) = self.tasks.iter().position(|task| task.id == id) else {
            debug!(task = %id, "remove of unknown task ignored");
            return Ok(None);
        };

        let removed = self.tasks.remove(position);
        self.items.remove(&id);
        debug!(task = %id, "task removed");

        self.refresh()?;
        Ok(Some(removed))
    }

    /// Flip completion of the task with `id` and re-render.
    ///
    /// Returns the new completion state, or `None` for an unknown id.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        task.is_completed = !task.is_completed;
        let completed = task.is_completed;
        debug!(task = %id, completed, "task toggled");

        self.refresh()?;
        Ok(Some(completed))
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Run `f` on the list if it is still alive, logging errors.
    ///
    /// Callbacks fire from event dispatch, which has no caller to return
    /// an error to.
    fn with_list<R>(
        this: &Weak<RefCell<TodoList>>,
        action: &str,
        f: impl FnOnce(&mut TodoList) -> Result<R>,
    ) {
        let Some(list) = this.upgrade() else { return };
        let result = f(&mut list.borrow_mut());
        if let Err(err) = result {
            error!(action, %err, "todo list update failed");
        }
    }

    fn add_task_props(&self) -> AddTaskProps {
        let on_input = self.this.clone();
        let on_add = self.this.clone();
        AddTaskProps {
            placeholder: self.config.placeholder.clone(),
            value: self.pending_input.clone(),
            on_input: Rc::new(move |text: &str| {
                TodoList::with_list(&on_input, "input", |list| {
                    list.on_add_input_change(text);
                    Ok(())
                });
            }),
            on_add: Rc::new(move || {
                TodoList::with_list(&on_add, "add", |list| list.on_add_task());
            }),
        }
    }

    fn item_callbacks(&self) -> TaskItemCallbacks {
        let on_remove = self.this.clone();
        let on_toggle = self.this.clone();
        TaskItemCallbacks {
            on_remove: Rc::new(move |id: TaskId| {
                TodoList::with_list(&on_remove, "remove", |list| list.remove_task_by_id(id));
            }),
            on_toggle: Rc::new(move |id: TaskId| {
                TodoList::with_list(&on_toggle, "toggle", |list| list.toggle_task(id));
            }),
        }
    }

    fn render_tasks(&mut self) -> Vec<Child> {
        let callbacks = self.item_callbacks();
        let mut rows = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let item = self
                .items
                .entry(task.id)
                .or_insert_with(|| TaskItem::new(task.clone(), callbacks.clone()));
            let mut item = item.borrow_mut();
            item.set_task(task.clone());
            rows.push(Child::Node(item.mount()));
        }
        rows
    }
}

impl Component for TodoList {
    fn render(&mut self) -> NodeId {
        let heading = element("h1", Attributes::new(), self.config.heading.as_str().into());
        let add_row = AddTask::new(self.add_task_props()).mount();
        let rows = self.render_tasks();
        let list = element("ul", attrs([("id", "todos")]), rows.into());

        element(
            "div",
            attrs([("class", "todo-list")]),
            vec![Child::Node(heading), Child::Node(add_row), Child::Node(list)].into(),
        )
    }

    fn mount_state(&self) -> MountState {
        self.mount
    }

    fn set_mount_state(&mut self, state: MountState) {
        self.mount = state;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::document::{
        append_child, body, children, get_element_by_id, reset_document, text_content, value,
    };
    use crate::engine::listeners::{click, input};
    use crate::host::alert::{reset_alerts, take_alerts};
    use crate::renderer::to_html;

    fn setup() -> Shared<TodoList> {
        reset_document();
        reset_alerts();
        let list = TodoList::new(TodoConfig::default());
        let node = list.borrow_mut().mount();
        append_child(body(), node).unwrap();
        list
    }

    fn names(list: &Shared<TodoList>) -> Vec<String> {
        list.borrow().tasks().iter().map(|t| t.name.clone()).collect()
    }

    fn delete_button(id: TaskId) -> NodeId {
        let row = get_element_by_id(&id.dom_id()).unwrap();
        *children(row).last().unwrap()
    }

    #[test]
    fn test_seeded_tasks() {
        let list = setup();

        assert_eq!(names(&list), vec!["Сделать домашку", "Сделать практику", "Пойти домой"]);
        assert!(list.borrow().tasks().iter().all(|t| !t.is_completed));
        assert_eq!(children(get_element_by_id("todos").unwrap()).len(), 3);
    }

    #[test]
    fn test_full_markup() {
        reset_document();
        let list = TodoList::new(TodoConfig {
            tasks: vec!["Пойти домой".to_string()],
            ..TodoConfig::default()
        });
        let node = list.borrow_mut().mount();

        assert_eq!(
            to_html(node),
            concat!(
                r#"<div class="todo-list"><h1>TODO List</h1>"#,
                r#"<div class="add-todo"><input id="new-todo" type="text" placeholder="Задание"><button id="add-btn">+</button></div>"#,
                r#"<ul id="todos"><li id="task-1"><input type="checkbox"><label>Пойти домой</label><button class="delete">🗑️</button></li></ul>"#,
                r#"</div>"#
            )
        );
    }

    #[test]
    fn test_add_through_events() {
        let list = setup();

        input(get_element_by_id("new-todo").unwrap(), "Buy milk").unwrap();
        assert_eq!(list.borrow().pending_input(), "Buy milk");

        click(get_element_by_id("add-btn").unwrap());

        let list_ref = list.borrow();
        assert_eq!(list_ref.tasks().len(), 4);
        let last = list_ref.tasks().last().unwrap();
        assert_eq!(last.name, "Buy milk");
        assert!(!last.is_completed);
        assert_eq!(list_ref.pending_input(), "");
        assert_eq!(value(get_element_by_id("new-todo").unwrap()), "");
        assert_eq!(text_content(get_element_by_id(&last.id.dom_id()).unwrap()), "Buy milk🗑️");
    }

    #[test]
    fn test_add_empty_alerts() {
        let list = setup();
        let before = to_html(list.borrow().node().unwrap());

        click(get_element_by_id("add-btn").unwrap());

        assert_eq!(list.borrow().tasks().len(), 3);
        assert_eq!(take_alerts(), vec!["Task name cannot be empty".to_string()]);
        assert_eq!(to_html(list.borrow().node().unwrap()), before);
    }

    #[test]
    fn test_two_click_delete_through_events() {
        let list = setup();
        let second = list.borrow().tasks()[1].id;

        click(delete_button(second));
        assert_eq!(list.borrow().tasks().len(), 3);

        click(delete_button(second));
        assert_eq!(names(&list), vec!["Сделать домашку", "Пойти домой"]);
        assert_eq!(get_element_by_id(&second.dom_id()), None);
        assert_eq!(children(get_element_by_id("todos").unwrap()).len(), 2);
    }

    #[test]
    fn test_armed_row_survives_list_rerender() {
        let list = setup();
        let first = list.borrow().tasks()[0].id;
        let last = list.borrow().tasks()[2].id;

        click(delete_button(first));
        list.borrow_mut().toggle_task(last).unwrap();

        let button = delete_button(first);
        assert_eq!(
            crate::engine::get_attribute(button, "class").as_deref(),
            Some("delete confirm")
        );
    }

    #[test]
    fn test_remove_unknown_id() {
        let list = setup();
        let node = list.borrow().node();

        assert_eq!(list.borrow_mut().remove_task_by_id(TaskId(99)), Ok(None));
        assert_eq!(list.borrow().tasks().len(), 3);
        // No re-render
        assert_eq!(list.borrow().node(), node);
    }

    #[test]
    fn test_toggle_through_checkbox() {
        let list = setup();
        let id = list.borrow().tasks()[0].id;
        let checkbox = children(get_element_by_id(&id.dom_id()).unwrap())[0];

        click(checkbox);
        assert_eq!(list.borrow().task(id).map(|t| t.is_completed), Some(true));
        let checkbox = children(get_element_by_id(&id.dom_id()).unwrap())[0];
        assert!(crate::engine::has_attribute(checkbox, "checked"));

        assert_eq!(list.borrow_mut().toggle_task(TaskId(42)), Ok(None));
    }

    #[test]
    fn test_ids_not_reused() {
        let list = setup();
        let last = list.borrow().tasks()[2].id;
        list.borrow_mut().remove_task_by_id(last).unwrap();

        list.borrow_mut().on_add_input_change("again");
        let id = list.borrow_mut().on_add_task().unwrap().unwrap();
        assert!(id > last);
    }

    #[test]
    fn test_unmounted_list_changes_state_only() {
        reset_document();
        reset_alerts();
        let list = TodoList::new(TodoConfig::empty());

        list.borrow_mut().on_add_input_change("Buy milk");
        assert_eq!(list.borrow_mut().on_add_task(), Ok(Some(TaskId(1))));
        assert_eq!(list.borrow().node(), None);
    }

    #[test]
    fn test_pending_input_survives_rerender() {
        let list = setup();
        let first = list.borrow().tasks()[0].id;

        input(get_element_by_id("new-todo").unwrap(), "half").unwrap();
        list.borrow_mut().toggle_task(first).unwrap();

        assert_eq!(value(get_element_by_id("new-todo").unwrap()), "half");
    }
}

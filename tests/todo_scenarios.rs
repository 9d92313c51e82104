//! End-to-end scenarios for the TODO widget, driven through document events
//! the way a user would drive it.

use pretty_assertions::assert_eq;

use todo_widget::component::{Component, Shared};
use todo_widget::engine::document::{children, get_attribute, node_count, value};
use todo_widget::engine::listeners::{click, input, total_listener_count};
use todo_widget::host::alert::{reset_alerts, take_alerts};
use todo_widget::todo::CONFIRM_STYLE;
use todo_widget::{
    body, get_element_by_id, mount_to_body, reset_document, to_html, NodeId, TaskId, TodoConfig,
    TodoList,
};

fn setup() -> Shared<TodoList> {
    reset_document();
    reset_alerts();
    let list = TodoList::new(TodoConfig::default());
    mount_to_body(&list).unwrap();
    list
}

fn names(list: &Shared<TodoList>) -> Vec<String> {
    list.borrow().tasks().iter().map(|t| t.name.clone()).collect()
}

fn rows() -> Vec<NodeId> {
    children(get_element_by_id("todos").unwrap())
}

fn delete_button(id: TaskId) -> NodeId {
    *children(get_element_by_id(&id.dom_id()).unwrap()).last().unwrap()
}

fn type_and_add(text: &str) {
    input(get_element_by_id("new-todo").unwrap(), text).unwrap();
    click(get_element_by_id("add-btn").unwrap());
}

#[test]
fn page_load_shows_seeded_tasks() {
    let list = setup();

    assert_eq!(children(body()).len(), 1);
    assert_eq!(names(&list), vec!["Сделать домашку", "Сделать практику", "Пойти домой"]);
    assert_eq!(rows().len(), 3);
    let heading = children(list.borrow().node().unwrap())[0];
    assert_eq!(to_html(heading), "<h1>TODO List</h1>");
    assert_eq!(
        get_attribute(get_element_by_id("new-todo").unwrap(), "placeholder").as_deref(),
        Some("Задание")
    );
}

#[test]
fn add_appends_incomplete_task_and_clears_input() {
    let list = setup();

    type_and_add("Buy milk");

    let tasks = list.borrow().tasks().to_vec();
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[3].name, "Buy milk");
    assert!(!tasks[3].is_completed);
    assert_eq!(rows().len(), 4);
    assert_eq!(value(get_element_by_id("new-todo").unwrap()), "");
    assert_eq!(list.borrow().pending_input(), "");
}

#[test]
fn empty_add_alerts_and_keeps_list() {
    let list = setup();

    click(get_element_by_id("add-btn").unwrap());

    assert_eq!(take_alerts(), vec!["Task name cannot be empty".to_string()]);
    assert_eq!(list.borrow().tasks().len(), 3);
    assert_eq!(rows().len(), 3);
}

#[test]
fn delete_needs_confirmation() {
    let list = setup();
    let target = list.borrow().tasks()[1].id;

    click(delete_button(target));
    assert_eq!(list.borrow().tasks().len(), 3);
    let armed = delete_button(target);
    assert_eq!(get_attribute(armed, "style").as_deref(), Some(CONFIRM_STYLE));

    click(armed);
    assert_eq!(names(&list), vec!["Сделать домашку", "Пойти домой"]);
    assert!(get_element_by_id(&target.dom_id()).is_none());
    assert_eq!(rows().len(), 2);
}

#[test]
fn toggle_marks_completed() {
    let list = setup();
    let target = list.borrow().tasks()[0].id;

    let checkbox = children(get_element_by_id(&target.dom_id()).unwrap())[0];
    click(checkbox);

    assert!(list.borrow().task(target).unwrap().is_completed);
    let row = children(get_element_by_id(&target.dom_id()).unwrap());
    assert_eq!(get_attribute(row[0], "checked").as_deref(), Some(""));
    assert_eq!(get_attribute(row[1], "class").as_deref(), Some("completed"));
}

#[test]
fn update_without_change_is_idempotent() {
    let list = setup();
    let before = to_html(body());
    let nodes = node_count();
    let listeners = total_listener_count();

    list.borrow_mut().update().unwrap();
    list.borrow_mut().update().unwrap();

    assert_eq!(to_html(body()), before);
    assert_eq!(node_count(), nodes);
    assert_eq!(total_listener_count(), listeners);
}

#[test]
fn old_nodes_are_released_after_rerender() {
    let list = setup();
    let old_root = list.borrow().node().unwrap();

    type_and_add("Buy milk");

    let new_root = list.borrow().node().unwrap();
    assert_ne!(old_root, new_root);
    assert!(!todo_widget::engine::document::exists(old_root));
    assert_eq!(children(body()), vec![new_root]);
}

#[test]
fn mixed_session() {
    let list = setup();

    type_and_add("Buy milk");
    type_and_add("Buy bread");
    click(get_element_by_id("add-btn").unwrap());

    let first = list.borrow().tasks()[0].id;
    click(delete_button(first));
    click(delete_button(first));

    let milk = list.borrow().tasks()[2].id;
    click(children(get_element_by_id(&milk.dom_id()).unwrap())[0]);

    assert_eq!(
        names(&list),
        vec!["Сделать практику", "Пойти домой", "Buy milk", "Buy bread"]
    );
    assert!(list.borrow().task(milk).unwrap().is_completed);
    assert_eq!(take_alerts().len(), 1);
    assert_eq!(rows().len(), 4);
}

//! Task records and id assignment.

use crate::types::TaskId;

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,
    pub is_completed: bool,
}

impl TaskRecord {
    /// New incomplete task.
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_completed: false,
        }
    }
}

/// Monotonic task id source. Ids are never handed out twice.
///
/// Owned by the list that issues the ids, so two lists never share a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdGenerator {
    next: u64,
}

impl Default for TaskIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }

    /// Id the next call will return.
    pub fn peek(&self) -> TaskId {
        TaskId(self.next)
    }
}

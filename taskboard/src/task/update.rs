//! UpdateTask command

use crate::error::BoardError;
use crate::operation::{logged, Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use crate::types::{Priority, TaskPatch, TaskRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Update a task's fields in place
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task to update, by id or by position
    pub task: TaskRef,
    /// Fields to replace; absent fields keep their value
    #[serde(flatten)]
    pub patch: TaskPatch,
}

impl UpdateTask {
    /// Create a new UpdateTask command that changes nothing yet
    pub fn new(task: impl Into<TaskRef>) -> Self {
        Self {
            task: task.into(),
            patch: TaskPatch::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.patch = self.patch.with_title(title);
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.patch = self.patch.with_assignee(name);
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.patch = self.patch.with_due_date(due_date);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.patch = self.patch.with_description(description);
        self
    }

    /// Set the priority tag
    pub fn with_tag(mut self, tag: Priority) -> Self {
        self.patch = self.patch.with_tag(tag);
        self
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "task"
    }

    fn description(&self) -> &'static str {
        "Update a task's title, assignee, due date, description or tag"
    }
}

impl Execute<BoardStore, BoardError> for UpdateTask {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result = ctx
            .edit_task(self.task, &self.patch)
            .and_then(|task| Ok(serde_json::to_value(&task)?));
        logged(self, start, result)
    }
}

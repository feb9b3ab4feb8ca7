//! DeleteTask command

use crate::error::BoardError;
use crate::operation::{logged, Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use crate::types::TaskRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Delete a task from the board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task to delete, by id or by position
    pub task: TaskRef,
}

impl DeleteTask {
    /// Create a new DeleteTask command
    pub fn new(task: impl Into<TaskRef>) -> Self {
        Self { task: task.into() }
    }
}

impl Operation for DeleteTask {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "task"
    }

    fn description(&self) -> &'static str {
        "Delete a task from the board"
    }
}

impl Execute<BoardStore, BoardError> for DeleteTask {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result = ctx
            .delete_task(self.task)
            .map(|task| serde_json::json!({ "deleted": true, "id": task.id }));
        logged(self, start, result)
    }
}

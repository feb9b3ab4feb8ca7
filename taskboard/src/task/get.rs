//! GetTask command

use crate::error::{BoardError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use crate::types::TaskRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a task by id or position
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTask {
    /// The task to look up
    pub task: TaskRef,
}

impl GetTask {
    /// Create a new GetTask command
    pub fn new(task: impl Into<TaskRef>) -> Self {
        Self { task: task.into() }
    }
}

impl Operation for GetTask {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "task"
    }

    fn description(&self) -> &'static str {
        "Get a task by id or position"
    }
}

impl GetTask {
    /// The task with its column, position and display fields
    fn describe(&self, ctx: &BoardStore) -> Result<Value> {
        let task = ctx.get_task(self.task)?;
        let (column, position) = ctx
            .state()
            .locate(task.id)
            .ok_or_else(|| BoardError::TaskNotFound {
                id: task.id.to_string(),
            })?;

        let mut value = serde_json::to_value(task)?;
        value["column"] = serde_json::json!(column);
        value["position"] = serde_json::json!(position);
        value["color"] = serde_json::json!(task.tag.color());
        value["dueDateDisplay"] = serde_json::json!(task.due_date_display());
        Ok(value)
    }
}

impl Execute<BoardStore, BoardError> for GetTask {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        self.describe(ctx).into()
    }
}

//! AddTask command

use crate::error::BoardError;
use crate::operation::{logged, Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use crate::types::TaskDraft;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Add a new task to the end of "To Do"
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AddTask {
    /// Title, assignee, tag and the optional fields
    pub draft: TaskDraft,
}

impl AddTask {
    /// Create a new AddTask command
    pub fn new(draft: TaskDraft) -> Self {
        Self { draft }
    }
}

impl From<TaskDraft> for AddTask {
    fn from(draft: TaskDraft) -> Self {
        Self::new(draft)
    }
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "task"
    }

    fn description(&self) -> &'static str {
        "Create a new task in the To Do column"
    }
}

impl Execute<BoardStore, BoardError> for AddTask {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result = ctx
            .add_task(self.draft.clone())
            .and_then(|task| Ok(serde_json::to_value(&task)?));
        logged(self, start, result)
    }
}

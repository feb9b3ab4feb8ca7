//! FilterTasks command

use crate::error::BoardError;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Show only the tasks assigned to one person, per column
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTasks {
    /// Team member to filter by
    pub assignee: String,
}

impl FilterTasks {
    /// Create a new FilterTasks command
    pub fn new(assignee: impl Into<String>) -> Self {
        Self {
            assignee: assignee.into(),
        }
    }
}

impl Operation for FilterTasks {
    fn verb(&self) -> &'static str {
        "filter"
    }

    fn noun(&self) -> &'static str {
        "tasks"
    }

    fn description(&self) -> &'static str {
        "List each column's tasks assigned to one team member"
    }
}

impl Execute<BoardStore, BoardError> for FilterTasks {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let filtered = ctx.filter_by_assignee(&self.assignee);
        serde_json::to_value(&filtered)
            .map_err(BoardError::from)
            .into()
    }
}

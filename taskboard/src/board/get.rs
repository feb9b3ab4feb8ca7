//! GetBoard command

use crate::error::BoardError;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get the whole board: every column with its tasks, plus the roster
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GetBoard {}

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new() -> Self {
        Self::default()
    }
}

impl Operation for GetBoard {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "board"
    }

    fn description(&self) -> &'static str {
        "Get all columns with their tasks and the team roster"
    }
}

impl Execute<BoardStore, BoardError> for GetBoard {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let state = ctx.state();
        let columns: Vec<Value> = state
            .columns()
            .map(|(name, tasks)| {
                serde_json::json!({
                    "name": name,
                    "task_count": tasks.len(),
                    "tasks": tasks,
                })
            })
            .collect();

        ExecutionResult::Unlogged {
            value: serde_json::json!({
                "columns": columns,
                "team_members": ctx.roster(),
                "total_tasks": state.len(),
            }),
        }
    }
}

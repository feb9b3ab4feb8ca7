//! ResetBoard command

use crate::error::BoardError;
use crate::operation::{logged, Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Empty all three columns
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ResetBoard {}

impl ResetBoard {
    /// Create a new ResetBoard command
    pub fn new() -> Self {
        Self::default()
    }
}

impl Operation for ResetBoard {
    fn verb(&self) -> &'static str {
        "reset"
    }

    fn noun(&self) -> &'static str {
        "board"
    }

    fn description(&self) -> &'static str {
        "Remove every task from the board"
    }
}

impl Execute<BoardStore, BoardError> for ResetBoard {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let removed = ctx.state().len();
        let result = ctx
            .reset()
            .map(|()| serde_json::json!({ "reset": true, "removed": removed }));
        logged(self, start, result)
    }
}

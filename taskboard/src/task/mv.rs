//! MoveTask command

use crate::error::BoardError;
use crate::operation::{logged, Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use crate::types::{ColumnName, TaskId, TaskRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Move a task to the end of another column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task to move, by id or by position
    pub task: TaskRef,
    /// Destination column
    pub to: ColumnName,
}

impl MoveTask {
    /// Create a new MoveTask command
    pub fn new(task: impl Into<TaskRef>, to: ColumnName) -> Self {
        Self {
            task: task.into(),
            to,
        }
    }

    /// Move the task with `id` to `column`
    pub fn to_column(id: impl Into<TaskId>, column: ColumnName) -> Self {
        Self::new(id.into(), column)
    }

    /// Move the task at `index` in `from` to `to`
    pub fn at(from: ColumnName, index: usize, to: ColumnName) -> Self {
        Self::new(TaskRef::at(from, index), to)
    }
}

impl Operation for MoveTask {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "task"
    }

    fn description(&self) -> &'static str {
        "Move a task to the end of a column"
    }
}

impl Execute<BoardStore, BoardError> for MoveTask {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let result = ctx
            .move_task(self.task, self.to)
            .and_then(|state| Ok(serde_json::to_value(state)?));
        logged(self, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::storage::MemoryStorage;
    use crate::types::{Priority, TaskDraft};

    fn setup() -> (BoardStore, TaskId) {
        let mut store = BoardStore::initialize(MemoryStorage::new(), &BoardConfig::default());
        let task = store
            .add_task(
                TaskDraft::new("Task")
                    .assigned_to("Andrea")
                    .with_tag(Priority::Urgent),
            )
            .unwrap();
        (store, task.id)
    }

    #[test]
    fn test_move_task_to_column() {
        let (mut store, id) = setup();

        let result = MoveTask::to_column(id, ColumnName::Done)
            .execute(&mut store)
            .into_result()
            .unwrap();

        assert_eq!(result["To Do"].as_array().unwrap().len(), 0);
        assert_eq!(result["Done"][0]["id"], id.get());
    }

    #[test]
    fn test_move_task_by_position_from_json() {
        let (mut store, id) = setup();
        let cmd: MoveTask =
            serde_json::from_str(r#"{"task":{"column":"To Do","index":0},"to":"In Progress"}"#)
                .unwrap();

        cmd.execute(&mut store).into_result().unwrap();
        assert_eq!(store.state().in_progress[0].id, id);
    }

    #[test]
    fn test_move_task_invalid_index() {
        let (mut store, _id) = setup();

        let result = MoveTask::at(ColumnName::ToDo, 4, ColumnName::Done)
            .execute(&mut store)
            .into_result();

        assert!(matches!(result, Err(BoardError::IndexOutOfRange { index: 4, .. })));
    }
}

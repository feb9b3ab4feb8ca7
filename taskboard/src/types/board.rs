//! Board state: the three fixed columns and their tasks

use super::column::ColumnName;
use super::ids::TaskId;
use super::task::Task;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete snapshot of all columns and their tasks.
///
/// Serialized as a JSON object keyed by column name. All three columns are
/// required on read, so a blob missing one is rejected as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(rename = "To Do")]
    pub todo: Vec<Task>,
    #[serde(rename = "In Progress")]
    pub in_progress: Vec<Task>,
    #[serde(rename = "Done")]
    pub done: Vec<Task>,
}

impl BoardState {
    /// The canonical empty board
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse persisted JSON, enforcing the column set and id uniqueness
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self =
            serde_json::from_str(json).map_err(|e| BoardError::malformed(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that no task id appears twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for task in self.tasks() {
            if !seen.insert(task.id) {
                return Err(BoardError::malformed(format!("duplicate task id {}", task.id)));
            }
        }
        Ok(())
    }

    /// Tasks of one column, in display order
    pub fn column(&self, column: ColumnName) -> &[Task] {
        match column {
            ColumnName::ToDo => &self.todo,
            ColumnName::InProgress => &self.in_progress,
            ColumnName::Done => &self.done,
        }
    }

    /// Tasks of one column (mutable)
    pub fn column_mut(&mut self, column: ColumnName) -> &mut Vec<Task> {
        match column {
            ColumnName::ToDo => &mut self.todo,
            ColumnName::InProgress => &mut self.in_progress,
            ColumnName::Done => &mut self.done,
        }
    }

    /// Columns with their tasks, in display order
    pub fn columns(&self) -> impl Iterator<Item = (ColumnName, &[Task])> {
        ColumnName::ALL.into_iter().map(move |c| (c, self.column(c)))
    }

    /// All tasks: column order, then insertion order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.todo.iter().chain(&self.in_progress).chain(&self.done)
    }

    /// Total number of tasks
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Check if the board has no tasks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find which column holds a task and at what index
    pub fn locate(&self, id: TaskId) -> Option<(ColumnName, usize)> {
        self.columns().find_map(|(column, tasks)| {
            tasks.iter().position(|t| t.id == id).map(|i| (column, i))
        })
    }

    /// Find a task by id
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks().find(|t| t.id == id)
    }

    /// Check if a task id is on the board
    pub fn contains(&self, id: TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Highest task id on the board
    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks().map(|t| t.id).max()
    }

    /// Projection keeping, per column, only tasks assigned to `name`
    pub fn filter_by_assignee(&self, name: &str) -> Self {
        let keep = |tasks: &[Task]| -> Vec<Task> {
            tasks.iter().filter(|t| t.assigned_to == name).cloned().collect()
        };
        Self {
            todo: keep(&self.todo),
            in_progress: keep(&self.in_progress),
            done: keep(&self.done),
        }
    }
}

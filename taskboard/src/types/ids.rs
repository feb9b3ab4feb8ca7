//! Task identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable identifier of a task.
///
/// Serialized as a plain JSON number: a millisecond timestamp taken when the
/// task was created, bumped forward when two tasks are created in the same
/// millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wrap a raw id value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw id value
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Next id after `last`, never behind the wall clock.
    pub fn next_after(last: Option<TaskId>) -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        match last {
            Some(TaskId(last)) => Self(now.max(last.saturating_add(1))),
            None => Self(now),
        }
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Core types for the task board

mod board;
mod column;
mod ids;
mod log;
mod priority;
mod roster;
mod task;
mod timeline;

// Re-export all types
pub use board::BoardState;
pub use column::ColumnName;
pub use ids::TaskId;
pub use log::LogEntry;
pub use priority::Priority;
pub use roster::Roster;
pub use task::{due_date, Task, TaskDraft, TaskPatch, TaskRef};
pub use timeline::{TimelineDay, WeekTimeline};

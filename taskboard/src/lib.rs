//! Kanban task board with pluggable persistence
//!
//! A single board with three fixed columns (`To Do`, `In Progress`, `Done`).
//! Tasks carry a title, an assignee from the team roster, an optional due
//! date, a description and a priority tag. The whole board is saved as one
//! JSON blob under a storage key after every mutation.
//!
//! ## Overview
//!
//! - **One store = one board** - [`BoardStore`] owns the state and its storage
//! - **Fail-open loading** - missing or malformed saved data yields an empty board
//! - **Commands** - serde-deserializable structs in [`task`] and [`board`]
//! - **Activity log** - [`BoardOperationProcessor`] records mutating commands
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{task::AddTask, types::{Priority, TaskDraft}};
//! use taskboard::{BoardConfig, BoardOperationProcessor, BoardStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load(".")?;
//! let mut store = BoardStore::open(&config)?;
//! let processor = BoardOperationProcessor::with_actor("nicola");
//!
//! let result = processor.process(
//!     &AddTask::new(
//!         TaskDraft::new("Write report")
//!             .assigned_to("Nicola")
//!             .with_tag(Priority::Normal),
//!     ),
//!     &mut store,
//! )?;
//!
//! println!("Created task: {}", result["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Layout
//!
//! With [`FileStorage`]:
//!
//! ```text
//! <storage dir>/
//! ├── taskColumns.json     # Board blob: {"To Do":[...],"In Progress":[...],"Done":[...]}
//! ├── activity.jsonl       # Operation log, one entry per line
//! └── .lock                # Advisory lock held during writes
//! ```

pub mod board;
pub mod config;
mod error;
pub mod operation;
mod processor;
pub mod storage;
mod store;
pub mod task;
pub mod types;

pub use config::{BoardConfig, ConfigError};
pub use error::{BoardError, Result};
pub use operation::{Execute, ExecutionResult, Operation};
pub use processor::BoardOperationProcessor;
pub use storage::{BoardStorage, FileStorage, MemoryStorage, StorageLock};
pub use store::BoardStore;

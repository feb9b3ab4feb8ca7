//! Runs operations against a store and records them in the activity log

use crate::error::{BoardError, Result};
use crate::operation::{Execute, Operation};
use crate::store::BoardStore;
use serde_json::Value;
use tracing::{debug, warn};

/// Executes operations and writes their log entries to the store's activity log
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    /// Who the logged operations are attributed to
    actor: Option<String>,
}

impl BoardOperationProcessor {
    /// Create a processor without actor attribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor that attributes operations to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    /// The attributed actor, if any
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Execute an operation, log it if it asks to be logged, return its result.
    ///
    /// A failure to write the activity log is reported as a warning and does
    /// not change the operation's result.
    pub fn process<O>(&self, op: &O, store: &mut BoardStore) -> Result<Value>
    where
        O: Execute<BoardStore, BoardError> + Operation,
    {
        let op_string = op.op_string();
        debug!(op = %op_string, actor = ?self.actor, "Processing operation");

        let (result, log_entry) = op.execute(store).split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            if let Err(e) = store.append_activity(&entry) {
                warn!(op = %op_string, error = %e, "Failed to write activity log");
            }
        }

        if let Err(e) = &result {
            debug!(op = %op_string, error = %e, "Operation failed");
        }
        result
    }
}

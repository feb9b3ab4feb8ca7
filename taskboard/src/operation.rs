//! Operations: command structs whose fields are their parameters
//!
//! Each command implements [`Operation`] for its metadata and [`Execute`]
//! against the [`BoardStore`](crate::BoardStore). Mutating commands return
//! [`ExecutionResult::Logged`] so the processor can record them; reads return
//! [`ExecutionResult::Unlogged`].

use crate::types::LogEntry;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;

/// Metadata every command carries
pub trait Operation {
    /// Verb, e.g. "add"
    fn verb(&self) -> &'static str;

    /// Noun, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "add task"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run a command against a context
pub trait Execute<C, E> {
    fn execute(&self, ctx: &mut C) -> ExecutionResult<Value, E>;
}

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

impl<T, E> From<Result<T, E>> for ExecutionResult<T, E> {
    /// Read-only outcome: success is unlogged, failure carries no entry
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

/// Wrap the outcome of a mutating operation with its log entry
pub(crate) fn logged<O, E>(op: &O, started: Instant, result: Result<Value, E>) -> ExecutionResult<Value, E>
where
    O: Operation + Serialize,
    E: Display,
{
    let input = serde_json::to_value(op).unwrap_or(Value::Null);
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::success(op.op_string(), input, value.clone(), duration_ms),
            value,
        },
        Err(error) => ExecutionResult::Failed {
            log_entry: Some(LogEntry::failure(
                op.op_string(),
                input,
                &error.to_string(),
                duration_ms,
            )),
            error,
        },
    }
}

//! GetTimeline command

use crate::error::BoardError;
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::store::BoardStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tasks grouped by due date over one week
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GetTimeline {
    /// Any day in the week to show; today (local time) when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl GetTimeline {
    /// Create a new GetTimeline command for the current week
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the week containing `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }
}

impl Operation for GetTimeline {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "timeline"
    }

    fn description(&self) -> &'static str {
        "Get the week's tasks grouped by due date"
    }
}

impl Execute<BoardStore, BoardError> for GetTimeline {
    fn execute(&self, ctx: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
        let today = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        ctx.week_timeline(today)
            .and_then(|timeline| Ok(serde_json::to_value(&timeline)?))
            .into()
    }
}

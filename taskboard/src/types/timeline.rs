//! Weekly timeline: tasks grouped by due date over one week

use super::board::BoardState;
use super::task::Task;
use crate::error::{BoardError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One day of the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub tasks: Vec<Task>,
}

/// Seven consecutive days starting on the week start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTimeline {
    pub week_start: NaiveDate,
    pub days: Vec<TimelineDay>,
}

impl WeekTimeline {
    /// Number of days shown
    pub const DAYS: usize = 7;

    /// Build the timeline for the week containing `today`.
    ///
    /// Fails when that week runs past either end of the calendar.
    pub fn build(state: &BoardState, today: NaiveDate, week_starts_on: Weekday) -> Result<Self> {
        let week_start = start_of_week(today, week_starts_on)
            .filter(|start| start.checked_add_signed(Duration::days(Self::DAYS as i64 - 1)).is_some())
            .ok_or_else(|| {
                BoardError::invalid_value(
                    "date",
                    format!("the week of {today} is outside the supported date range"),
                )
            })?;
        let days = (0..Self::DAYS as i64)
            .filter_map(|offset| week_start.checked_add_signed(Duration::days(offset)))
            .map(|date| TimelineDay {
                date,
                weekday: date.weekday(),
                tasks: state.tasks().filter(|t| t.is_due_on(date)).cloned().collect(),
            })
            .collect();
        Ok(Self { week_start, days })
    }

    /// Tasks due on a given day, if it is in this week
    pub fn day(&self, date: NaiveDate) -> Option<&TimelineDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Number of tasks due this week
    pub fn task_count(&self) -> usize {
        self.days.iter().map(|d| d.tasks.len()).sum()
    }
}

/// First day of the week containing `date`
fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> Option<NaiveDate> {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_starts_on.num_days_from_monday())
        % 7;
    date.checked_sub_signed(Duration::days(i64::from(offset)))
}

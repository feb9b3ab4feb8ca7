//! Priority labels attached to tasks

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority tag of a task.
///
/// Stored with the board's original labels; the English labels are accepted
/// on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Urgente", alias = "Urgent")]
    Urgent,
    #[serde(rename = "Normale", alias = "Normal")]
    Normal,
    #[serde(rename = "Bassa Priorità", alias = "Low Priority")]
    LowPriority,
}

impl Priority {
    /// All priorities, most pressing first
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Normal, Priority::LowPriority];

    /// The stored label
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgente",
            Self::Normal => "Normale",
            Self::LowPriority => "Bassa Priorità",
        }
    }

    /// English label
    pub fn english_label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Normal => "Normal",
            Self::LowPriority => "Low Priority",
        }
    }

    /// Badge color name
    pub fn color(self) -> &'static str {
        match self {
            Self::Urgent => "red",
            Self::Normal => "yellow",
            Self::LowPriority => "green",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s) || p.english_label().eq_ignore_ascii_case(s))
            .ok_or_else(|| BoardError::invalid_value("tag", format!("unknown priority '{s}'")))
    }
}

//! Team members tasks can be assigned to

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// The fixed set of team members a task can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    /// Create a roster from names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Names in roster order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Check if a name is on the roster
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Validate an assignee: present, non-blank and on the roster.
    pub fn check(&self, assignee: Option<&str>) -> Result<String> {
        let name = match assignee.map(str::trim) {
            None | Some("") => return Err(BoardError::missing_field("assignedTo")),
            Some(name) => name,
        };
        if !self.contains(name) {
            return Err(BoardError::invalid_value(
                "assignedTo",
                format!("'{name}' is not a team member"),
            ));
        }
        Ok(name.to_string())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(["Nicola", "Andrea", "Mirko", "Georgina"])
    }
}

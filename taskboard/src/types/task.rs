//! Task types: Task, TaskDraft, TaskPatch, TaskRef

use super::column::ColumnName;
use super::ids::TaskId;
use super::priority::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub assigned_to: String,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub tag: Priority,
}

impl Task {
    /// Create a task with the required fields
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        assigned_to: impl Into<String>,
        tag: Priority,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            assigned_to: assigned_to.into(),
            due_date: None,
            description: String::new(),
            tag,
        }
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Due date as shown on a card (`dd/mm/yyyy`)
    pub fn due_date_display(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%d/%m/%Y").to_string())
    }

    /// Check if the task is due on the given day
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due_date == Some(day)
    }

    /// Replace the fields carried by `patch`. The id never changes.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(assignee) = &patch.assigned_to {
            self.assigned_to = assignee.trim().to_string();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(tag) = patch.tag {
            self.tag = tag;
        }
    }
}

/// Input for creating a task.
///
/// Everything except the title may be unset so the store can reject
/// incomplete input instead of the type system hiding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Priority>,
}

impl TaskDraft {
    /// Create a draft with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the assignee
    pub fn assigned_to(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = Some(name.into());
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority tag
    pub fn with_tag(mut self, tag: Priority) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Partial update of a task's mutable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// None = don't change, Some(None) = clear, Some(Some(d)) = set
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "due_date::patch"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Priority>,
}

impl TaskPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = Some(name.into());
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority tag
    pub fn with_tag(mut self, tag: Priority) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Check if the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.assigned_to.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
            && self.tag.is_none()
    }
}

/// Addresses a task either by id or by its position in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskRef {
    Id { id: TaskId },
    Position { column: ColumnName, index: usize },
}

impl TaskRef {
    /// Address the task at `index` in `column`
    pub fn at(column: ColumnName, index: usize) -> Self {
        Self::Position { column, index }
    }
}

impl From<TaskId> for TaskRef {
    fn from(id: TaskId) -> Self {
        Self::Id { id }
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { id } => write!(f, "{id}"),
            Self::Position { column, index } => write!(f, "{column}[{index}]"),
        }
    }
}

/// Serde for due dates: ISO `YYYY-MM-DD`, with the empty string meaning none.
pub mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        parse(raw.as_deref()).map_err(serde::de::Error::custom)
    }

    /// Parse an optional date string; blank means none
    pub fn parse(raw: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT).map(Some),
        }
    }

    /// Variant for patches, where a present field always means "change it"
    pub mod patch {
        use chrono::NaiveDate;
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<Option<NaiveDate>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            super::serialize(&date.unwrap_or(None), s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<Option<NaiveDate>>, D::Error> {
            super::deserialize(d).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_wire_shape() {
        let task = Task::new(TaskId::new(1700000000000), "Write report", "Nicola", Priority::Normal)
            .with_due_date(date(2024, 6, 3));
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], 1700000000000u64);
        assert_eq!(value["assignedTo"], "Nicola");
        assert_eq!(value["dueDate"], "2024-06-03");
        assert_eq!(value["description"], "");
        assert_eq!(value["tag"], "Normale");
    }

    #[test]
    fn test_task_empty_due_date() {
        let json = r#"{"id":1,"title":"T","assignedTo":"Mirko","dueDate":"","description":"","tag":"Urgente"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.due_date.is_none());

        // Older drafts stored tasks without description or dueDate
        let json = r#"{"id":2,"title":"T","assignedTo":"Mirko","tag":"Urgente"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.description.is_empty());
        assert!(task.due_date.is_none());

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["dueDate"], "");
    }

    #[test]
    fn test_task_bad_due_date() {
        let json = r#"{"id":1,"title":"T","assignedTo":"Mirko","dueDate":"03/06/2024","tag":"Urgente"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_due_date_display() {
        let task = Task::new(TaskId::new(1), "T", "Andrea", Priority::Urgent)
            .with_due_date(date(2024, 1, 9));
        assert_eq!(task.due_date_display().as_deref(), Some("09/01/2024"));
        assert!(task.is_due_on(date(2024, 1, 9)));
        assert!(!task.is_due_on(date(2024, 1, 10)));
    }

    #[test]
    fn test_apply_patch_keeps_id() {
        let mut task = Task::new(TaskId::new(5), "Old", "Andrea", Priority::Urgent)
            .with_due_date(date(2024, 1, 9))
            .with_description("keep me");
        let patch = TaskPatch::new()
            .with_title("New")
            .with_due_date(None)
            .with_tag(Priority::LowPriority);

        task.apply(&patch);

        assert_eq!(task.id, TaskId::new(5));
        assert_eq!(task.title, "New");
        assert_eq!(task.assigned_to, "Andrea");
        assert!(task.due_date.is_none());
        assert_eq!(task.description, "keep me");
        assert_eq!(task.tag, Priority::LowPriority);
    }

    #[test]
    fn test_patch_due_date_forms() {
        let patch: TaskPatch = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(patch.due_date, None);

        let patch: TaskPatch = serde_json::from_str(r#"{"dueDate":""}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));

        let patch: TaskPatch = serde_json::from_str(r#"{"dueDate":"2024-02-29"}"#).unwrap();
        assert_eq!(patch.due_date, Some(Some(date(2024, 2, 29))));
        assert!(!patch.is_empty());
        assert!(TaskPatch::new().is_empty());
    }

    #[test]
    fn test_draft_from_json() {
        let draft: TaskDraft = serde_json::from_str(
            r#"{"title":"Write report","assignedTo":"Nicola","dueDate":"","description":"","tag":"Normale"}"#,
        )
        .unwrap();
        assert_eq!(draft.assigned_to.as_deref(), Some("Nicola"));
        assert_eq!(draft.tag, Some(Priority::Normal));
        assert!(draft.due_date.is_none());

        let draft: TaskDraft = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(draft.assigned_to.is_none());
        assert!(draft.tag.is_none());
    }

    #[test]
    fn test_task_ref_forms() {
        let by_id: TaskRef = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(by_id, TaskRef::from(TaskId::new(42)));

        let by_pos: TaskRef = serde_json::from_str(r#"{"column": "Done", "index": 1}"#).unwrap();
        assert_eq!(by_pos, TaskRef::at(ColumnName::Done, 1));
        assert_eq!(by_pos.to_string(), "Done[1]");
    }
}

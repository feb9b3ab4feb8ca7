//! BoardStore - owns the board state and persists it after every mutation

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::storage::{BoardStorage, FileStorage};
use crate::types::{
    BoardState, ColumnName, LogEntry, Priority, Roster, Task, TaskDraft, TaskId, TaskPatch,
    TaskRef, WeekTimeline,
};
use chrono::{NaiveDate, Weekday};
use tracing::{debug, info, warn};

/// The board store.
///
/// Operations are synchronous and run to completion on the caller's thread.
/// Every successful mutation writes the whole state back to storage.
pub struct BoardStore {
    state: BoardState,
    storage: Box<dyn BoardStorage>,
    key: String,
    roster: Roster,
    week_start: Weekday,
    last_id: Option<TaskId>,
}

impl BoardStore {
    /// Load the board from `storage`, falling back to an empty board.
    ///
    /// Missing, unreadable or malformed data never fails initialization.
    pub fn initialize(storage: impl BoardStorage + 'static, config: &BoardConfig) -> Self {
        let mut store = Self {
            state: BoardState::empty(),
            storage: Box::new(storage),
            key: config.storage_key.clone(),
            roster: config.team_members.clone(),
            week_start: config.week_start,
            last_id: None,
        };
        store.state = store.load_or_empty();
        store.last_id = store.state.max_id();
        info!(
            key = %store.key,
            tasks = store.state.len(),
            "Board store initialized"
        );
        store
    }

    /// Open a file-backed board in the configured storage directory
    pub fn open(config: &BoardConfig) -> Result<Self> {
        let storage = FileStorage::new(config.resolved_storage_dir()?);
        storage.value_path(&config.storage_key)?;
        storage.ensure_directory()?;
        Ok(Self::initialize(storage, config))
    }

    fn load_or_empty(&self) -> BoardState {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No saved board, starting empty");
                return BoardState::empty();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read saved board, starting empty");
                return BoardState::empty();
            }
        };

        match BoardState::from_json(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Saved board is malformed, starting empty");
                BoardState::empty()
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current board state
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Team members tasks can be assigned to
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Underlying storage
    pub fn storage(&self) -> &dyn BoardStorage {
        self.storage.as_ref()
    }

    /// Storage key the board is saved under
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current state to storage
    pub fn persist(&self) -> Result<()> {
        let json = self.state.to_json()?;
        self.storage.write(&self.key, &json)?;
        debug!(key = %self.key, tasks = self.state.len(), "Board persisted");
        Ok(())
    }

    /// Discard in-memory state and re-read storage
    pub fn reload(&mut self) -> Result<()> {
        self.state = self.load_or_empty();
        self.last_id = self.last_id.max(self.state.max_id());
        Ok(())
    }

    /// Replace the board with three empty columns
    pub fn reset(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.state);
        info!("Board reset");
        self.commit(previous)
    }

    /// Persist the current state. On failure the state goes back to
    /// `previous`, so a failed mutation leaves no trace.
    fn commit(&mut self, previous: BoardState) -> Result<()> {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Save failed, rolling back");
            self.state = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Record an operation in the activity log
    pub fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.storage.append_activity(entry)
    }

    /// Read the activity log, newest first
    pub fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.storage.read_activity(limit)
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Create a task at the end of "To Do".
    ///
    /// Rejects a blank title, an unset or unknown assignee, and an unset tag
    /// without touching the board.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = check_title(&draft.title)?;
        let assignee = self.roster.check(draft.assigned_to.as_deref())?;
        let tag: Priority = draft.tag.ok_or_else(|| BoardError::missing_field("tag"))?;

        let id = TaskId::next_after(self.last_id);
        let task = Task {
            id,
            title,
            assigned_to: assignee,
            due_date: draft.due_date,
            description: draft.description.unwrap_or_default(),
            tag,
        };

        let previous = self.state.clone();
        self.state.todo.push(task.clone());
        self.last_id = Some(id);
        info!(id = %id, title = %task.title, "Task added");

        self.commit(previous)?;
        Ok(task)
    }

    /// Look up a task
    pub fn get_task(&self, target: impl Into<TaskRef>) -> Result<&Task> {
        let (column, index) = self.resolve(target.into())?;
        Ok(&self.state.column(column)[index])
    }

    /// Move a task to the end of `to`. Moving within a column re-appends it.
    pub fn move_task(&mut self, target: impl Into<TaskRef>, to: ColumnName) -> Result<&BoardState> {
        let (from, index) = self.resolve(target.into())?;
        let previous = self.state.clone();
        let task = self.state.column_mut(from).remove(index);
        info!(id = %task.id, %from, %to, "Task moved");
        self.state.column_mut(to).push(task);

        self.commit(previous)?;
        Ok(&self.state)
    }

    /// Positional form of [`move_task`](Self::move_task)
    pub fn move_task_at(
        &mut self,
        from: ColumnName,
        to: ColumnName,
        index: usize,
    ) -> Result<&BoardState> {
        self.move_task(TaskRef::at(from, index), to)
    }

    /// Remove a task from the board
    pub fn delete_task(&mut self, target: impl Into<TaskRef>) -> Result<Task> {
        let (column, index) = self.resolve(target.into())?;
        let previous = self.state.clone();
        let task = self.state.column_mut(column).remove(index);
        info!(id = %task.id, %column, "Task deleted");

        self.commit(previous)?;
        Ok(task)
    }

    /// Positional form of [`delete_task`](Self::delete_task)
    pub fn delete_task_at(&mut self, column: ColumnName, index: usize) -> Result<Task> {
        self.delete_task(TaskRef::at(column, index))
    }

    /// Replace the fields carried by `patch`; the id never changes.
    ///
    /// A patch may not blank out the title or assign someone off the roster.
    pub fn edit_task(&mut self, target: impl Into<TaskRef>, patch: &TaskPatch) -> Result<Task> {
        let (column, index) = self.resolve(target.into())?;
        if let Some(title) = &patch.title {
            check_title(title)?;
        }
        if let Some(assignee) = &patch.assigned_to {
            self.roster.check(Some(assignee))?;
        }

        let previous = self.state.clone();
        let task = &mut self.state.column_mut(column)[index];
        task.apply(patch);
        let task = task.clone();
        info!(id = %task.id, %column, "Task edited");

        self.commit(previous)?;
        Ok(task)
    }

    /// Positional form of [`edit_task`](Self::edit_task)
    pub fn edit_task_at(
        &mut self,
        column: ColumnName,
        index: usize,
        patch: &TaskPatch,
    ) -> Result<Task> {
        self.edit_task(TaskRef::at(column, index), patch)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Per column, only the tasks assigned to `name`. The board is unchanged.
    pub fn filter_by_assignee(&self, name: &str) -> BoardState {
        self.state.filter_by_assignee(name.trim())
    }

    /// Tasks grouped by due date over the week containing `today`
    pub fn week_timeline(&self, today: NaiveDate) -> Result<WeekTimeline> {
        WeekTimeline::build(&self.state, today, self.week_start)
    }

    /// Turn a task address into a (column, index) pair that is in bounds
    fn resolve(&self, target: TaskRef) -> Result<(ColumnName, usize)> {
        match target {
            TaskRef::Id { id } => self
                .state
                .locate(id)
                .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() }),
            TaskRef::Position { column, index } => {
                let len = self.state.column(column).len();
                if index < len {
                    Ok((column, index))
                } else {
                    Err(BoardError::IndexOutOfRange { column, index, len })
                }
            }
        }
    }
}

fn check_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::missing_field("title"));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn setup() -> (MemoryStorage, BoardStore) {
        let storage = MemoryStorage::new();
        let store = BoardStore::initialize(storage.clone(), &BoardConfig::default());
        (storage, store)
    }

    fn draft(title: &str, assignee: &str) -> TaskDraft {
        TaskDraft::new(title)
            .assigned_to(assignee)
            .with_tag(Priority::Normal)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn test_initialize_empty() {
        let (storage, store) = setup();
        assert!(store.state().is_empty());
        // Nothing is written until the first mutation
        assert_eq!(storage.read("taskColumns").unwrap(), None);
    }

    #[test_log::test]
    fn test_initialize_malformed_falls_back() {
        for raw in ["{not json", "[]", r#"{"To Do":[]}"#, "null"] {
            let storage = MemoryStorage::with_value("taskColumns", raw);
            let store = BoardStore::initialize(storage, &BoardConfig::default());
            assert_eq!(store.state(), &BoardState::empty(), "input: {raw}");
        }
    }

    #[test]
    fn test_add_task_appends_to_todo() {
        let (storage, mut store) = setup();

        let first = store.add_task(draft("Write report", "Nicola")).unwrap();
        let second = store.add_task(draft("Review", "Andrea")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.state().todo.len(), 2);
        assert_eq!(store.state().todo[1].id, second.id);
        assert!(storage.read("taskColumns").unwrap().unwrap().contains("Review"));
    }

    #[test]
    fn test_add_task_fields() {
        let (_storage, mut store) = setup();
        let task = store
            .add_task(
                TaskDraft::new("Plan sprint")
                    .assigned_to("Georgina")
                    .with_tag(Priority::Urgent)
                    .with_due_date(date(2024, 6, 5))
                    .with_description("two weeks"),
            )
            .unwrap();

        assert_eq!(task.assigned_to, "Georgina");
        assert_eq!(task.tag, Priority::Urgent);
        assert_eq!(task.due_date, Some(date(2024, 6, 5)));
        assert_eq!(task.description, "two weeks");
    }

    #[test]
    fn test_add_task_rejections_leave_state_unchanged() {
        let (storage, mut store) = setup();
        store.add_task(draft("Existing", "Mirko")).unwrap();
        let before = store.state().clone();
        let saved = storage.read("taskColumns").unwrap();

        let cases = [
            TaskDraft::new("   ").assigned_to("Nicola").with_tag(Priority::Normal),
            TaskDraft::new("No assignee").with_tag(Priority::Normal),
            TaskDraft::new("No tag").assigned_to("Nicola"),
            TaskDraft::new("Stranger")
                .assigned_to("Mallory")
                .with_tag(Priority::LowPriority),
        ];
        for case in cases {
            let err = store.add_task(case).unwrap_err();
            assert!(err.is_validation(), "unexpected error: {err}");
        }

        assert_eq!(store.state(), &before);
        assert_eq!(storage.read("taskColumns").unwrap(), saved);
    }

    #[test]
    fn test_ids_unique_after_reload() {
        let storage = MemoryStorage::new();
        let mut store = BoardStore::initialize(storage.clone(), &BoardConfig::default());
        let first = store.add_task(draft("One", "Nicola")).unwrap();

        let mut reopened = BoardStore::initialize(storage, &BoardConfig::default());
        let second = reopened.add_task(draft("Two", "Nicola")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_move_task_by_id_and_position() {
        let (_storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();
        let b = store.add_task(draft("B", "Andrea")).unwrap();

        store.move_task(b.id, ColumnName::InProgress).unwrap();
        assert_eq!(store.state().in_progress[0].id, b.id);

        let state = store
            .move_task_at(ColumnName::ToDo, ColumnName::InProgress, 0)
            .unwrap();
        assert!(state.todo.is_empty());
        let ids: Vec<_> = state.in_progress.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_move_within_column_goes_last() {
        let (_storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();
        let b = store.add_task(draft("B", "Nicola")).unwrap();

        store.move_task_at(ColumnName::ToDo, ColumnName::ToDo, 0).unwrap();
        let ids: Vec<_> = store.state().todo.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_index_out_of_range() {
        let (storage, mut store) = setup();
        store.add_task(draft("A", "Nicola")).unwrap();
        let saved = storage.read("taskColumns").unwrap();

        let err = store
            .move_task_at(ColumnName::ToDo, ColumnName::Done, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            BoardError::IndexOutOfRange { column: ColumnName::ToDo, index: 1, len: 1 }
        ));
        assert!(matches!(
            store.delete_task_at(ColumnName::Done, 0),
            Err(BoardError::IndexOutOfRange { len: 0, .. })
        ));
        assert!(matches!(
            store.edit_task_at(ColumnName::InProgress, 0, &TaskPatch::new()),
            Err(BoardError::IndexOutOfRange { .. })
        ));
        assert_eq!(store.state().todo.len(), 1);
        assert_eq!(storage.read("taskColumns").unwrap(), saved);
    }

    #[test]
    fn test_unknown_id() {
        let (_storage, mut store) = setup();
        let err = store.delete_task(TaskId::new(12)).unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { ref id } if id == "12"));
        assert!(store.get_task(TaskId::new(12)).is_err());
    }

    #[test]
    fn test_delete_task() {
        let (_storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();
        let b = store.add_task(draft("B", "Nicola")).unwrap();

        let removed = store.delete_task_at(ColumnName::ToDo, 0).unwrap();
        assert_eq!(removed.id, a.id);
        assert!(!store.state().contains(a.id));
        assert_eq!(store.get_task(TaskRef::at(ColumnName::ToDo, 0)).unwrap().id, b.id);
    }

    #[test]
    fn test_edit_task() {
        let (_storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();
        store.move_task(a.id, ColumnName::Done).unwrap();

        let edited = store
            .edit_task(
                a.id,
                &TaskPatch::new()
                    .with_title("A, revised")
                    .with_assignee("Mirko")
                    .with_due_date(Some(date(2024, 7, 1))),
            )
            .unwrap();

        assert_eq!(edited.id, a.id);
        assert_eq!(edited.title, "A, revised");
        assert_eq!(edited.tag, Priority::Normal);
        assert_eq!(store.state().done[0], edited);
    }

    #[test]
    fn test_edit_task_rejects_blank_title_and_stranger() {
        let (_storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();

        let err = store
            .edit_task(a.id, &TaskPatch::new().with_title(" "))
            .unwrap_err();
        assert!(err.is_validation());
        let err = store
            .edit_task(a.id, &TaskPatch::new().with_assignee("Mallory"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get_task(a.id).unwrap().title, "A");
    }

    #[test]
    fn test_filter_does_not_replace_state() {
        let (_storage, mut store) = setup();
        store.add_task(draft("A", "Nicola")).unwrap();
        store.add_task(draft("B", "Andrea")).unwrap();

        let filtered = store.filter_by_assignee("Andrea");
        assert_eq!(filtered.todo.len(), 1);
        assert_eq!(filtered.todo[0].title, "B");
        assert_eq!(store.state().todo.len(), 2);
    }

    #[test]
    fn test_reset_and_reload() {
        let (storage, mut store) = setup();
        store.add_task(draft("A", "Nicola")).unwrap();

        store.reset().unwrap();
        assert!(store.state().is_empty());
        assert_eq!(
            storage.read("taskColumns").unwrap().as_deref(),
            Some(r#"{"To Do":[],"In Progress":[],"Done":[]}"#)
        );

        storage.write("taskColumns", "garbage").unwrap();
        store.add_task(draft("B", "Nicola")).unwrap();
        storage.write("taskColumns", "garbage").unwrap();
        store.reload().unwrap();
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_week_timeline_uses_configured_start() {
        let config = BoardConfig {
            week_start: Weekday::Sun,
            ..BoardConfig::default()
        };
        let mut store = BoardStore::initialize(MemoryStorage::new(), &config);
        store
            .add_task(draft("Due", "Nicola").with_due_date(date(2024, 6, 2)))
            .unwrap();

        let timeline = store.week_timeline(date(2024, 6, 6)).unwrap();
        assert_eq!(timeline.week_start, date(2024, 6, 2));
        assert_eq!(timeline.days[0].tasks.len(), 1);
    }

    #[test]
    fn test_custom_key_and_roster() {
        let storage = MemoryStorage::new();
        let config = BoardConfig::default()
            .with_storage_key("team-b")
            .with_team_members(Roster::new(["Ada"]));
        let mut store = BoardStore::initialize(storage.clone(), &config);

        assert!(store.add_task(draft("x", "Nicola")).is_err());
        store.add_task(draft("x", "Ada")).unwrap();
        assert_eq!(store.key(), "team-b");
        assert!(storage.read("team-b").unwrap().is_some());
        assert!(storage.read("taskColumns").unwrap().is_none());
    }

    #[test]
    fn test_edit_task_persists() {
        let (storage, mut store) = setup();
        let a = store.add_task(draft("A", "Nicola")).unwrap();

        store
            .edit_task(
                a.id,
                &TaskPatch::new()
                    .with_description("now with details")
                    .with_due_date(Some(date(2024, 7, 1)))
                    .with_tag(Priority::Urgent),
            )
            .unwrap();

        let raw = storage.read("taskColumns").unwrap().unwrap();
        assert!(raw.contains("\"description\":\"now with details\""));
        assert!(raw.contains("\"dueDate\":\"2024-07-01\""));

        let reopened = BoardStore::initialize(storage, &BoardConfig::default());
        assert_eq!(reopened.state(), store.state());
        assert_eq!(reopened.get_task(a.id).unwrap().tag, Priority::Urgent);
    }

    /// Storage whose writes can be switched off
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: std::rc::Rc<std::cell::Cell<bool>>,
    }

    impl BoardStorage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            if self.failing.get() {
                return Err(BoardError::LockBusy);
            }
            self.inner.write(key, value)
        }

        fn append_activity(&self, entry: &LogEntry) -> Result<()> {
            self.inner.append_activity(entry)
        }

        fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
            self.inner.read_activity(limit)
        }
    }

    #[test_log::test]
    fn test_failed_save_rolls_back_every_mutation() {
        let storage = FlakyStorage::default();
        let mut store = BoardStore::initialize(storage.clone(), &BoardConfig::default());
        let a = store.add_task(draft("A", "Nicola")).unwrap();
        let before = store.state().clone();
        let saved = storage.read("taskColumns").unwrap();

        storage.failing.set(true);
        assert!(store.add_task(draft("B", "Andrea")).unwrap_err().is_retryable());
        assert!(store.move_task(a.id, ColumnName::Done).is_err());
        assert!(store
            .edit_task(a.id, &TaskPatch::new().with_title("Changed"))
            .is_err());
        assert!(store.delete_task(a.id).is_err());
        assert!(store.reset().is_err());

        assert_eq!(store.state(), &before);
        assert_eq!(storage.read("taskColumns").unwrap(), saved);

        // Retrying once the store is writable again adds exactly one task
        storage.failing.set(false);
        store.add_task(draft("B", "Andrea")).unwrap();
        assert_eq!(store.state().todo.len(), 2);
    }
}

//! Key-value storage for the board blob and its activity log
//!
//! Storage provides access, not logic: it reads and writes raw JSON under a
//! key. Parsing and the fall-back-to-empty rules live in the store.

use crate::error::{BoardError, Result};
use crate::types::LogEntry;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Persistence capability used by the board store
pub trait BoardStorage {
    /// Read the blob stored under `key`, `None` when nothing was saved yet
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Append an entry to the activity log
    fn append_activity(&self, entry: &LogEntry) -> Result<()>;

    /// Read activity log entries, newest first
    fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>>;
}

// =========================================================================
// In-memory storage
// =========================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    activity: Vec<LogEntry>,
}

/// In-memory storage. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage holding one pre-existing value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().values.insert(key.into(), value.into());
        storage
    }

    /// Remove a stored value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().values.remove(key)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BoardStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.lock().values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.lock().activity.push(entry.clone());
        Ok(())
    }

    fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let inner = self.lock();
        let limit = limit.unwrap_or(usize::MAX);
        Ok(inner.activity.iter().rev().take(limit).cloned().collect())
    }
}

// =========================================================================
// File storage
// =========================================================================

/// File-backed storage: one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding the value files
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// Keys map one-to-one onto file names, so only ASCII letters, digits,
    /// `-`, `_` and `.` are allowed, and a key may not start with `.`.
    pub fn value_path(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Path to the activity log
    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Create the storage directory. Idempotent.
    pub fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Try to acquire an exclusive lock (non-blocking)
    pub fn lock(&self) -> Result<StorageLock> {
        self.ensure_directory()?;
        let lock_path = self.lock_path();

        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StorageLock {
                file,
                path: lock_path,
            }),
            Err(_) => {
                warn!("Storage lock busy at {}", lock_path.display());
                Err(BoardError::LockBusy)
            }
        }
    }
}

impl BoardStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let _lock = self.lock()?;
        atomic_write(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.ensure_directory()?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.activity_path())?;

        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        // Reverse to get newest first
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }
}

/// RAII lock guard - releases on drop
pub struct StorageLock {
    file: fs::File,
    path: PathBuf,
}

impl StorageLock {
    /// Path of the locked file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Reject keys that are not usable verbatim as file names
fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(BoardError::missing_field("storage_key"));
    }
    if key.starts_with('.') {
        return Err(BoardError::invalid_value(
            "storage_key",
            format!("'{key}' must not start with '.'"),
        ));
    }
    if let Some(c) = key
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.'))
    {
        return Err(BoardError::invalid_value(
            "storage_key",
            format!("'{key}' contains '{c}'"),
        ));
    }
    Ok(())
}

/// Atomic write via temp file and rename
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path)?;

    Ok(())
}

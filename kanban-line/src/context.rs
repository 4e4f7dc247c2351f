//! KanbanContext - I/O primitives for kanban line storage
//!
//! The context provides access to storage and utilities. No business logic
//! methods, just data access primitives. Operations do all the work.
//!
//! Lines, columns and statuses are individual JSON files; saving assigns
//! identity where missing. `save_line` cascades to the line's attached
//! columns, and `delete_line` cascades to every column of the line.

use crate::error::{KanbanError, Result};
use crate::types::{Column, ColumnId, Line, LineId, LogEntry, Status, StatusId};
use fs2::FileExt;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Context passed to every operation - provides access, not logic
pub struct KanbanContext {
    /// Path to the .kanban directory
    root: PathBuf,
}

impl KanbanContext {
    /// Create a new context for the given .kanban directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the root .kanban directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the lines directory
    pub fn lines_dir(&self) -> PathBuf {
        self.root.join("lines")
    }

    /// Path to a line's JSON file
    pub fn line_path(&self, id: &LineId) -> PathBuf {
        self.lines_dir().join(format!("{}.json", id))
    }

    /// Path to the columns directory
    pub fn columns_dir(&self) -> PathBuf {
        self.root.join("columns")
    }

    /// Path to a column's JSON file
    pub fn column_path(&self, id: &ColumnId) -> PathBuf {
        self.columns_dir().join(format!("{}.json", id))
    }

    /// Path to the statuses directory
    pub fn statuses_dir(&self) -> PathBuf {
        self.root.join("statuses")
    }

    /// Path to a status's JSON file
    pub fn status_path(&self, id: &StatusId) -> PathBuf {
        self.statuses_dir().join(format!("{}.json", id))
    }

    /// Path to the activity directory
    pub fn activity_dir(&self) -> PathBuf {
        self.root.join("activity")
    }

    /// Path to the current activity log
    pub fn activity_path(&self) -> PathBuf {
        self.activity_dir().join("current.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if all required directories exist
    pub fn directories_exist(&self) -> bool {
        self.root.exists()
            && self.lines_dir().exists()
            && self.columns_dir().exists()
            && self.statuses_dir().exists()
            && self.activity_dir().exists()
    }

    /// Create the directory structure for the store
    ///
    /// This is idempotent - safe to call multiple times.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.lines_dir()).await?;
        fs::create_dir_all(self.columns_dir()).await?;
        fs::create_dir_all(self.statuses_dir()).await?;
        fs::create_dir_all(self.activity_dir()).await?;
        Ok(())
    }

    /// Ensure directories exist, creating them if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.directories_exist() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Line I/O
    // =========================================================================

    /// Read a line file
    pub async fn read_line(&self, id: &LineId) -> Result<Line> {
        let path = self.line_path(id);
        if !path.exists() {
            return Err(KanbanError::LineNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let line: Line = serde_json::from_str(&content)?;
        Ok(line)
    }

    /// Check if a line exists
    pub fn line_exists(&self, id: &LineId) -> bool {
        self.line_path(id).exists()
    }

    /// Save a line, cascading to its attached columns.
    ///
    /// Every column in the line's in-memory collection gets its back-reference
    /// fixed up and, where missing, an identity assigned, then is written to
    /// its own file. The line file itself carries only metadata.
    pub async fn save_line(&self, mut line: Line) -> Result<Line> {
        self.ensure_directories().await?;
        line.updated_at = chrono::Utc::now();

        for column in &mut line.columns {
            column.line = line.id.clone();
            if column.id.is_none() {
                column.id = Some(ColumnId::new());
            }
        }
        for column in &line.columns {
            let content = serde_json::to_string_pretty(column)?;
            atomic_write(&self.column_path(column.id.as_ref().unwrap()), content.as_bytes())
                .await?;
        }

        let content = serde_json::to_string_pretty(&line)?;
        atomic_write(&self.line_path(&line.id), content.as_bytes()).await?;
        Ok(line)
    }

    /// Delete a line and every column belonging to it
    pub async fn delete_line(&self, id: &LineId) -> Result<()> {
        let path = self.line_path(id);
        if !path.exists() {
            return Err(KanbanError::LineNotFound { id: id.to_string() });
        }

        for column in self.find_columns_by_line(id).await? {
            if let Some(column_id) = &column.id {
                self.delete_column_file(column_id).await?;
            }
        }
        fs::remove_file(&path).await?;
        Ok(())
    }

    /// List all line IDs by reading the lines directory
    pub async fn list_line_ids(&self) -> Result<Vec<LineId>> {
        Ok(self
            .list_json_stems(&self.lines_dir())
            .await?
            .into_iter()
            .map(LineId::from_string)
            .collect())
    }

    /// Read all lines
    pub async fn read_all_lines(&self) -> Result<Vec<Line>> {
        let ids = self.list_line_ids().await?;
        let mut lines = Vec::with_capacity(ids.len());

        for id in ids {
            lines.push(self.read_line(&id).await?);
        }

        Ok(lines)
    }

    // =========================================================================
    // Column I/O
    // =========================================================================

    /// Read a column file
    pub async fn read_column(&self, id: &ColumnId) -> Result<Column> {
        let path = self.column_path(id);
        if !path.exists() {
            return Err(KanbanError::ColumnNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let column: Column = serde_json::from_str(&content)?;
        Ok(column)
    }

    /// Save a column, assigning it an identity when it has none.
    ///
    /// Returns the persisted column.
    pub async fn save_column(&self, mut column: Column) -> Result<Column> {
        self.ensure_directories().await?;
        if column.id.is_none() {
            column.id = Some(ColumnId::new());
        }

        let content = serde_json::to_string_pretty(&column)?;
        atomic_write(&self.column_path(column.id.as_ref().unwrap()), content.as_bytes()).await?;
        Ok(column)
    }

    /// Delete a column file
    pub async fn delete_column_file(&self, id: &ColumnId) -> Result<()> {
        let path = self.column_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// List all column IDs by reading the columns directory
    pub async fn list_column_ids(&self) -> Result<Vec<ColumnId>> {
        Ok(self
            .list_json_stems(&self.columns_dir())
            .await?
            .into_iter()
            .map(ColumnId::from_string)
            .collect())
    }

    /// Read all columns
    pub async fn read_all_columns(&self) -> Result<Vec<Column>> {
        let ids = self.list_column_ids().await?;
        let mut columns = Vec::with_capacity(ids.len());

        for id in ids {
            columns.push(self.read_column(&id).await?);
        }

        Ok(columns)
    }

    /// Find the persisted columns of a line, in display order.
    ///
    /// Columns with a missing order sort last; ties break on name so the
    /// result is deterministic.
    pub async fn find_columns_by_line(&self, line: &LineId) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .read_all_columns()
            .await?
            .into_iter()
            .filter(|c| &c.line == line)
            .collect();

        columns.sort_by(|a, b| match (a.order, b.order) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });
        Ok(columns)
    }

    /// Find a column of a line by name, case-insensitively
    pub async fn find_column_by_line_and_name_ci(
        &self,
        line: &LineId,
        name: &str,
    ) -> Result<Option<Column>> {
        let name = name.trim();
        Ok(self
            .find_columns_by_line(line)
            .await?
            .into_iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name)))
    }

    /// Calculate the next display order within a line
    pub async fn next_order(&self, line: &LineId) -> Result<i32> {
        let columns = self.find_columns_by_line(line).await?;
        Ok(columns
            .iter()
            .filter_map(|c| c.order)
            .filter(|o| *o > 0)
            .max()
            .map(|o| o + 1)
            .unwrap_or(1))
    }

    // =========================================================================
    // Status I/O (read-only collaborator data; writes exist for seeding/tests)
    // =========================================================================

    /// Read a status file
    pub async fn read_status(&self, id: &StatusId) -> Result<Status> {
        let path = self.status_path(id);
        if !path.exists() {
            return Err(KanbanError::StatusNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let status: Status = serde_json::from_str(&content)?;
        Ok(status)
    }

    /// Write a status file
    pub async fn write_status(&self, status: &Status) -> Result<()> {
        self.ensure_directories().await?;
        let content = serde_json::to_string_pretty(status)?;
        atomic_write(&self.status_path(&status.id), content.as_bytes()).await
    }

    /// Read all statuses
    pub async fn read_all_statuses(&self) -> Result<Vec<Status>> {
        let ids: Vec<StatusId> = self
            .list_json_stems(&self.statuses_dir())
            .await?
            .into_iter()
            .map(StatusId::from_string)
            .collect();
        let mut statuses = Vec::with_capacity(ids.len());

        for id in ids {
            statuses.push(self.read_status(&id).await?);
        }

        Ok(statuses)
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the global activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.ensure_directories().await?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.activity_path())
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking).
    ///
    /// Commands never take this themselves; the processor holds it for the
    /// duration of each operation.
    pub async fn lock(&self) -> Result<KanbanLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(KanbanLock {
                file,
                path: lock_path,
            }),
            Err(_) => Err(KanbanError::LockBusy),
        }
    }

    /// List the file stems of `*.json` entries in a directory
    async fn list_json_stems(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut stems = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.push(stem.to_string());
                }
            }
        }

        Ok(stems)
    }
}

/// RAII lock guard - releases on drop
pub struct KanbanLock {
    file: std::fs::File,
    #[allow(dead_code)]
    path: PathBuf,
}

impl Drop for KanbanLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}

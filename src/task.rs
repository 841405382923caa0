//! Task model and the owning `TaskStore`.
//!
//! The whole collection lives in memory and is flushed to a single JSON
//! file (whole-file overwrite) after every successful mutation. The file
//! holds an ordered array of task records; insertion order is list order
//! and updates never reorder.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::storage;

/// Task state. Any state may be set directly from any other; there is no
/// enforced ordering and no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(Error::InvalidArgument(format!(
                "invalid status '{other}': must be todo, in-progress, or done"
            ))),
        }
    }
}

/// A single trackable unit of work.
///
/// Serialized with camelCase keys (`createdAt`/`updatedAt`) to match the
/// persisted file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owning collection of all tasks plus load/save and mutation
/// operations.
///
/// Constructed with an explicit path; there is no ambient default store.
/// Every successful mutation persists the full collection before
/// returning; rejected operations leave both memory and disk untouched.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store. A file with malformed JSON
    /// is reported as a warning and also yields an empty store; bad
    /// content never fails the load. I/O errors reading an existing file
    /// do propagate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!(path = %path.display(), "tasks file does not exist; starting empty");
            return Ok(Self {
                path,
                tasks: Vec::new(),
            });
        }

        let contents = std::fs::read_to_string(&path)?;
        let tasks = match serde_json::from_str(&contents) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "tasks file contains invalid JSON; starting with an empty list"
                );
                Vec::new()
            }
        };
        debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        Ok(Self { path, tasks })
    }

    /// Path of the persisted file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Write the full collection back to disk, overwriting prior
    /// contents (temp file + rename, so readers never see a torn write).
    pub fn save(&self) -> Result<()> {
        storage::write_json(&self.path, &self.tasks)?;
        debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Add a new task with the given description.
    ///
    /// Whitespace-only descriptions are rejected without creating a task
    /// or touching the file. The description is stored as given; trimming
    /// is only used for the emptiness check.
    pub fn add(&mut self, description: &str) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        let now = Utc::now();
        let task = Task {
            id: self.next_id(),
            description: description.to_string(),
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Update the description of the task with the given id.
    ///
    /// A whitespace-only description leaves the existing text untouched
    /// while still refreshing `updated_at` and persisting; this partial
    /// update is not an error.
    pub fn update(&mut self, id: u32, description: &str) -> Result<Task> {
        let task = self.find_mut(id)?;
        if !description.trim().is_empty() {
            task.description = description.to_string();
        }
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.save()?;
        Ok(updated)
    }

    /// Remove the task with the given id, preserving the relative order
    /// of the rest.
    pub fn delete(&mut self, id: u32) -> Result<()> {
        if !self.tasks.iter().any(|task| task.id == id) {
            return Err(Error::TaskNotFound(id));
        }
        self.tasks.retain(|task| task.id != id);
        self.save()
    }

    /// Set the status of the task with the given id.
    ///
    /// Idempotent: setting the status a task already has is not an
    /// error, though `updated_at` is still refreshed.
    pub fn set_status(&mut self, id: u32, status: Status) -> Result<Task> {
        let task = self.find_mut(id)?;
        task.status = status;
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.save()?;
        Ok(updated)
    }

    /// Tasks in store order, optionally filtered by status. Read-only.
    pub fn list(&self, status: Option<Status>) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| status.map_or(true, |wanted| task.status == wanted))
            .cloned()
            .collect()
    }

    // Next id is max existing + 1, so deleting the highest task makes
    // its id reusable.
    fn next_id(&self) -> u32 {
        self.tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::load(dir.path().join("tasks.json")).unwrap()
    }

    #[test]
    fn status_round_trips_through_serde() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"done\"").unwrap(),
            Status::Done
        );
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("todo".parse::<Status>().unwrap(), Status::Todo);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert!(matches!(
            "blocked".parse::<Status>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert_eq!(store.add("first").unwrap().id, 1);
        assert_eq!(store.add("second").unwrap().id, 2);
        assert_eq!(store.add("third").unwrap().id, 3);

        store.delete(3).unwrap();
        assert_eq!(store.add("reuses the freed id").unwrap().id, 3);

        store.delete(1).unwrap();
        assert_eq!(store.add("but never below the max").unwrap().id, 4);
    }

    #[test]
    fn add_rejects_whitespace_without_saving() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(matches!(store.add(""), Err(Error::EmptyDescription)));
        assert!(matches!(store.add("   "), Err(Error::EmptyDescription)));
        assert!(store.tasks().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn add_keeps_description_as_given() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let task = store.add("  padded  ").unwrap();
        assert_eq!(task.description, "  padded  ");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn update_replaces_description_and_touches_timestamp() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let created = store.add("old").unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store.update(created.id, "new").unwrap();
        assert_eq!(updated.description, "new");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn update_with_blank_description_keeps_text_but_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let created = store.add("keep me").unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store.update(created.id, "   ").unwrap();
        assert_eq!(updated.description, "keep me");
        assert!(updated.updated_at > created.updated_at);

        let reloaded = TaskStore::load(store.path()).unwrap();
        assert_eq!(reloaded.tasks()[0].updated_at, updated.updated_at);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.update(99, "x"),
            Err(Error::TaskNotFound(99))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn delete_preserves_order_of_remaining_tasks() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();

        store.delete(2).unwrap();
        let ids: Vec<u32> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(matches!(store.delete(2), Err(Error::TaskNotFound(2))));
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn set_status_is_idempotent_and_unordered() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let task = store.add("flip me").unwrap();

        let done = store.set_status(task.id, Status::Done).unwrap();
        assert_eq!(done.status, Status::Done);

        // done -> in-progress is allowed; there is no terminal state
        let reopened = store.set_status(task.id, Status::InProgress).unwrap();
        assert_eq!(reopened.status, Status::InProgress);

        std::thread::sleep(std::time::Duration::from_millis(2));
        let again = store.set_status(task.id, Status::InProgress).unwrap();
        assert_eq!(again.status, Status::InProgress);
        assert!(again.updated_at > reopened.updated_at);
    }

    #[test]
    fn list_filters_by_status_in_store_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("one").unwrap();
        store.add("two").unwrap();
        store.add("three").unwrap();
        store.set_status(2, Status::Done).unwrap();

        let all = store.list(None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].id, 2);

        let done = store.list(Some(Status::Done));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, 2);

        let todo: Vec<u32> = store
            .list(Some(Status::Todo))
            .iter()
            .map(|task| task.id)
            .collect();
        assert_eq!(todo, vec![1, 3]);
    }

    #[test]
    fn save_then_load_round_trips_the_collection() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add("persisted").unwrap();
        store.set_status(1, Status::InProgress).unwrap();

        let reloaded = TaskStore::load(store.path()).unwrap();
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn load_malformed_file_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = TaskStore::load(&path).unwrap();
        assert!(store.tasks().is_empty());
    }
}

//! Persisted-file helpers for the task store
//!
//! The store lives in one JSON file (by default `tasks.json` in the
//! working directory) holding an ordered array of task records. Every
//! save rewrites the whole file; a sibling `<file>.lock` guards the
//! load-mutate-save window of mutating commands.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::lock;

/// Default tasks file name, resolved against the working directory
pub const TASKS_FILE: &str = "tasks.json";

/// Path of the lock file guarding a tasks file (`<file>.lock`)
pub fn lock_path(tasks_file: &Path) -> PathBuf {
    PathBuf::from(format!("{}.lock", tasks_file.display()))
}

/// Write `data` as pretty-printed JSON via temp file + rename
///
/// Pretty-printing is cosmetic; loads accept any JSON formatting.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    lock::write_atomic(path, json.as_bytes())
}

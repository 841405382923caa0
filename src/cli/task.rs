//! tt subcommand implementations.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::lock::FileLock;
use crate::output::{emit_success, task_lines, OutputOptions};
use crate::storage;
use crate::task::{Status, Task, TaskStore};

pub struct AddOptions {
    pub description: String,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UpdateOptions {
    pub id: u32,
    pub description: String,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: u32,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MarkOptions {
    pub id: u32,
    pub status: Status,
    pub command: &'static str,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub status: Option<String>,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

struct TaskContext {
    store: TaskStore,
    // Held for the whole load-mutate-save window of mutating commands
    _lock: Option<FileLock>,
}

fn load_context(file: Option<PathBuf>, lock: bool) -> Result<TaskContext> {
    let cwd = std::env::current_dir()?;
    let config = Config::load_from_dir(&cwd);
    let path = file.unwrap_or(config.storage.file);

    let lock = if lock {
        Some(FileLock::acquire(
            storage::lock_path(&path),
            config.storage.lock_timeout_ms,
        )?)
    } else {
        None
    };

    let store = TaskStore::load(&path)?;
    Ok(TaskContext { store, _lock: lock })
}

#[derive(serde::Serialize)]
struct TaskOutput {
    task: Task,
}

#[derive(serde::Serialize)]
struct TaskDeletedOutput {
    id: u32,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut ctx = load_context(options.file, true)?;
    let task = ctx.store.add(&options.description)?;

    let human = vec![format!("Task added: {}", task.description)];
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &TaskOutput { task },
        &human,
    )
}

pub fn run_update(options: UpdateOptions) -> Result<()> {
    let mut ctx = load_context(options.file, true)?;
    let task = ctx.store.update(options.id, &options.description)?;

    let mut human = vec!["Task updated:".to_string()];
    human.extend(task_lines(&task));
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "update",
        &TaskOutput { task },
        &human,
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut ctx = load_context(options.file, true)?;
    ctx.store.delete(options.id)?;

    let human = vec![format!("Task {} deleted.", options.id)];
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &TaskDeletedOutput { id: options.id },
        &human,
    )
}

pub fn run_mark(options: MarkOptions) -> Result<()> {
    let mut ctx = load_context(options.file, true)?;
    let task = ctx.store.set_status(options.id, options.status)?;

    let human = vec![format!("Task {} marked as {}.", task.id, task.status)];
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        options.command,
        &TaskOutput { task },
        &human,
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    // Read-only: no lock, no persistence
    let ctx = load_context(options.file, false)?;
    let filter = options
        .status
        .as_deref()
        .map(|status| status.parse::<Status>())
        .transpose()?;
    let tasks = ctx.store.list(filter);

    let mut human = Vec::new();
    for task in &tasks {
        human.extend(task_lines(task));
        human.push(String::new());
    }
    if tasks.is_empty() {
        human.push("No tasks found.".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &TaskListOutput {
            total: tasks.len(),
            tasks,
        },
        &human,
    )
}

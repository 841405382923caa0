//! Command-line interface for tt
//!
//! This module defines the CLI structure using clap derive macros.
//! Subcommand handlers live in the `task` submodule.

use clap::{CommandFactory, Parser, Subcommand};

use crate::error::Result;
use crate::task::Status;

mod task;

/// tt - Task Tracker
///
/// A local task tracker: add, update, delete, and status short text
/// tasks persisted in a flat JSON file.
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the tasks file (defaults to ./tasks.json)
    #[arg(long, global = true, env = "TT_FILE")]
    pub file: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Description of the task
        description: String,
    },

    /// Update an existing task's description
    Update {
        /// ID of the task to update
        id: u32,

        /// New description of the task
        description: String,
    },

    /// Delete a task
    Delete {
        /// ID of the task to delete
        id: u32,
    },

    /// Mark a task as in-progress
    MarkInProgress {
        /// ID of the task to mark as in-progress
        id: u32,
    },

    /// Mark a task as done
    MarkDone {
        /// ID of the task to mark as done
        id: u32,
    },

    /// List tasks, optionally filtered by status
    List {
        /// Status of tasks to list: todo, in-progress, or done
        status: Option<String>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let command = match self.command {
            Some(command) => command,
            None => {
                // Bare `tt` prints usage help, like an explicit --help
                let mut usage = Cli::command();
                usage.print_help()?;
                return Ok(());
            }
        };

        match command {
            Commands::Add { description } => task::run_add(task::AddOptions {
                description,
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Update { id, description } => task::run_update(task::UpdateOptions {
                id,
                description,
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { id } => task::run_delete(task::DeleteOptions {
                id,
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::MarkInProgress { id } => task::run_mark(task::MarkOptions {
                id,
                status: Status::InProgress,
                command: "mark-in-progress",
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::MarkDone { id } => task::run_mark(task::MarkOptions {
                id,
                status: Status::Done,
                command: "mark-done",
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List { status } => task::run_list(task::ListOptions {
                status,
                file: self.file,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}

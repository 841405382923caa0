//! Shared output formatting for tt commands.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::error::{JsonError, Result};
use crate::task::Task;

pub const SCHEMA_VERSION: &str = "tt.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: &[String],
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if !human.is_empty() {
        println!("{}", human.join("\n"));
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &crate::error::Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    let hint = next_steps.first().map(|step| step.as_str());
    if json {
        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: JsonError,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: JsonError::from(err),
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// The five `Key: value` lines printed for one task
pub fn task_lines(task: &Task) -> Vec<String> {
    vec![
        format!("ID: {}", task.id),
        format!("Description: {}", task.description),
        format!("Status: {}", task.status),
        format!(
            "Created At: {}",
            task.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        format!(
            "Updated At: {}",
            task.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    ]
}

pub fn infer_command_name_from_args() -> String {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .unwrap_or_else(|| "tt".to_string())
}

fn error_next_steps(err: &crate::error::Error) -> Vec<String> {
    use crate::error::Error;

    match err {
        Error::TaskNotFound(_) => vec!["tt list".to_string()],
        Error::EmptyDescription => vec!["tt add \"<description>\"".to_string()],
        Error::InvalidConfig(_) => vec!["fix .tt.toml then retry".to_string()],
        Error::LockFailed(_) => {
            vec!["retry once the other tt process has finished".to_string()]
        }
        _ => Vec::new(),
    }
}

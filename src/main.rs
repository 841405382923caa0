//! tt - Task Tracker CLI
//!
//! A local task tracker backed by a flat JSON file: add, update, delete,
//! mark, and list tasks from the command line.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tt::cli::Cli;
use tt::output::{emit_error, infer_command_name_from_args};

fn main() {
    let command = infer_command_name_from_args();
    let cli = Cli::parse();

    // Logging goes to stderr so --json stdout stays machine-readable.
    // RUST_LOG overrides the default filter; keep startup robust by
    // ignoring invalid/huge filters. Warnings (e.g. a malformed tasks
    // file) are visible by default; --verbose raises the bar to debug.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| {
            if cli.verbose {
                EnvFilter::new("tt=debug")
            } else {
                EnvFilter::new("tt=warn")
            }
        });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(&command, &err, json);
        std::process::exit(err.exit_code());
    }
}

//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls into the core/session layers
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `target-path` talks to the server and is async; dispatch builds a tokio
//! runtime for it and stays synchronous for the local commands.

mod completions;
mod export_csv;
mod resolve;
mod target_path;
mod validate;

// Re-export command functions for testing and direct invocation
pub use completions::completions;
pub use export_csv::export_csv;
pub use resolve::resolve;
pub use target_path::target_path;
pub use validate::validate;

use anyhow::Result;

use super::{Command, Context};

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Validate { file } => validate(&file, ctx),
        Command::Resolve {
            source_manifest,
            target_manifest,
            path,
        } => resolve(&source_manifest, &target_manifest, &path, ctx),
        Command::ExportCsv { file, output } => export_csv(&file, output.as_deref(), ctx),
        Command::TargetPath {
            source_repo,
            target_repo,
            path,
            token,
        } => target_path(&source_repo, &target_repo, &path, token, ctx),
        Command::Completions { shell } => completions(shell),
    }
}

//! cli
//!
//! Command-line interface layer for Scriptorium.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call into [`crate::core`], [`crate::session`], and
//! [`crate::forge`]. Handlers print results; domain logic stays out of
//! this layer.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::diag::{Diagnostics, StderrDiagnostics, Verbosity};

/// Shared context for command handlers.
pub struct Context {
    /// Loaded configuration.
    pub config: Config,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Diagnostics sink for the session layer.
    pub diag: Arc<dyn Diagnostics>,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let ctx = Context {
        config,
        verbosity,
        diag: Arc::new(StderrDiagnostics::new(verbosity)),
    };

    commands::dispatch(cli.command, &ctx)
}

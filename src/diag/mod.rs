//! diag
//!
//! Structured diagnostics with levels.
//!
//! # Design
//!
//! The resolver and validator never raise expected-absence cases to the
//! user; they report them through a [`Diagnostics`] sink instead. The
//! stderr implementation respects the CLI verbosity flags; tests use
//! [`NullDiagnostics`].

use std::fmt::Display;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - warnings and errors
    Normal,
    /// Debug mode - everything
    Debug,
}

impl Verbosity {
    /// Create verbosity from CLI flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Whether a message at `level` should be shown.
    fn shows(self, level: Level) -> bool {
        match self {
            Verbosity::Quiet => level >= Level::Error,
            Verbosity::Normal => level >= Level::Warn,
            Verbosity::Debug => true,
        }
    }
}

/// Sink for structured diagnostics.
pub trait Diagnostics: Send + Sync {
    /// Emit a message at the given level.
    fn emit(&self, level: Level, message: &str);

    /// Emit a debug message.
    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    /// Emit an informational message.
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Emit a warning.
    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    /// Emit an error.
    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Diagnostics printed to stderr, filtered by verbosity.
#[derive(Debug, Clone, Copy)]
pub struct StderrDiagnostics {
    verbosity: Verbosity,
}

impl StderrDiagnostics {
    /// Create a stderr sink with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Diagnostics for StderrDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        if self.verbosity.shows(level) {
            eprintln!("[{}] {}", level, message);
        }
    }
}

/// Diagnostics sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn emit(&self, _level: Level, _message: &str) {}
}

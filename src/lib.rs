//! Scriptorium - collaborative translation of scripture resources
//!
//! Scriptorium is the core behind an editor for translating structured
//! scripture resources (translation notes, translation words, etc.) stored
//! as files on a remote Gitea server. A translator picks a source-language
//! file, the system derives the corresponding file in a target-language
//! repository through the repositories' manifests, validates the content
//! against the fixed translation-notes TSV schema, and persists edits back
//! to the server.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`session`] - Sequences resolve -> load -> validate with memoization
//! - [`core`] - Domain types: manifests, TSV validation, CSV export, config
//! - [`forge`] - Abstraction for the remote git-hosting service (Gitea v1)
//! - [`state`] - Explicit application state with named slots
//! - [`diag`] - Structured diagnostics with levels
//!
//! # Correctness Invariants
//!
//! 1. A target file is fetched only after its path resolves through both
//!    manifests; an unresolved path suppresses the fetch entirely
//! 2. Ambiguous or malformed manifests fail closed to "unresolved",
//!    never to a guessed path
//! 3. Validation is read-only and re-runs only when content changes
//! 4. Critical notices block saving until the content is fixed

pub mod cli;
pub mod core;
pub mod diag;
pub mod forge;
pub mod session;
pub mod state;

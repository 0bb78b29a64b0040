//! forge
//!
//! Abstraction for the remote git-hosting service.
//!
//! # Architecture
//!
//! The `Forge` trait is the narrow collaborator interface the editing core
//! depends on: fetch a file (optionally creating it), fetch a repository's
//! manifest, persist edited content, and provision a target repository.
//! The core resolver and validator never perform I/O themselves; the
//! session feeds them already-fetched values.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait, `RepoRef`, `FileState`, `RemoteState`
//! - [`gitea`]: Gitea implementation using the v1 REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod gitea;
pub mod mock;
pub mod traits;

pub use traits::{FileState, Forge, ForgeError, RemoteState, RepoRef, RepoSettings};

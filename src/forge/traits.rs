//! forge::traits
//!
//! Forge trait definition for interacting with remote hosting services.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` to handle API errors gracefully. The core
//! resolver and validator never call the forge themselves; the session
//! sequences fetches and feeds their results in as plain values.
//!
//! # Example
//!
//! ```ignore
//! use scriptorium::forge::{Forge, RepoRef};
//!
//! async fn load_notes(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     let repo = RepoRef::new("Door43-Catalog", "en_tn");
//!     let manifest = forge.fetch_manifest(&repo).await?;
//!     let file = forge.fetch_file(&repo, "tn_GEN.tsv", None).await?;
//!     println!("{} bytes", file.content.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::manifest::MANIFEST_FILENAME;

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like Gitea.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The API answered successfully with a payload we could not use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Reference to a repository on the forge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedResponse` describing the problem when the string
    /// does not have exactly two non-empty segments.
    pub fn parse(full_name: &str) -> Result<Self, ForgeError> {
        match full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ForgeError::UnexpectedResponse(format!(
                "expected repository as owner/name, got '{}'",
                full_name
            ))),
        }
    }

    /// The `owner/name` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A fetched file and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileState {
    /// Repository-relative path
    pub path: String,
    /// Base name of the file
    pub name: String,
    /// Decoded file content
    pub content: String,
    /// Browse URL of the file (the `src` view; blame links derive from it)
    pub html_url: String,
    /// Content SHA as reported by the forge, needed for updates
    pub sha: Option<String>,
}

/// State of an outstanding remote fetch.
///
/// The core treats any non-`Loaded` state as absent input: resolution
/// yields "unresolved" and validation stays pending rather than blocking
/// or failing the whole flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteState<T> {
    /// Fetch not completed yet.
    #[default]
    Pending,
    /// Fetch completed successfully.
    Loaded(T),
    /// Fetch failed; the message is for diagnostics only.
    Errored(String),
}

impl<T> RemoteState<T> {
    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            RemoteState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the fetch is still outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, RemoteState::Pending)
    }

    /// Fold a fetch result into a state.
    pub fn from_result(result: Result<T, ForgeError>) -> Self {
        match result {
            Ok(value) => RemoteState::Loaded(value),
            Err(e) => RemoteState::Errored(e.to_string()),
        }
    }
}

/// Settings for creating a target repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoSettings {
    /// Repository description
    pub description: Option<String>,
    /// Create as private
    pub private: bool,
    /// Initialize with a default branch
    pub auto_init: bool,
    /// Default branch name (forge default when `None`)
    pub default_branch: Option<String>,
}

/// The Forge trait for interacting with remote hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Callers should handle:
/// - `AuthRequired` / `AuthFailed`: Prompt user to authenticate
/// - `NotFound`: Resource doesn't exist
/// - `RateLimited`: Back off and retry
/// - `ApiError` / `NetworkError`: Display and abort the operation
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "gitea", "mock").
    fn name(&self) -> &'static str;

    /// Fetch a file, optionally creating it when absent.
    ///
    /// # Arguments
    ///
    /// * `repo` - The repository to read from
    /// * `path` - Repository-relative file path
    /// * `default_content` - When `Some` and the file does not exist, the
    ///   file is created with this content and the created state returned
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file is absent and no default was given
    /// - `AuthFailed` if the token is invalid or lacks permissions
    async fn fetch_file(
        &self,
        repo: &RepoRef,
        path: &str,
        default_content: Option<&str>,
    ) -> Result<FileState, ForgeError>;

    /// Fetch the repository's `manifest.yaml`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the repository carries no manifest
    async fn fetch_manifest(&self, repo: &RepoRef) -> Result<FileState, ForgeError> {
        self.fetch_file(repo, MANIFEST_FILENAME, None).await
    }

    /// Persist edited content back to the repository.
    ///
    /// Creates the file when absent, updates it otherwise.
    ///
    /// # Errors
    ///
    /// - `AuthRequired` / `AuthFailed` for write-permission failures
    async fn save_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<FileState, ForgeError>;

    /// Create a repository under `owner`.
    ///
    /// # Errors
    ///
    /// - `ApiError` with status 409 if the repository already exists
    async fn create_repository(
        &self,
        owner: &str,
        name: &str,
        settings: RepoSettings,
    ) -> Result<RepoRef, ForgeError>;
}

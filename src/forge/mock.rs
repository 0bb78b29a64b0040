//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge stores repositories and file contents in memory and
//! allows configuring failure scenarios per operation. Every call is
//! recorded so tests can assert on sequencing, in particular that no
//! target-file fetch happens without a prior successful resolution.
//!
//! # Example
//!
//! ```
//! use scriptorium::forge::mock::MockForge;
//! use scriptorium::forge::{Forge, RepoRef};
//!
//! # tokio_test::block_on(async {
//! let repo = RepoRef::new("xyz", "xyz_tn");
//! let forge = MockForge::new().with_file(&repo, "tn_GEN.tsv", "content");
//!
//! let file = forge.fetch_file(&repo, "tn_GEN.tsv", None).await.unwrap();
//! assert_eq!(file.content, "content");
//! assert_eq!(file.name, "tn_GEN.tsv");
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{FileState, Forge, ForgeError, RepoRef, RepoSettings};
use crate::core::manifest::MANIFEST_FILENAME;

/// Base URL used for constructed browse links.
const MOCK_SERVER: &str = "https://mock.forge";

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    /// File contents keyed by (repo full name, path).
    files: HashMap<(String, String), String>,
    /// Repositories known to exist (a repo with files is implicitly known).
    repos: Vec<RepoRef>,
    /// Operation to fail, for testing error paths.
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail fetch_file with the given error.
    FetchFile(ForgeError),
    /// Fail fetch_manifest with the given error.
    FetchManifest(ForgeError),
    /// Fail save_file with the given error.
    SaveFile(ForgeError),
    /// Fail create_repository with the given error.
    CreateRepository(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    FetchFile {
        repo: String,
        path: String,
        /// Whether the call created the file from default content.
        created: bool,
    },
    FetchManifest {
        repo: String,
    },
    SaveFile {
        repo: String,
        path: String,
    },
    CreateRepository {
        owner: String,
        name: String,
    },
}

impl MockForge {
    /// Create an empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a file (and implicitly its repository).
    pub fn with_file(self, repo: &RepoRef, path: &str, content: &str) -> Self {
        {
            let mut inner = self.inner.lock().expect("mock forge lock");
            inner
                .files
                .insert((repo.full_name(), path.to_string()), content.to_string());
            if !inner.repos.contains(repo) {
                inner.repos.push(repo.clone());
            }
        }
        self
    }

    /// Builder: seed a manifest document.
    pub fn with_manifest(self, repo: &RepoRef, content: &str) -> Self {
        self.with_file(repo, MANIFEST_FILENAME, content)
    }

    /// Configure an operation to fail.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.inner.lock().expect("mock forge lock").fail_on = Some(fail_on);
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner
            .lock()
            .expect("mock forge lock")
            .operations
            .clone()
    }

    /// Get the current content of a file, if present.
    pub fn file_content(&self, repo: &RepoRef, path: &str) -> Option<String> {
        self.inner
            .lock()
            .expect("mock forge lock")
            .files
            .get(&(repo.full_name(), path.to_string()))
            .cloned()
    }

    /// Whether a repository exists.
    pub fn has_repo(&self, repo: &RepoRef) -> bool {
        self.inner
            .lock()
            .expect("mock forge lock")
            .repos
            .contains(repo)
    }

    /// Build the `FileState` for a stored file.
    fn state_for(repo: &RepoRef, path: &str, content: &str) -> FileState {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        FileState {
            path: path.to_string(),
            name,
            content: content.to_string(),
            html_url: format!(
                "{}/{}/src/branch/master/{}",
                MOCK_SERVER,
                repo.full_name(),
                path
            ),
            sha: Some(format!("mock-{}", content.len())),
        }
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_file(
        &self,
        repo: &RepoRef,
        path: &str,
        default_content: Option<&str>,
    ) -> Result<FileState, ForgeError> {
        let mut inner = self.inner.lock().expect("mock forge lock");
        if let Some(FailOn::FetchFile(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        let key = (repo.full_name(), path.to_string());
        let (content, created) = match inner.files.get(&key) {
            Some(content) => (content.clone(), false),
            None => match default_content {
                Some(default) => {
                    inner.files.insert(key, default.to_string());
                    (default.to_string(), true)
                }
                None => {
                    inner.operations.push(MockOperation::FetchFile {
                        repo: repo.full_name(),
                        path: path.to_string(),
                        created: false,
                    });
                    return Err(ForgeError::NotFound(format!(
                        "{}:{}",
                        repo.full_name(),
                        path
                    )));
                }
            },
        };
        inner.operations.push(MockOperation::FetchFile {
            repo: repo.full_name(),
            path: path.to_string(),
            created,
        });
        Ok(Self::state_for(repo, path, &content))
    }

    async fn fetch_manifest(&self, repo: &RepoRef) -> Result<FileState, ForgeError> {
        {
            let mut inner = self.inner.lock().expect("mock forge lock");
            if let Some(FailOn::FetchManifest(e)) = &inner.fail_on {
                return Err(e.clone());
            }
            inner.operations.push(MockOperation::FetchManifest {
                repo: repo.full_name(),
            });
            let key = (repo.full_name(), MANIFEST_FILENAME.to_string());
            if let Some(content) = inner.files.get(&key) {
                return Ok(Self::state_for(repo, MANIFEST_FILENAME, content));
            }
        }
        Err(ForgeError::NotFound(format!(
            "{}:{}",
            repo.full_name(),
            MANIFEST_FILENAME
        )))
    }

    async fn save_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &str,
        _message: &str,
    ) -> Result<FileState, ForgeError> {
        let mut inner = self.inner.lock().expect("mock forge lock");
        if let Some(FailOn::SaveFile(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        inner
            .files
            .insert((repo.full_name(), path.to_string()), content.to_string());
        inner.operations.push(MockOperation::SaveFile {
            repo: repo.full_name(),
            path: path.to_string(),
        });
        Ok(Self::state_for(repo, path, content))
    }

    async fn create_repository(
        &self,
        owner: &str,
        name: &str,
        _settings: RepoSettings,
    ) -> Result<RepoRef, ForgeError> {
        let mut inner = self.inner.lock().expect("mock forge lock");
        if let Some(FailOn::CreateRepository(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        let repo = RepoRef::new(owner, name);
        if inner.repos.contains(&repo) {
            return Err(ForgeError::ApiError {
                status: 409,
                message: format!("repository {} already exists", repo.full_name()),
            });
        }
        inner.repos.push(repo.clone());
        inner.operations.push(MockOperation::CreateRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        });
        Ok(repo)
    }
}

//! state
//!
//! Explicit application state with named slots.
//!
//! # Design
//!
//! Cross-cutting fields live in one [`AppState`] object with typed getters
//! and setters rather than ambient global singletons. Setters bump a
//! generation counter only when a value actually changes, so dependent
//! computations can cheaply detect staleness without diffing.

use crate::core::config::{Config, ValidationPriority};
use crate::forge::RepoRef;

/// Credentials for the remote service.
#[derive(Clone, PartialEq, Eq)]
pub struct Authentication {
    /// Account name on the server.
    pub user: String,
    /// Personal access token.
    pub token: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authentication")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Application state shared across the editing flow.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    authentication: Option<Authentication>,
    source_repository: Option<RepoRef>,
    target_repository: Option<RepoRef>,
    filepath: Option<String>,
    validation_priority: ValidationPriority,
    font_scale: u16,
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            authentication: None,
            source_repository: None,
            target_repository: None,
            filepath: None,
            validation_priority: ValidationPriority::default(),
            font_scale: 100,
            generation: 0,
        }
    }
}

impl AppState {
    /// Create state with preferences taken from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            validation_priority: config.validation_priority,
            font_scale: config.font_scale,
            ..Self::default()
        }
    }

    /// Current credentials, if authenticated.
    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    /// Selected source-language repository.
    pub fn source_repository(&self) -> Option<&RepoRef> {
        self.source_repository.as_ref()
    }

    /// Selected target-language repository.
    pub fn target_repository(&self) -> Option<&RepoRef> {
        self.target_repository.as_ref()
    }

    /// Path of the source file being edited.
    pub fn filepath(&self) -> Option<&str> {
        self.filepath.as_deref()
    }

    /// Validation gating preference.
    pub fn validation_priority(&self) -> ValidationPriority {
        self.validation_priority
    }

    /// Editor font scale percentage.
    pub fn font_scale(&self) -> u16 {
        self.font_scale
    }

    /// Monotonic counter bumped on every real change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    /// Set or clear credentials.
    pub fn set_authentication(&mut self, authentication: Option<Authentication>) {
        if self.authentication != authentication {
            self.authentication = authentication;
            self.bump();
        }
    }

    /// Select the source-language repository.
    pub fn set_source_repository(&mut self, repository: Option<RepoRef>) {
        if self.source_repository != repository {
            self.source_repository = repository;
            self.bump();
        }
    }

    /// Select the target-language repository.
    pub fn set_target_repository(&mut self, repository: Option<RepoRef>) {
        if self.target_repository != repository {
            self.target_repository = repository;
            self.bump();
        }
    }

    /// Select the source file being edited.
    pub fn set_filepath(&mut self, filepath: Option<String>) {
        if self.filepath != filepath {
            self.filepath = filepath;
            self.bump();
        }
    }

    /// Change the validation gating preference.
    pub fn set_validation_priority(&mut self, priority: ValidationPriority) {
        if self.validation_priority != priority {
            self.validation_priority = priority;
            self.bump();
        }
    }

    /// Change the editor font scale.
    pub fn set_font_scale(&mut self, font_scale: u16) {
        if self.font_scale != font_scale {
            self.font_scale = font_scale;
            self.bump();
        }
    }
}

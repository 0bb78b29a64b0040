//! session
//!
//! Sequencing and memoization for the resolve -> load -> validate flow.
//!
//! # Design
//!
//! The surrounding application re-invokes this layer on every state
//! change, so both steps must be idempotent and cheap. Resolution and
//! validation are memoized on content fingerprints plus path: repeated
//! calls with unchanged inputs return the cached answer without
//! recomputing, and a file already marked valid is not re-validated until
//! its content genuinely changes.
//!
//! # Ordering
//!
//! [`Session::sync_target`] fetches the target file strictly after a
//! successful resolution. An unresolved path suppresses the fetch
//! entirely; the flow never falls back to the source path and never
//! fabricates one.
//!
//! # Failure Semantics
//!
//! Pending or failed manifest fetches make resolution yield "unresolved",
//! not an error. Ambiguous and malformed manifests are reported through
//! the [`Diagnostics`] sink and likewise resolve to nothing.

use std::sync::Arc;

use crate::core::manifest::{resolve_target_path, Manifest};
use crate::core::tsv::{self, TsvReport};
use crate::core::types::Fingerprint;
use crate::diag::{Diagnostics, NullDiagnostics};
use crate::forge::{FileState, Forge, ForgeError, RemoteState, RepoRef};

/// Memoization key for a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolutionKey {
    source_manifest: Fingerprint,
    target_manifest: Fingerprint,
    source_path: String,
}

/// Cached resolution outcome.
#[derive(Debug, Clone)]
struct ResolutionMemo {
    key: ResolutionKey,
    target_path: Option<String>,
}

/// Memoization key for a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidationKey {
    content: Fingerprint,
    name: String,
}

/// Cached validation outcome.
#[derive(Debug, Clone)]
struct ValidationMemo {
    key: ValidationKey,
    report: TsvReport,
}

/// Outcome of one pass over the target-file flow.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSync {
    /// No target path could be determined; nothing was fetched.
    Unresolved,
    /// Target file loaded (created from source content when absent) and
    /// validated.
    Resolved {
        /// The resolved target-language path.
        path: String,
        /// The loaded target file.
        file: FileState,
        /// Validation outcome for the loaded content.
        report: TsvReport,
    },
}

impl TargetSync {
    /// Whether editing/saving may proceed past this pass.
    pub fn permits_saving(&self) -> bool {
        match self {
            TargetSync::Unresolved => false,
            TargetSync::Resolved { report, .. } => report.permits_saving(),
        }
    }
}

/// One editing session's resolution and validation state.
///
/// Holds only memoized results; manifests and files are read-only inputs
/// fetched fresh by the caller (or by [`Session::sync_target`]).
pub struct Session {
    diag: Arc<dyn Diagnostics>,
    resolution: Option<ResolutionMemo>,
    validation: Option<ValidationMemo>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(NullDiagnostics))
    }
}

impl Session {
    /// Create a session reporting through the given diagnostics sink.
    pub fn new(diag: Arc<dyn Diagnostics>) -> Self {
        Self {
            diag,
            resolution: None,
            validation: None,
        }
    }

    /// Resolve the target-language path for the current source file.
    ///
    /// Both manifests must be loaded; a pending or errored manifest yields
    /// `None` without caching, so the next call after the fetch completes
    /// computes a real answer. Loaded inputs are memoized on their
    /// fingerprints plus the source path.
    pub fn resolve_target_path(
        &mut self,
        source_manifest: &RemoteState<FileState>,
        source_path: &str,
        target_manifest: &RemoteState<FileState>,
    ) -> Option<String> {
        let (source, target) = match (source_manifest.loaded(), target_manifest.loaded()) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                self.diag
                    .debug("resolution deferred: manifest fetch outstanding or failed");
                return None;
            }
        };

        let key = ResolutionKey {
            source_manifest: Fingerprint::of(&source.content),
            target_manifest: Fingerprint::of(&target.content),
            source_path: source_path.to_string(),
        };
        if let Some(memo) = &self.resolution {
            if memo.key == key {
                return memo.target_path.clone();
            }
        }

        let source_manifest = self.parse_manifest(&source.content, "source");
        let target_manifest = self.parse_manifest(&target.content, "target");

        let target_path = resolve_target_path(&source_manifest, source_path, &target_manifest);
        match &target_path {
            Some(path) => self
                .diag
                .debug(&format!("resolved '{}' -> '{}'", source_path, path)),
            None => self.diag.debug(&format!(
                "no unique target project for '{}'; leaving target undetermined",
                source_path
            )),
        }

        self.resolution = Some(ResolutionMemo {
            key,
            target_path: target_path.clone(),
        });
        target_path
    }

    /// Parse a manifest leniently, logging malformed documents.
    fn parse_manifest(&self, content: &str, role: &str) -> Manifest {
        match Manifest::parse(content) {
            Ok(manifest) => manifest,
            Err(e) => {
                self.diag
                    .warn(&format!("{} manifest is malformed: {}", role, e));
                Manifest::default()
            }
        }
    }

    /// Validate a file's content, memoized per content fingerprint.
    ///
    /// Non-loaded files report `Pending`. A file already validated at the
    /// current content is not re-checked; only a genuinely new content
    /// load triggers another pass.
    pub fn validate(&mut self, file: &RemoteState<FileState>) -> TsvReport {
        let Some(file) = file.loaded() else {
            return TsvReport::pending();
        };

        let key = ValidationKey {
            content: Fingerprint::of(&file.content),
            name: file.name.clone(),
        };
        if let Some(memo) = &self.validation {
            if memo.key == key {
                return memo.report.clone();
            }
        }

        let report = tsv::validate(&file.name, &file.html_url, Some(&file.content));
        if !report.notices.is_empty() {
            self.diag.warn(&format!(
                "{} critical notice(s) in {}",
                report.notices.len(),
                file.path
            ));
        }
        self.validation = Some(ValidationMemo {
            key,
            report: report.clone(),
        });
        report
    }

    /// Run one full pass: resolve the target path, load (or create) the
    /// target file, and validate it.
    ///
    /// The target fetch happens only after a successful resolution; when
    /// resolution yields nothing the pass returns
    /// [`TargetSync::Unresolved`] without touching the target repository.
    /// When the target file is absent it is created with the source file's
    /// content as the starting point for translation.
    ///
    /// # Errors
    ///
    /// Only the target-file fetch itself can fail here; manifest fetch
    /// failures degrade to `Unresolved`.
    pub async fn sync_target(
        &mut self,
        forge: &dyn Forge,
        source_repo: &RepoRef,
        target_repo: &RepoRef,
        source_file: &FileState,
    ) -> Result<TargetSync, ForgeError> {
        let source_manifest = RemoteState::from_result(forge.fetch_manifest(source_repo).await);
        if let RemoteState::Errored(e) = &source_manifest {
            self.diag
                .warn(&format!("source manifest unavailable: {}", e));
        }
        let target_manifest = RemoteState::from_result(forge.fetch_manifest(target_repo).await);
        if let RemoteState::Errored(e) = &target_manifest {
            self.diag
                .warn(&format!("target manifest unavailable: {}", e));
        }

        let Some(path) =
            self.resolve_target_path(&source_manifest, &source_file.path, &target_manifest)
        else {
            return Ok(TargetSync::Unresolved);
        };

        // Sequenced strictly after a successful resolution.
        let file = forge
            .fetch_file(target_repo, &path, Some(&source_file.content))
            .await?;
        let report = self.validate(&RemoteState::Loaded(file.clone()));
        Ok(TargetSync::Resolved { path, file, report })
    }
}

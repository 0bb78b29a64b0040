//! core::manifest
//!
//! Resource-container manifest model and target-path resolution.
//!
//! # Design
//!
//! A resource repository carries a `manifest.yaml` enumerating its content
//! projects, each with a stable identifier and a repository-relative file
//! path. Resolution maps a source file to its target-language counterpart
//! by going path -> identifier in the source manifest, then identifier ->
//! path in the target manifest. Identifiers are stable across languages;
//! paths are not (one repository may declare `tn_GEN.tsv`, another
//! `./tn_GEN.tsv`).
//!
//! # Matching Rules
//!
//! A project matches a path when its declared path equals the path verbatim
//! or equals the path with a single leading `./`. Lookups succeed only when
//! exactly one project matches; zero or multiple matches fail closed to
//! `None` rather than guessing.
//!
//! # Failure Semantics
//!
//! Absence is a modeled return value, not a fault. A malformed manifest
//! document is equivalent to a manifest with no projects; resolution then
//! yields `None` and the caller treats the target file as not yet
//! determined.
//!
//! # Example
//!
//! ```
//! use scriptorium::core::manifest::{resolve_target_path, Manifest};
//!
//! let source = Manifest::parse(
//!     "projects:\n  - identifier: gen\n    path: tn_GEN.tsv\n",
//! ).unwrap();
//! let target = Manifest::parse(
//!     "projects:\n  - identifier: gen\n    path: ./tn_GEN.tsv\n",
//! ).unwrap();
//!
//! let path = resolve_target_path(&source, "tn_GEN.tsv", &target);
//! assert_eq!(path.as_deref(), Some("./tn_GEN.tsv"));
//! ```

use serde::Deserialize;
use thiserror::Error;

use super::types::ProjectId;

/// File name of the manifest within a resource repository.
pub const MANIFEST_FILENAME: &str = "manifest.yaml";

/// Errors from manifest parsing.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest document could not be parsed as YAML, or a project
    /// entry was structurally invalid.
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_yaml::Error),
}

/// One content project declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Stable identifier linking this project across languages.
    pub identifier: ProjectId,
    /// Repository-relative path of the project's file.
    pub path: String,
}

/// A parsed resource-container manifest.
///
/// Manifests are read-only inputs: fetched fresh per resolution attempt,
/// never cached or mutated here. Unknown document fields (titles,
/// versification, dublin core metadata) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Declared content projects, in document order.
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Manifest {
    /// Parse a manifest from raw YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Malformed` if the document is not valid YAML
    /// or a project entry lacks a usable identifier or path. Callers that
    /// must not fail on malformed input (the resolution path) map this to
    /// an empty manifest instead.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Whether the manifest declares no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Find the identifier of the single project owning `path`.
    ///
    /// A project matches when its declared path equals `path` verbatim or
    /// equals `"./"` + `path`. Returns `None` unless exactly one project
    /// matches: ambiguous manifests are not partially resolved.
    pub fn identifier_for_path(&self, path: &str) -> Option<&ProjectId> {
        let dotted = format!("./{}", path);
        let mut matches = self
            .projects
            .iter()
            .filter(|p| p.path == path || p.path == dotted);
        match (matches.next(), matches.next()) {
            (Some(project), None) => Some(&project.identifier),
            _ => None,
        }
    }

    /// Find the declared path of the single project with `identifier`.
    ///
    /// Returns `None` unless exactly one project carries the identifier.
    pub fn path_for_identifier(&self, identifier: &ProjectId) -> Option<&str> {
        let mut matches = self
            .projects
            .iter()
            .filter(|p| p.identifier == *identifier);
        match (matches.next(), matches.next()) {
            (Some(project), None) => Some(project.path.as_str()),
            _ => None,
        }
    }
}

/// Resolve the target-language path for a source file.
///
/// Composes [`Manifest::identifier_for_path`] over the source manifest with
/// [`Manifest::path_for_identifier`] over the target manifest. `None`
/// propagates through the composition: if either lookup fails, the whole
/// resolution yields `None` and the caller must treat the target file as
/// not yet determined. It must not fall back to the source path.
pub fn resolve_target_path(
    source: &Manifest,
    source_path: &str,
    target: &Manifest,
) -> Option<String> {
    let identifier = source.identifier_for_path(source_path)?;
    target.path_for_identifier(identifier).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(entries: &[(&str, &str)]) -> Manifest {
        Manifest {
            projects: entries
                .iter()
                .map(|(id, path)| Project {
                    identifier: ProjectId::new(*id).unwrap(),
                    path: (*path).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn parse_full_resource_manifest() {
        // Real manifests carry far more than projects; extra fields are ignored.
        let text = r#"
dublin_core:
  identifier: tn
  language:
    identifier: en
projects:
  - title: Genesis
    identifier: gen
    path: ./tn_GEN.tsv
    sort: 1
  - title: Exodus
    identifier: exo
    path: ./tn_EXO.tsv
    sort: 2
"#;
        let m = Manifest::parse(text).unwrap();
        assert_eq!(m.projects.len(), 2);
        assert_eq!(m.projects[0].identifier.as_str(), "gen");
        assert_eq!(m.projects[1].path, "./tn_EXO.tsv");
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        assert!(Manifest::parse("projects: [unclosed").is_err());
    }

    #[test]
    fn parse_without_projects_is_empty() {
        let m = Manifest::parse("dublin_core:\n  identifier: tn\n").unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn identifier_for_path_exact_match() {
        let m = manifest(&[("gen", "tn_GEN.tsv"), ("exo", "tn_EXO.tsv")]);
        assert_eq!(
            m.identifier_for_path("tn_GEN.tsv").map(ProjectId::as_str),
            Some("gen")
        );
    }

    #[test]
    fn identifier_for_path_matches_dotted_declaration() {
        let m = manifest(&[("gen", "./tn_GEN.tsv")]);
        assert_eq!(
            m.identifier_for_path("tn_GEN.tsv").map(ProjectId::as_str),
            Some("gen")
        );
    }

    #[test]
    fn identifier_for_path_no_match() {
        let m = manifest(&[("gen", "tn_GEN.tsv")]);
        assert_eq!(m.identifier_for_path("tn_RUT.tsv"), None);
    }

    #[test]
    fn identifier_for_path_ambiguous_fails_closed() {
        // The same file declared both dotted and plain is irresolvable.
        let m = manifest(&[("gen", "tn_GEN.tsv"), ("gen2", "./tn_GEN.tsv")]);
        assert_eq!(m.identifier_for_path("tn_GEN.tsv"), None);
    }

    #[test]
    fn path_for_identifier_unique_match() {
        let m = manifest(&[("gen", "./tn_GEN.tsv")]);
        let id = ProjectId::new("gen").unwrap();
        assert_eq!(m.path_for_identifier(&id), Some("./tn_GEN.tsv"));
    }

    #[test]
    fn path_for_identifier_duplicate_fails_closed() {
        let m = manifest(&[("gen", "a.tsv"), ("gen", "b.tsv")]);
        let id = ProjectId::new("gen").unwrap();
        assert_eq!(m.path_for_identifier(&id), None);
    }

    #[test]
    fn path_for_identifier_absent() {
        let m = manifest(&[("gen", "a.tsv")]);
        let id = ProjectId::new("rut").unwrap();
        assert_eq!(m.path_for_identifier(&id), None);
    }

    #[test]
    fn resolve_target_path_across_naming_conventions() {
        let source = manifest(&[("gen", "tn_GEN.tsv")]);
        let target = manifest(&[("gen", "./tn_GEN.tsv")]);
        assert_eq!(
            resolve_target_path(&source, "tn_GEN.tsv", &target),
            Some("./tn_GEN.tsv".to_string())
        );
    }

    #[test]
    fn resolve_target_path_none_propagates() {
        let source = manifest(&[("gen", "tn_GEN.tsv")]);
        let target = manifest(&[("exo", "./tn_EXO.tsv")]);
        // Source lookup fails
        assert_eq!(resolve_target_path(&source, "tn_RUT.tsv", &target), None);
        // Target lookup fails
        assert_eq!(resolve_target_path(&source, "tn_GEN.tsv", &target), None);
        // Empty manifests fail
        assert_eq!(
            resolve_target_path(&Manifest::default(), "tn_GEN.tsv", &target),
            None
        );
    }

    #[test]
    fn resolution_is_composition_of_lookups() {
        let source = manifest(&[("gen", "tn_GEN.tsv"), ("exo", "tn_EXO.tsv")]);
        let target = manifest(&[("gen", "./tn_GEN.tsv"), ("exo", "notes/EXO.tsv")]);
        for path in ["tn_GEN.tsv", "tn_EXO.tsv", "tn_RUT.tsv"] {
            let composed = source
                .identifier_for_path(path)
                .and_then(|id| target.path_for_identifier(id))
                .map(str::to_owned);
            assert_eq!(resolve_target_path(&source, path, &target), composed);
        }
    }
}

//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ProjectId`] - Validated manifest project identifier
//! - [`Fingerprint`] - Content hash used to key session memoization
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use scriptorium::core::types::{Fingerprint, ProjectId};
//!
//! let id = ProjectId::new("gen").unwrap();
//! assert_eq!(id.as_str(), "gen");
//!
//! // Invalid constructions fail at creation time
//! assert!(ProjectId::new("").is_err());
//! assert!(ProjectId::new("has space").is_err());
//!
//! // Fingerprints are stable across calls
//! assert_eq!(Fingerprint::of("abc"), Fingerprint::of("abc"));
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project identifier: {0}")]
    InvalidProjectId(String),
}

/// A validated manifest project identifier.
///
/// Identifiers are the stable key linking a source-language resource file
/// to its target-language counterpart across repositories. They must be:
/// - Non-empty
/// - Free of whitespace and control characters
///
/// # Example
///
/// ```
/// use scriptorium::core::types::ProjectId;
///
/// let id = ProjectId::new("tn_GEN").unwrap();
/// assert_eq!(id.as_str(), "tn_GEN");
///
/// assert!(ProjectId::new("").is_err());
/// assert!(ProjectId::new("a\tb").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new validated project identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectId` if the identifier is empty or
    /// contains whitespace or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Validate a project identifier.
    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidProjectId(
                "identifier cannot be empty".into(),
            ));
        }
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidProjectId(format!(
                "identifier '{}' contains whitespace or control characters",
                id
            )));
        }
        Ok(())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A SHA-256 fingerprint of file content.
///
/// Fingerprints key the session's memoization of resolution and validation
/// results: recomputation happens only when the fingerprint of an input
/// changes, never on mere re-invocation.
///
/// # Example
///
/// ```
/// use scriptorium::core::types::Fingerprint;
///
/// let a = Fingerprint::of("projects: []");
/// let b = Fingerprint::of("projects: []");
/// let c = Fingerprint::of("projects:\n  - identifier: gen");
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a piece of content.
    pub fn of(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_accepts_typical_identifiers() {
        for id in ["gen", "tn_GEN", "obs-tq", "1co"] {
            assert!(ProjectId::new(id).is_ok(), "expected '{}' to be valid", id);
        }
    }

    #[test]
    fn project_id_rejects_empty() {
        assert_eq!(
            ProjectId::new(""),
            Err(TypeError::InvalidProjectId(
                "identifier cannot be empty".into()
            ))
        );
    }

    #[test]
    fn project_id_rejects_whitespace_and_control() {
        assert!(ProjectId::new("a b").is_err());
        assert!(ProjectId::new("a\tb").is_err());
        assert!(ProjectId::new("a\nb").is_err());
        assert!(ProjectId::new("a\u{0}b").is_err());
    }

    #[test]
    fn project_id_serde_roundtrip() {
        let id = ProjectId::new("gen").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gen\"");
        let parsed: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn project_id_serde_rejects_invalid() {
        let result: Result<ProjectId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = Fingerprint::of("");
        // SHA-256 of the empty string
        assert_eq!(
            fp.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn fingerprint_distinguishes_content() {
        assert_ne!(Fingerprint::of("a"), Fingerprint::of("b"));
    }
}

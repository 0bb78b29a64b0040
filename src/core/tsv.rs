//! core::tsv
//!
//! Structural validation for translation-notes TSV resources.
//!
//! # Schema
//!
//! Translation-notes files are tab-separated with a fixed 9-column schema.
//! The header row must match [`TSV_HEADER`] exactly (case- and
//! order-sensitive) and every data row must split into exactly
//! [`TSV_COLUMNS`] cells. Violations are collected as critical notices,
//! never corrected: validation is a read-only check.
//!
//! # Notices
//!
//! Each notice carries a deep link to the offending line in the file's
//! blame view (the browse URL with `/src/` replaced by `/blame/` plus a
//! `#L<n>` anchor), the 1-based line number, and a human-readable message.
//!
//! # Statuses
//!
//! A report is `Pending` while no content has loaded, `Valid` when the
//! document conforms (or the file is not a TSV resource at all), and
//! `Invalid` when critical notices were found. The three states are
//! distinct; collapsing "still loading" into either outcome is a defect.

use serde::Serialize;

/// Exact header row required of a translation-notes TSV file.
pub const TSV_HEADER: &str =
    "Book\tChapter\tVerse\tID\tSupportReference\tOrigQuote\tOccurrence\tGLQuote\tOccurrenceNote";

/// Number of columns in the fixed schema.
pub const TSV_COLUMNS: usize = 9;

/// File extension subject to row validation.
pub const TSV_EXTENSION: &str = ".tsv";

/// A validation diagnostic that blocks proceeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalNotice {
    /// Deep link to the offending line in the file's blame view.
    pub location: String,
    /// 1-based line number (line 1 is the header).
    pub line: usize,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for CriticalNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TsvStatus {
    /// No content has loaded yet; validation has not run.
    Pending,
    /// Content loaded and structurally valid.
    Valid,
    /// Content loaded with critical notices present.
    Invalid,
}

impl std::fmt::Display for TsvStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TsvStatus::Pending => write!(f, "pending"),
            TsvStatus::Valid => write!(f, "valid"),
            TsvStatus::Invalid => write!(f, "invalid"),
        }
    }
}

/// Result of validating one file's content.
///
/// Produced fresh per validation pass and consumed immediately by the
/// caller to decide whether saving may proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TsvReport {
    /// Overall outcome.
    pub status: TsvStatus,
    /// Critical notices, in document order. Empty unless `Invalid`.
    pub notices: Vec<CriticalNotice>,
}

impl TsvReport {
    /// Report for a file whose content has not loaded yet.
    pub fn pending() -> Self {
        Self {
            status: TsvStatus::Pending,
            notices: Vec::new(),
        }
    }

    /// Report for a structurally valid (or non-TSV) file.
    pub fn valid() -> Self {
        Self {
            status: TsvStatus::Valid,
            notices: Vec::new(),
        }
    }

    /// Report carrying critical notices.
    pub fn invalid(notices: Vec<CriticalNotice>) -> Self {
        Self {
            status: TsvStatus::Invalid,
            notices,
        }
    }

    /// Whether the file may be saved/edited past this report.
    ///
    /// `Pending` and `Invalid` both block; only a loaded, conforming file
    /// may proceed.
    pub fn permits_saving(&self) -> bool {
        self.status == TsvStatus::Valid
    }
}

/// Build the blame deep link for a line of the file.
///
/// The browse URL points at the `src` view; substituting `blame` yields a
/// view with per-line anchors and history attribution.
fn blame_link(html_url: &str, line: usize) -> String {
    format!("{}#L{}", html_url.replace("/src/", "/blame/"), line)
}

/// Validate raw file content against the translation-notes TSV schema.
///
/// - `content` of `None` yields a `Pending` report (nothing loaded yet).
/// - Files whose name does not end in `.tsv` are trivially `Valid`.
/// - Otherwise the document is trimmed of trailing whitespace, split on
///   line feeds, and checked row by row: the header must equal
///   [`TSV_HEADER`] exactly and every data row must have exactly
///   [`TSV_COLUMNS`] tab-separated cells.
///
/// Empty content is reported as a header mismatch on line 1, not a crash.
pub fn validate(name: &str, html_url: &str, content: Option<&str>) -> TsvReport {
    let Some(content) = content else {
        return TsvReport::pending();
    };
    if !name.ends_with(TSV_EXTENSION) {
        // Non-TSV resources are out of scope for row validation.
        return TsvReport::valid();
    }

    let mut notices = Vec::new();
    // Trailing blank lines must not trigger spurious column-count errors.
    let mut rows = content.trim_end().split('\n');

    // split always yields at least one (possibly empty) row
    let header = rows.next().unwrap_or_default();
    if header != TSV_HEADER {
        notices.push(CriticalNotice {
            location: blame_link(html_url, 1),
            line: 1,
            message: format!(
                "Bad TSV Header, expecting \"{}\"",
                TSV_HEADER.replace('\t', ", ")
            ),
        });
    }

    for (index, row) in rows.enumerate() {
        let line = index + 2;
        let found = row.split('\t').count();
        if found < TSV_COLUMNS {
            notices.push(CriticalNotice {
                location: blame_link(html_url, line),
                line,
                message: format!(
                    "Not enough columns, expecting {}, found {}",
                    TSV_COLUMNS, found
                ),
            });
        } else if found > TSV_COLUMNS {
            notices.push(CriticalNotice {
                location: blame_link(html_url, line),
                line,
                message: format!(
                    "Too many columns, expecting {}, found {}",
                    TSV_COLUMNS, found
                ),
            });
        }
    }

    if notices.is_empty() {
        TsvReport::valid()
    } else {
        TsvReport::invalid(notices)
    }
}

//! validate command - Check a local TSV file against the fixed schema

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::tsv::{self, TsvStatus};
use crate::diag::Verbosity;

/// Validate a local translation-notes TSV file.
///
/// Prints one line per critical notice and fails when any were found.
pub fn validate(file: &Path, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    // Local files have no browse URL; the location link degrades to a
    // file URL with the same line anchor.
    let html_url = format!("file://{}", file.display());

    let report = tsv::validate(&name, &html_url, Some(&content));
    match report.status {
        TsvStatus::Valid => {
            if ctx.verbosity != Verbosity::Quiet {
                println!("{}: valid", file.display());
            }
            Ok(())
        }
        TsvStatus::Invalid => {
            for notice in &report.notices {
                println!("{}", notice);
                if ctx.verbosity == Verbosity::Debug {
                    println!("  at {}", notice.location);
                }
            }
            bail!(
                "{}: {} critical notice(s)",
                file.display(),
                report.notices.len()
            );
        }
        // Content was just read, so a pending report cannot occur here.
        TsvStatus::Pending => unreachable!("content was provided"),
    }
}

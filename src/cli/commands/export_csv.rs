//! export-csv command - Convert a TSV resource to spreadsheet CSV

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::csv;
use crate::diag::Diagnostics as _;

/// Convert a TSV file to CSV with a UTF-8 BOM and CRLF row endings.
pub fn export_csv(file: &Path, output: Option<&Path>, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let csv = csv::from_tsv(&content);

    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("writing {}", path.display()))?;
            ctx.diag
                .info(&format!("wrote {} bytes to {}", csv.len(), path.display()));
        }
        None => print!("{}", csv),
    }
    Ok(())
}

//! resolve command - Resolve a target path from two local manifests

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::manifest::{resolve_target_path, Manifest};
use crate::diag::Diagnostics as _;

/// Read and leniently parse a manifest file, warning on malformed input.
fn load_manifest(path: &Path, role: &str, ctx: &Context) -> Result<Manifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {} manifest {}", role, path.display()))?;
    Ok(match Manifest::parse(&text) {
        Ok(manifest) => manifest,
        Err(e) => {
            ctx.diag
                .warn(&format!("{} manifest is malformed: {}", role, e));
            Manifest::default()
        }
    })
}

/// Resolve the target-language path for `path` across two manifests.
pub fn resolve(
    source_manifest: &Path,
    target_manifest: &Path,
    path: &str,
    ctx: &Context,
) -> Result<()> {
    let source = load_manifest(source_manifest, "source", ctx)?;
    let target = load_manifest(target_manifest, "target", ctx)?;

    match resolve_target_path(&source, path, &target) {
        Some(target_path) => {
            println!("{}", target_path);
            Ok(())
        }
        None => bail!("no unique target path for '{}'", path),
    }
}

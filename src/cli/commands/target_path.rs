//! target-path command - Resolve a target path against server manifests

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::forge::gitea::GiteaForge;
use crate::forge::{Forge, RemoteState, RepoRef};
use crate::session::Session;

/// Fetch both repositories' manifests from the configured server and
/// resolve the target-language path for `path`.
///
/// Read-only: no file is fetched or created on the target side.
pub fn target_path(
    source_repo: &str,
    target_repo: &str,
    path: &str,
    token: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let source = RepoRef::parse(source_repo).context("parsing --source-repo")?;
    let target = RepoRef::parse(target_repo).context("parsing --target-repo")?;
    let forge = GiteaForge::with_server(&ctx.config.server, token);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let resolved = runtime.block_on(async {
        let source_manifest = RemoteState::from_result(forge.fetch_manifest(&source).await);
        let target_manifest = RemoteState::from_result(forge.fetch_manifest(&target).await);
        let mut session = Session::new(ctx.diag.clone());
        session.resolve_target_path(&source_manifest, path, &target_manifest)
    });

    match resolved {
        Some(target_path) => {
            println!("{}", target_path);
            Ok(())
        }
        None => bail!(
            "no unique target path for '{}' between {} and {}",
            path,
            source,
            target
        ),
    }
}

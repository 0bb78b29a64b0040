//! End-to-end tests for the resolve -> load -> validate flow over the
//! mock forge.

use scriptorium::core::tsv::{TsvStatus, TSV_HEADER};
use scriptorium::forge::mock::{FailOn, MockForge, MockOperation};
use scriptorium::forge::{FileState, Forge, ForgeError, RepoRef};
use scriptorium::session::{Session, TargetSync};

const SOURCE_MANIFEST: &str = "\
projects:
  - identifier: gen
    path: tn_GEN.tsv
";

const TARGET_MANIFEST: &str = "\
projects:
  - identifier: gen
    path: ./tn_GEN.tsv
";

fn source_repo() -> RepoRef {
    RepoRef::new("Door43-Catalog", "en_tn")
}

fn target_repo() -> RepoRef {
    RepoRef::new("xyz", "xyz_tn")
}

fn valid_tsv() -> String {
    format!("{}\n{}", TSV_HEADER, vec!["x"; 9].join("\t"))
}

async fn source_file(forge: &MockForge) -> FileState {
    forge
        .fetch_file(&source_repo(), "tn_GEN.tsv", None)
        .await
        .expect("seeded source file")
}

#[tokio::test]
async fn resolves_loads_and_validates() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(&target_repo(), TARGET_MANIFEST)
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv())
        .with_file(&target_repo(), "./tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("sync succeeds");

    match sync {
        TargetSync::Resolved { path, file, report } => {
            assert_eq!(path, "./tn_GEN.tsv");
            assert_eq!(file.content, valid_tsv());
            assert_eq!(report.status, TsvStatus::Valid);
        }
        other => panic!("expected resolved target, got {:?}", other),
    }
}

#[tokio::test]
async fn unresolved_path_suppresses_target_fetch() {
    // Target manifest has no matching identifier.
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(
            &target_repo(),
            "projects:\n  - identifier: exo\n    path: ./tn_EXO.tsv\n",
        )
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    let before = forge.operations().len();
    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("unresolved is not an error");

    assert_eq!(sync, TargetSync::Unresolved);
    assert!(!sync.permits_saving());

    // Only manifest fetches happened after the source load; no file fetch
    // against the target repository was attempted.
    let after: Vec<_> = forge.operations().split_off(before);
    assert!(after
        .iter()
        .all(|op| matches!(op, MockOperation::FetchManifest { .. })));
}

#[tokio::test]
async fn missing_target_file_is_created_from_source_content() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(&target_repo(), TARGET_MANIFEST)
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("sync succeeds");

    match sync {
        TargetSync::Resolved { file, report, .. } => {
            assert_eq!(file.content, valid_tsv());
            assert_eq!(report.status, TsvStatus::Valid);
        }
        other => panic!("expected resolved target, got {:?}", other),
    }
    // The target file now exists with the source content as its seed.
    assert_eq!(
        forge.file_content(&target_repo(), "./tn_GEN.tsv"),
        Some(valid_tsv())
    );
    assert!(forge.operations().contains(&MockOperation::FetchFile {
        repo: "xyz/xyz_tn".to_string(),
        path: "./tn_GEN.tsv".to_string(),
        created: true,
    }));
}

#[tokio::test]
async fn invalid_target_content_blocks_saving() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(&target_repo(), TARGET_MANIFEST)
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv())
        .with_file(
            &target_repo(),
            "./tn_GEN.tsv",
            &format!("{}\nonly\ttwo", TSV_HEADER),
        );

    let source = source_file(&forge).await;
    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("sync succeeds");

    assert!(!sync.permits_saving());
    match sync {
        TargetSync::Resolved { report, .. } => {
            assert_eq!(report.status, TsvStatus::Invalid);
            assert_eq!(report.notices.len(), 1);
            assert_eq!(report.notices[0].line, 2);
        }
        other => panic!("expected resolved target, got {:?}", other),
    }
}

#[tokio::test]
async fn manifest_fetch_failure_degrades_to_unresolved() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(&target_repo(), TARGET_MANIFEST)
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    forge.set_fail_on(FailOn::FetchManifest(ForgeError::RateLimited));

    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("manifest failure is not a hard error");
    assert_eq!(sync, TargetSync::Unresolved);
}

#[tokio::test]
async fn ambiguous_target_manifest_fails_closed() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(
            &target_repo(),
            "projects:\n  - identifier: gen\n    path: a.tsv\n  - identifier: gen\n    path: b.tsv\n",
        )
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    let mut session = Session::default();
    let sync = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("ambiguity is not a hard error");
    assert_eq!(sync, TargetSync::Unresolved);
}

#[tokio::test]
async fn repeated_sync_is_idempotent() {
    let forge = MockForge::new()
        .with_manifest(&source_repo(), SOURCE_MANIFEST)
        .with_manifest(&target_repo(), TARGET_MANIFEST)
        .with_file(&source_repo(), "tn_GEN.tsv", &valid_tsv())
        .with_file(&target_repo(), "./tn_GEN.tsv", &valid_tsv());

    let source = source_file(&forge).await;
    let mut session = Session::default();
    let first = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("sync succeeds");
    let second = session
        .sync_target(&forge, &source_repo(), &target_repo(), &source)
        .await
        .expect("sync succeeds");
    assert_eq!(first, second);
}

//! Property-based tests for manifest resolution and TSV validation.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use scriptorium::core::manifest::{resolve_target_path, Manifest, Project};
use scriptorium::core::tsv::{self, TsvStatus, TSV_HEADER};
use scriptorium::core::types::ProjectId;

const URL: &str = "https://git.example.org/o/r/src/branch/master/tn_GEN.tsv";

/// Strategy for short lowercase identifiers.
fn identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,7}").expect("valid regex")
}

/// Strategy for a set of distinct file stems.
fn distinct_stems() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(identifier(), 1..8)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

/// Build a manifest whose i-th project is `id<i>` at `<stem>.tsv`,
/// optionally declared with a `./` prefix.
fn manifest_from(stems: &[String], dotted: &[bool]) -> Manifest {
    Manifest {
        projects: stems
            .iter()
            .zip(dotted)
            .enumerate()
            .map(|(i, (stem, dot))| Project {
                identifier: ProjectId::new(format!("id{}", i)).expect("valid id"),
                path: if *dot {
                    format!("./{}.tsv", stem)
                } else {
                    format!("{}.tsv", stem)
                },
            })
            .collect(),
    }
}

proptest! {
    /// With distinct paths, every project is found by its path whether or
    /// not the declaration carries a leading `./`.
    #[test]
    fn unique_paths_always_resolve(
        stems in distinct_stems(),
        dotted in prop::collection::vec(any::<bool>(), 8),
    ) {
        let manifest = manifest_from(&stems, &dotted[..stems.len()]);
        for (i, stem) in stems.iter().enumerate() {
            let found = manifest.identifier_for_path(&format!("{}.tsv", stem));
            let expected = format!("id{}", i);
            prop_assert_eq!(found.map(ProjectId::as_str), Some(expected.as_str()));
        }
    }

    /// Duplicating any project's path makes that path irresolvable.
    #[test]
    fn duplicate_paths_fail_closed(
        stems in distinct_stems(),
        index in any::<prop::sample::Index>(),
    ) {
        let dotted = vec![false; stems.len()];
        let mut manifest = manifest_from(&stems, &dotted);
        let dup = index.index(stems.len());
        let mut clone = manifest.projects[dup].clone();
        clone.identifier = ProjectId::new("dup").expect("valid id");
        manifest.projects.push(clone);

        let path = format!("{}.tsv", stems[dup]);
        prop_assert_eq!(manifest.identifier_for_path(&path), None);
    }

    /// Unique identifiers are always found; duplicated ones never are.
    #[test]
    fn identifier_lookup_requires_uniqueness(
        stems in distinct_stems(),
        index in any::<prop::sample::Index>(),
    ) {
        let dotted = vec![false; stems.len()];
        let mut manifest = manifest_from(&stems, &dotted);
        for i in 0..stems.len() {
            let id = ProjectId::new(format!("id{}", i)).expect("valid id");
            prop_assert!(manifest.path_for_identifier(&id).is_some());
        }

        let dup = index.index(stems.len());
        let mut clone = manifest.projects[dup].clone();
        clone.path = "elsewhere.tsv".to_string();
        manifest.projects.push(clone);
        let id = ProjectId::new(format!("id{}", dup)).expect("valid id");
        prop_assert_eq!(manifest.path_for_identifier(&id), None);
    }

    /// Resolution equals the composition of the two lookups, with `None`
    /// propagating.
    #[test]
    fn resolution_is_lookup_composition(
        source_stems in distinct_stems(),
        target_stems in distinct_stems(),
        source_dotted in prop::collection::vec(any::<bool>(), 8),
        target_dotted in prop::collection::vec(any::<bool>(), 8),
        query in identifier(),
    ) {
        let source = manifest_from(&source_stems, &source_dotted[..source_stems.len()]);
        let target = manifest_from(&target_stems, &target_dotted[..target_stems.len()]);
        let path = format!("{}.tsv", query);

        let composed = source
            .identifier_for_path(&path)
            .and_then(|id| target.path_for_identifier(id))
            .map(str::to_owned);
        prop_assert_eq!(resolve_target_path(&source, &path, &target), composed);
    }
}

/// Strategy for cell text free of tabs and line breaks.
///
/// Cells are non-empty and spaceless: the validator trims trailing
/// whitespace from the whole document, so a final row ending in empty
/// cells genuinely loses columns and is out of scope here.
fn cell() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9,\\.\"']{1,8}").expect("valid regex")
}

/// Strategy for a row with exactly `n` columns.
fn row(n: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(cell(), n).prop_map(|cells| cells.join("\t"))
}

proptest! {
    /// A document with the exact header and all-9-column rows is valid
    /// regardless of cell content.
    #[test]
    fn conforming_documents_validate(rows in prop::collection::vec(row(9), 0..12)) {
        let mut lines = vec![TSV_HEADER.to_string()];
        lines.extend(rows);
        let report = tsv::validate("tn_GEN.tsv", URL, Some(&lines.join("\n")));
        prop_assert_eq!(report.status, TsvStatus::Valid);
        prop_assert!(report.notices.is_empty());
    }

    /// A single off-schema row produces exactly one notice at its line,
    /// naming the actual column count.
    #[test]
    fn off_schema_row_is_located(
        good in prop::collection::vec(row(9), 0..6),
        bad_columns in (1usize..20).prop_filter("must differ from schema", |n| *n != 9),
        position in any::<prop::sample::Index>(),
    ) {
        let mut rows = good;
        let at = position.index(rows.len() + 1);
        let bad = vec!["x"; bad_columns].join("\t");
        rows.insert(at, bad);

        let mut lines = vec![TSV_HEADER.to_string()];
        lines.extend(rows);
        let report = tsv::validate("tn_GEN.tsv", URL, Some(&lines.join("\n")));

        prop_assert_eq!(report.status, TsvStatus::Invalid);
        prop_assert_eq!(report.notices.len(), 1);
        let notice = &report.notices[0];
        // Header is line 1; the inserted row lands at line at+2.
        prop_assert_eq!(notice.line, at + 2);
        let expected_kind = if bad_columns < 9 { "Not enough columns" } else { "Too many columns" };
        prop_assert!(notice.message.starts_with(expected_kind));
        let expected_suffix = format!("found {}", bad_columns);
        prop_assert!(notice.message.ends_with(&expected_suffix));
        let expected_location = format!("#L{}", at + 2);
        prop_assert!(notice.location.ends_with(&expected_location));
    }

    /// Trailing newlines never change the outcome.
    #[test]
    fn trailing_newlines_are_inert(
        rows in prop::collection::vec(row(9), 0..6),
        extra in 1usize..5,
    ) {
        let mut lines = vec![TSV_HEADER.to_string()];
        lines.extend(rows);
        let document = lines.join("\n");
        let padded = format!("{}{}", document, "\n".repeat(extra));
        prop_assert_eq!(
            tsv::validate("tn_GEN.tsv", URL, Some(&document)),
            tsv::validate("tn_GEN.tsv", URL, Some(&padded))
        );
    }

    /// Files not named `.tsv` validate regardless of content.
    #[test]
    fn non_tsv_names_always_valid(content in "[ -~\\n\\t]{0,200}") {
        let report = tsv::validate("intro.md", URL, Some(&content));
        prop_assert_eq!(report.status, TsvStatus::Valid);
    }
}

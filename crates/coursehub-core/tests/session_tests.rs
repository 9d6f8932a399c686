//! Full runs over on-disk sources

use coursehub_core::{
    CompletionStatus, ConfigResolver, Error, ReconcileSession, RunMode, SourceOverrides,
};
use coursehub_fs::{NormalizedPath, compute_file_checksum};
use coursehub_test_utils::TestWorkspace;
use coursehub_test_utils::fixtures::{catalog_row, core_rules, major_rules, registry_row};
use coursehub_test_utils::workspace::REGISTRY_PATH;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;

fn fnce_workspace() -> TestWorkspace {
    TestWorkspace::new()
        .with_catalog(json!([catalog_row("FNCE101", "Corp Finance", Some(1.0))]))
        .with_registry(json!([
            registry_row("FNCE101", "Corporate Finance", Some(0.5), false, "manual"),
            registry_row("LANG999", "Latin Reading", None, true, "non_wharton"),
        ]))
        .with_core_rules(core_rules(&[("CORE", &["FNCE101"])]))
        .with_major_rules(major_rules(&[("FNCE", &["FNCE101"])]))
}

fn session(ws: &TestWorkspace) -> ReconcileSession {
    let config = ConfigResolver::new(NormalizedPath::new(ws.root()))
        .resolve()
        .unwrap();
    ReconcileSession::new(config)
}

#[test]
fn report_mode_never_writes() {
    let ws = fnce_workspace();
    let before = compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap();

    let outcome = session(&ws).run(RunMode::Report).unwrap();

    assert_eq!(outcome.reconciliation.summary.total_auto_fixable, 3);
    assert_eq!(outcome.applied, 0);
    assert!(!outcome.registry_written);
    assert_eq!(compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap(), before);
}

#[test]
fn apply_writes_sorted_corrected_registry() {
    let ws = fnce_workspace();

    let outcome = session(&ws).run(RunMode::Apply).unwrap();
    assert_eq!(outcome.applied, 3);
    assert!(outcome.registry_written);
    assert_eq!(outcome.status(), CompletionStatus::Success);

    let registry = ws.read_json(REGISTRY_PATH);
    assert_eq!(
        registry,
        json!([
            {
                "course_id": "FNCE101",
                "course_title": "Corp Finance",
                "credit_units": 1.0,
                "currently_offered": true,
                "catalog_source": "catalog",
            },
            {
                "course_id": "LANG999",
                "course_title": "Latin Reading",
                "credit_units": null,
                "currently_offered": true,
                "catalog_source": "non_wharton",
            },
        ])
    );
    assert!(ws.registry_text().ends_with("]\n"));
}

#[test]
fn second_apply_is_a_no_op() {
    let ws = fnce_workspace();
    session(&ws).run(RunMode::Apply).unwrap();
    let after_first = compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap();

    let second = session(&ws).run(RunMode::Apply).unwrap();

    assert_eq!(second.applied, 0);
    assert!(!second.registry_written);
    assert!(second.reconciliation.changes.is_empty());
    assert_eq!(compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap(), after_first);
}

#[test]
fn malformed_rules_abort_before_any_write() {
    let ws = fnce_workspace().with_major_rules(json!({
        "majors": {
            "MGMT": {
                "requirement_structure": "COMBINED",
                "requirements": { "elective_courses": { "courses": ["MGMT6110"] } }
            }
        }
    }));
    let before = compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap();

    let err = session(&ws).run(RunMode::Apply).unwrap_err();

    match err {
        Error::MalformedRule { document, field, .. } => {
            assert!(document.ends_with("wharton_mba_major_requirements.json"));
            assert_eq!(field, "majors.MGMT.requirements.required_courses");
        }
        other => panic!("expected MalformedRule, got {other:?}"),
    }
    assert_eq!(compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap(), before);
}

#[test]
fn wrong_typed_rule_list_names_the_field() {
    let ws = fnce_workspace().with_major_rules(json!({
        "majors": {
            "FNCE": {
                "requirement_structure": "ELECTIVES",
                "requirements": { "elective_courses": { "courses": "FNCE6110" } }
            }
        }
    }));
    let before = compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap();

    let err = session(&ws).run(RunMode::Apply).unwrap_err();

    match err {
        Error::MalformedRule { document, field, reason } => {
            assert!(document.ends_with("wharton_mba_major_requirements.json"));
            assert_eq!(field, "majors.FNCE.requirements.elective_courses.courses");
            assert!(reason.contains("expected a sequence"), "got {reason}");
        }
        other => panic!("expected MalformedRule, got {other:?}"),
    }
    assert_eq!(compute_file_checksum(&ws.path(REGISTRY_PATH)).unwrap(), before);
}

#[test]
fn duplicate_registry_id_is_rejected() {
    let ws = fnce_workspace().with_registry(json!([
        registry_row("FNCE101", "Corp Finance", Some(1.0), true, "catalog"),
        registry_row("FNCE101", "Corp Finance", Some(1.0), true, "catalog"),
    ]));

    let err = session(&ws).run(RunMode::Report).unwrap_err();
    assert!(matches!(err, Error::DuplicateEntity { ref id, .. } if id == "FNCE101"));
}

#[test]
fn missing_catalog_is_an_fs_error() {
    let ws = TestWorkspace::new()
        .with_registry(json!([]))
        .with_core_rules(core_rules(&[]))
        .with_major_rules(major_rules(&[]));

    let err = session(&ws).run(RunMode::Report).unwrap_err();
    assert!(matches!(err, Error::Fs(_)), "got {err:?}");
}

#[test]
fn yaml_registry_via_override() {
    let ws = fnce_workspace();
    ws.write_file(
        "data/registry.yaml",
        "- course_id: FNCE101\n  course_title: Corp Finance\n  credit_units: 1.0\n  currently_offered: true\n  catalog_source: catalog\n",
    );
    let config = ConfigResolver::new(NormalizedPath::new(ws.root()))
        .with_overrides(SourceOverrides {
            registry: Some(PathBuf::from("data/registry.yaml")),
            ..Default::default()
        })
        .resolve()
        .unwrap();

    let outcome = ReconcileSession::new(config).run(RunMode::Report).unwrap();
    assert!(outcome.reconciliation.changes.is_empty());
    assert_eq!(outcome.reconciliation.summary.registry_entries, 1);
}

#[test]
fn summary_counts_sources() {
    let ws = fnce_workspace();
    let summary = session(&ws).summary().unwrap();

    assert_eq!(summary.catalog_entries, 1);
    assert_eq!(summary.registry_entries, 2);
    assert_eq!(summary.reference_ids, 1);
    assert_eq!(summary.offered, 1);
    assert_eq!(summary.not_offered, 1);
    assert_eq!(summary.external, 1);
}

#[test]
fn config_file_institution_changes_labels() {
    let ws = TestWorkspace::new()
        .with_catalog(json!([]))
        .with_registry(json!([]))
        .with_core_rules(core_rules(&[("CORE", &["CIS5150"])]))
        .with_major_rules(major_rules(&[]))
        .with_config("[institution]\nname = \"Penn\"\nnative_prefixes = [\"CIS\"]\n");

    let outcome = session(&ws).run(RunMode::Report).unwrap();
    let reference = &outcome.reconciliation.new_references[0];
    assert_eq!(reference.label, "Penn");
    assert_eq!(outcome.status(), CompletionStatus::AttentionNeeded);
}

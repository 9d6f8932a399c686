//! Mission-based Integration Tests
//!
//! Multi-run scenarios over a real on-disk workspace: a registry carried
//! across catalog regenerations, rule edits and repeated apply runs.

use coursehub_core::{
    CompletionStatus, ConfigResolver, ReconcileSession, RunMode, RunOutcome, SourceTag,
};
use coursehub_fs::{NormalizedPath, compute_file_checksum};
use coursehub_test_utils::TestWorkspace;
use coursehub_test_utils::fixtures::{catalog_row, core_rules, major_rules, registry_row};
use coursehub_test_utils::workspace::REGISTRY_PATH;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn run(ws: &TestWorkspace, mode: RunMode) -> RunOutcome {
    let config = ConfigResolver::new(NormalizedPath::new(ws.root()))
        .resolve()
        .unwrap();
    ReconcileSession::new(config).run(mode).unwrap()
}

fn registry_checksum(ws: &TestWorkspace, rel: &str) -> String {
    compute_file_checksum(&ws.path(rel)).unwrap()
}

fn entry<'a>(registry: &'a Value, course_id: &str) -> &'a Value {
    registry
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["course_id"] == course_id)
        .unwrap_or_else(|| panic!("{course_id} not in registry"))
}

/// Fall term: four registered courses, one cross-institution elective.
fn fall_term() -> TestWorkspace {
    TestWorkspace::new()
        .with_catalog(json!([
            catalog_row("ACCT6110", "Financial Accounting", Some(1.0)),
            catalog_row("FNCE6110", "Corporate Finance", Some(1.0)),
            catalog_row("MGMT6100", "Teamwork and Leadership", Some(0.5)),
        ]))
        .with_registry(json!([
            registry_row("MGMT6100", "Teams", Some(0.5), false, "manual"),
            registry_row("FNCE6110", "Corporate Finance", Some(1.0), true, "catalog"),
            registry_row("ACCT6110", "Financial Accounting", Some(0.5), true, "catalog"),
            registry_row("ECON7100", "Macroeconomics", Some(1.0), true, "non_wharton"),
        ]))
        .with_core_rules(core_rules(&[
            ("ACCT_CORE", &["ACCT6110"]),
            ("MGMT_CORE", &["MGMT6100"]),
        ]))
        .with_major_rules(major_rules(&[("FNCE", &["FNCE6110", "ECON7100"])]))
}

// =============================================================================
// Missions
// =============================================================================

/// Applying the same inputs twice changes nothing the second time.
#[test]
fn mission_apply_is_idempotent() {
    let ws = fall_term();

    let first = run(&ws, RunMode::Apply);
    assert_eq!(first.applied, 3);
    assert!(first.registry_written);
    let checksum = registry_checksum(&ws, REGISTRY_PATH);

    let second = run(&ws, RunMode::Apply);
    assert_eq!(second.applied, 0);
    assert!(!second.registry_written);
    assert_eq!(registry_checksum(&ws, REGISTRY_PATH), checksum);
}

/// Report mode never touches the registry, however many deltas exist.
#[test]
fn mission_report_mode_is_read_only() {
    let ws = fall_term();
    let checksum = registry_checksum(&ws, REGISTRY_PATH);

    for _ in 0..3 {
        let outcome = run(&ws, RunMode::Report);
        assert_eq!(outcome.reconciliation.summary.total_auto_fixable, 3);
        assert!(!outcome.registry_written);
    }
    assert_eq!(registry_checksum(&ws, REGISTRY_PATH), checksum);
}

/// The spring catalog drops one course and brings a manual one back.
#[test]
fn mission_term_rollover() {
    let ws = fall_term();
    run(&ws, RunMode::Apply);

    let ws = ws
        .with_catalog(json!([
            catalog_row("ACCT6110", "Financial Accounting", Some(1.0)),
            catalog_row("MGMT6100", "Teamwork and Leadership", Some(0.5)),
            catalog_row("STAT6130", "Regression Analysis", Some(1.0)),
        ]))
        .with_major_rules(major_rules(&[("FNCE", &["FNCE6110", "ECON7100", "STAT6130"])]));

    let report = run(&ws, RunMode::Report);
    assert_eq!(report.reconciliation.offered.no_longer_offered, vec!["FNCE6110".to_string()]);
    assert_eq!(report.reconciliation.new_reference_ids(), vec!["STAT6130"]);
    assert_eq!(report.status(), CompletionStatus::AttentionNeeded);

    let applied = run(&ws, RunMode::Apply);
    assert_eq!(applied.applied, 1);
    assert_eq!(applied.status(), CompletionStatus::AttentionNeeded);

    let registry = ws.read_json(REGISTRY_PATH);
    let fnce = entry(&registry, "FNCE6110");
    assert_eq!(fnce["currently_offered"], false);
    assert_eq!(fnce["catalog_source"], SourceTag::Manual.as_str());

    let econ = entry(&registry, "ECON7100");
    assert_eq!(econ["currently_offered"], true);
    assert_eq!(econ["catalog_source"], "non_wharton");

    // A course needing manual registration is never added automatically.
    assert!(registry.as_array().unwrap().iter().all(|e| e["course_id"] != "STAT6130"));
}

/// After apply the registry is sorted and agrees with the catalog.
#[test]
fn mission_registry_converges_to_catalog() {
    let ws = fall_term();
    run(&ws, RunMode::Apply);

    let registry = ws.read_json(REGISTRY_PATH);
    let ids: Vec<&str> = registry
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["course_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ACCT6110", "ECON7100", "FNCE6110", "MGMT6100"]);

    let catalog = ws.read_json("scripts/cleaned_courses.json");
    for row in catalog.as_array().unwrap() {
        let course = entry(&registry, row["Course_ID"].as_str().unwrap());
        assert_eq!(course["course_title"], row["Course_Title"]);
        assert_eq!(course["credit_units"], row["Credit_Units"]);
        assert_eq!(course["currently_offered"], true);
    }
}

/// Fields the engine does not model, and absent or null credit units,
/// survive an apply untouched.
#[test]
fn mission_unknown_registry_fields_survive_apply() {
    let ws = fall_term().with_registry(json!([
        {
            "course_id": "MGMT6100",
            "course_title": "Teams",
            "department": "MGMT",
            "credit_units": 0.5,
            "is_wharton": true,
            "currently_offered": false,
            "catalog_source": "manual",
            "notes": "cross-listed with WHCP",
        },
        {
            "course_id": "ECON7100",
            "course_title": "Macroeconomics",
            "currently_offered": true,
            "catalog_source": "non_wharton",
        },
        {
            "course_id": "LANG999",
            "course_title": "Latin Reading",
            "credit_units": null,
            "currently_offered": true,
            "catalog_source": "non_wharton",
        },
    ]));

    run(&ws, RunMode::Apply);

    let registry = ws.read_json(REGISTRY_PATH);
    let mgmt = entry(&registry, "MGMT6100");
    assert_eq!(mgmt["notes"], "cross-listed with WHCP");
    assert_eq!(mgmt["department"], "MGMT");
    assert_eq!(mgmt["is_wharton"], true);
    assert_eq!(mgmt["course_title"], "Teamwork and Leadership");

    let econ = entry(&registry, "ECON7100").as_object().unwrap();
    assert!(!econ.contains_key("credit_units"));
    let latin = entry(&registry, "LANG999").as_object().unwrap();
    assert_eq!(latin.get("credit_units"), Some(&Value::Null));
}

/// A YAML registry named in coursehub.toml is written back as YAML.
#[test]
fn mission_yaml_registry_round_trip() {
    let ws = fall_term().with_config("[sources]\nregistry = \"data/registry.yaml\"\n");
    ws.write_file(
        "data/registry.yaml",
        "- course_id: MGMT6100\n  course_title: Teams\n  credit_units: 0.5\n  currently_offered: false\n  catalog_source: manual\n",
    );

    let outcome = run(&ws, RunMode::Apply);
    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.registry_path.file_name(), Some("registry.yaml"));

    let written: Value = serde_yaml::from_str(&ws.read_file("data/registry.yaml")).unwrap();
    assert_eq!(written[0]["course_title"], "Teamwork and Leadership");
    assert_eq!(written[0]["catalog_source"], "catalog");
    let checksum = registry_checksum(&ws, "data/registry.yaml");

    let again = run(&ws, RunMode::Apply);
    assert_eq!(again.applied, 0);
    assert_eq!(registry_checksum(&ws, "data/registry.yaml"), checksum);
}

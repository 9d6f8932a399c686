//! Reconciliation scenarios over in-memory record sets

use coursehub_core::engine::{Category, FieldValue, RecordField};
use coursehub_core::model::{CoreRequirement, CoreRequirementsDocument};
use coursehub_core::{
    Catalog, CatalogEntry, CompletionStatus, Institution, Registry, RegistryEntry, RuleDocument,
    SourceTag, apply_changes, extract_references, reconcile,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rules_referencing(ids: &[&str]) -> Vec<RuleDocument> {
    vec![RuleDocument::core(
        "core.json",
        CoreRequirementsDocument {
            core_requirements: Some(vec![CoreRequirement {
                core_code: Some("CORE".to_string()),
                courses: Some(ids.iter().map(|id| id.to_string()).collect()),
            }]),
        },
    )]
}

#[test]
fn fnce101_gets_three_corrections() {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("FNCE101", "Corp Finance", Some(1.0))]);
    let mut registry = Registry::from_entries(vec![RegistryEntry::new(
        "FNCE101",
        "Corporate Finance",
        Some(0.5),
        false,
        SourceTag::Manual,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&["FNCE101"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());

    assert_eq!(result.offered.newly_offered, vec!["FNCE101".to_string()]);
    assert_eq!(result.changes.credit_updates[0].credit_units, 1.0);
    assert_eq!(result.changes.title_updates[0].title, "Corp Finance");
    assert_eq!(result.summary.total_auto_fixable, 3);
    assert!(result.new_reference_ids().is_empty());
    assert!(result.orphaned_ids().is_empty());
    assert_eq!(result.status(), CompletionStatus::Success);

    let applied = apply_changes(&result.changes, &mut registry).unwrap();
    assert_eq!(applied, 3);

    let entry = registry.get("FNCE101").unwrap();
    assert!(entry.currently_offered);
    assert_eq!(entry.source_tag, SourceTag::Catalog);
    assert_eq!(entry.credit_units, Some(1.0));
    assert_eq!(entry.title, "Corp Finance");
}

#[test]
fn lang999_external_is_orphaned_but_not_flipped() {
    let catalog = Catalog::from_entries(vec![]);
    let registry = Registry::from_entries(vec![RegistryEntry::new(
        "LANG999",
        "Latin Reading",
        None,
        true,
        SourceTag::External,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&[])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());

    assert!(result.changes.offered_updates.is_empty());
    assert!(result.offered.is_empty());
    assert_eq!(result.orphaned_ids(), vec!["LANG999"]);
    assert!(result.orphaned[0].currently_offered);
}

#[test]
fn external_entry_back_in_catalog_is_flipped_and_keeps_its_tag() {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("LANG101", "Spanish I", None)]);
    let mut registry = Registry::from_entries(vec![RegistryEntry::new(
        "LANG101",
        "Spanish I",
        None,
        false,
        SourceTag::External,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&["LANG101"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());
    assert_eq!(result.offered.newly_offered, vec!["LANG101".to_string()]);
    assert_eq!(result.summary.total_auto_fixable, 1);

    assert_eq!(apply_changes(&result.changes, &mut registry).unwrap(), 1);
    let entry = registry.get("LANG101").unwrap();
    assert!(entry.currently_offered);
    assert_eq!(entry.source_tag, SourceTag::External);

    let again = reconcile(&catalog, &registry, &references, &Institution::default());
    assert!(again.changes.is_empty());
}

#[test]
fn stat999_needs_attention_with_zero_mutations() {
    let catalog = Catalog::from_entries(vec![]);
    let registry = Registry::from_entries(vec![]).unwrap();
    let references = extract_references(&rules_referencing(&["STAT999"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());

    assert_eq!(result.new_reference_ids(), vec!["STAT999"]);
    assert_eq!(result.status(), CompletionStatus::AttentionNeeded);
    assert!(result.changes.is_empty());

    let reference = &result.new_references[0];
    assert_eq!(reference.category, Category::Native);
    assert_eq!(reference.used_by, vec!["CORE".to_string()]);
}

#[rstest]
#[case::identical(1.0, 1.0, false)]
#[case::within_tolerance(1.0, 1.0009, false)]
#[case::just_over(1.0, 1.002, true)]
#[case::half_unit(0.5, 1.0, true)]
fn credit_tolerance(#[case] catalog_cu: f64, #[case] registry_cu: f64, #[case] drift: bool) {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("OIDD6110", "Ops", Some(catalog_cu))]);
    let registry = Registry::from_entries(vec![RegistryEntry::new(
        "OIDD6110",
        "Ops",
        Some(registry_cu),
        true,
        SourceTag::Catalog,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&["OIDD6110"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());
    assert_eq!(!result.credit_mismatches.is_empty(), drift);
    assert_eq!(result.changes.credit_updates.len(), usize::from(drift));
}

#[rstest]
#[case::manual_now_in_catalog(true, false, SourceTag::Manual, Some(true))]
#[case::catalog_dropped(false, true, SourceTag::Catalog, Some(false))]
#[case::manual_already_not_offered(false, false, SourceTag::Manual, None)]
#[case::catalog_still_offered(true, true, SourceTag::Catalog, None)]
#[case::external_absent(false, true, SourceTag::External, None)]
#[case::external_present(true, false, SourceTag::External, Some(true))]
fn offered_flag_state_machine(
    #[case] in_catalog: bool,
    #[case] offered: bool,
    #[case] tag: SourceTag,
    #[case] expected_flip: Option<bool>,
) {
    let rows = if in_catalog {
        vec![CatalogEntry::new("MKTG6110", "Marketing", Some(1.0))]
    } else {
        vec![]
    };
    let catalog = Catalog::from_entries(rows);
    let registry = Registry::from_entries(vec![RegistryEntry::new(
        "MKTG6110",
        "Marketing",
        Some(1.0),
        offered,
        tag,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&["MKTG6110"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());
    let flip = result
        .changes
        .offered_updates
        .first()
        .map(|u| u.currently_offered);
    assert_eq!(flip, expected_flip);
}

#[test]
fn title_drift_reports_both_values() {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("LGST6110", "Responsibility in Business", None)]);
    let registry = Registry::from_entries(vec![RegistryEntry::new(
        "LGST6110",
        "Responsibility in Global Management",
        None,
        true,
        SourceTag::Catalog,
    )])
    .unwrap();
    let references = extract_references(&rules_referencing(&["LGST6110"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());

    let drift = &result.title_drifts[0];
    assert_eq!(drift.field, RecordField::Title);
    assert_eq!(drift.registry, FieldValue::Text("Responsibility in Global Management".into()));
    assert_eq!(drift.catalog, FieldValue::Text("Responsibility in Business".into()));
    assert!(result.credit_mismatches.is_empty());
}

#[test]
fn foreign_prefix_uses_non_institution_label() {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("ECON7100", "Macro", Some(1.0))]);
    let registry = Registry::from_entries(vec![]).unwrap();
    let references = extract_references(&rules_referencing(&["ECON7100"])).unwrap();

    let result = reconcile(&catalog, &registry, &references, &Institution::default());

    let reference = &result.new_references[0];
    assert_eq!(reference.category, Category::Foreign);
    assert_eq!(reference.label, "non-Wharton");
    assert!(reference.in_catalog);
}

#[test]
fn reconcile_is_deterministic() {
    let catalog = Catalog::from_entries(vec![
        CatalogEntry::new("STAT6130", "Regression", Some(0.5)),
        CatalogEntry::new("ACCT6110", "Financial Accounting", Some(1.0)),
    ]);
    let registry = Registry::from_entries(vec![
        RegistryEntry::new("STAT6130", "Regression Analysis", Some(1.0), false, SourceTag::Manual),
        RegistryEntry::new("MGMT6100", "Teams", Some(0.5), true, SourceTag::Catalog),
    ])
    .unwrap();
    let references = extract_references(&rules_referencing(&["STAT6130", "ACCT6110", "BEPP7630"])).unwrap();

    let first = reconcile(&catalog, &registry, &references, &Institution::default());
    let second = reconcile(&catalog, &registry, &references, &Institution::default());
    assert_eq!(first.report_lines(), second.report_lines());
    assert_eq!(first, second);
}

//! The five reconciliation checks
//!
//! Each check is a pure function of its inputs. None of them mutates a
//! record set; corrections are queued by the caller from what they return.

use serde::Serialize;

use super::authority::{COMPARED_FIELDS, RecordField, compare};
use super::category::{Category, Institution};
use super::changes::{FieldDrift, OfferedUpdate};
use crate::extract::References;
use crate::model::{Catalog, Registry};

/// Offered-flag flips, grouped by direction for the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfferedCheck {
    /// Registry entries now in the catalog but marked not offered
    pub newly_offered: Vec<String>,
    /// Catalog-backed entries marked offered but absent from the catalog
    pub no_longer_offered: Vec<String>,
}

/// A requirement course id with no registry entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReference {
    pub course_id: String,
    pub category: Category,
    pub label: String,
    pub in_catalog: bool,
    pub used_by: Vec<String>,
}

/// A registry entry no requirement references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanedEntry {
    pub course_id: String,
    pub title: String,
    pub currently_offered: bool,
}

/// Check 1: offered-flag delta, in registry order.
///
/// Every entry found in the catalog is flipped to offered. Only entries that
/// are not external are flipped back when they leave the catalog.
pub fn offered_delta(catalog: &Catalog, registry: &Registry) -> Vec<OfferedUpdate> {
    registry
        .entries()
        .iter()
        .filter_map(|entry| {
            let in_catalog = catalog.contains(&entry.course_id);
            let flip = if in_catalog {
                !entry.currently_offered
            } else {
                entry.currently_offered && !entry.source_tag.is_external()
            };
            flip.then(|| OfferedUpdate {
                course_id: entry.course_id.clone(),
                currently_offered: in_catalog,
            })
        })
        .collect()
}

impl OfferedCheck {
    pub fn from_updates(updates: &[OfferedUpdate]) -> Self {
        let mut check = Self::default();
        for update in updates {
            let bucket = if update.currently_offered {
                &mut check.newly_offered
            } else {
                &mut check.no_longer_offered
            };
            bucket.push(update.course_id.clone());
        }
        check.newly_offered.sort();
        check.no_longer_offered.sort();
        check
    }

    pub fn is_empty(&self) -> bool {
        self.newly_offered.is_empty() && self.no_longer_offered.is_empty()
    }
}

/// Check 2: requirement ids missing from the registry, sorted by id.
pub fn new_references(
    catalog: &Catalog,
    registry: &Registry,
    references: &References,
    institution: &Institution,
) -> Vec<NewReference> {
    references
        .ids()
        .iter()
        .filter(|id| !registry.contains(id))
        .map(|id| {
            let category = institution.category(id);
            let mut used_by = references.owners_of(id).to_vec();
            used_by.sort();
            used_by.dedup();
            NewReference {
                course_id: id.clone(),
                category,
                label: institution.label(category),
                in_catalog: catalog.contains(id),
                used_by,
            }
        })
        .collect()
}

/// Check 3: registry entries referenced by no rule, sorted by id.
pub fn orphaned_entries(registry: &Registry, references: &References) -> Vec<OrphanedEntry> {
    let mut orphaned: Vec<OrphanedEntry> = registry
        .entries()
        .iter()
        .filter(|entry| !references.contains(&entry.course_id))
        .map(|entry| OrphanedEntry {
            course_id: entry.course_id.clone(),
            title: entry.title.clone(),
            currently_offered: entry.currently_offered,
        })
        .collect();
    orphaned.sort_by(|a, b| a.course_id.cmp(&b.course_id));
    orphaned
}

/// Checks 4 and 5: drift on one compared field, over the sorted id
/// intersection of catalog and registry.
pub fn field_drift(field: RecordField, catalog: &Catalog, registry: &Registry) -> Vec<FieldDrift> {
    catalog
        .ids()
        .filter_map(|id| {
            let (cat, reg) = (catalog.get(id)?, registry.get(id)?);
            let (registry_value, catalog_value) = compare(field, cat, reg)?;
            Some(FieldDrift {
                course_id: id.to_string(),
                field,
                registry: registry_value,
                catalog: catalog_value,
            })
        })
        .collect()
}

/// Drift for every compared field, in report order.
pub fn all_field_drift(catalog: &Catalog, registry: &Registry) -> Vec<(RecordField, Vec<FieldDrift>)> {
    COMPARED_FIELDS
        .iter()
        .map(|&field| (field, field_drift(field, catalog, registry)))
        .collect()
}

//! Reconciliation engine
//!
//! Compares the catalog, the registry and the extracted requirement
//! references, and produces a [`Reconciliation`]: the result of five
//! independent checks, the change-set to bring the registry in line, and
//! the report that describes both.
//!
//! Which side wins a disagreement is decided by [`authority`], never by
//! the checks themselves.

pub mod authority;
pub mod category;
pub mod changes;
pub mod checks;
pub mod report;

use serde::Serialize;

pub use authority::{CREDIT_TOLERANCE, FieldValue, RecordField, Source, authority_for};
pub use category::{Category, Institution};
pub use changes::{ChangeSet, CreditUpdate, FieldDrift, OfferedUpdate, TitleUpdate};
pub use checks::{NewReference, OfferedCheck, OrphanedEntry};

use crate::extract::References;
use crate::model::{Catalog, Registry};

/// Whether a run needs a human to act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Every requirement course id is registered
    Success,
    /// One or more requirement course ids need manual registration
    AttentionNeeded,
}

/// Counts printed in the report's summary section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub registry_entries: usize,
    pub catalog_entries: usize,
    pub reference_ids: usize,
    pub offered_updates: usize,
    pub credit_updates: usize,
    pub title_updates: usize,
    pub new_ids: usize,
    pub orphaned: usize,
    pub total_auto_fixable: usize,
}

/// The full result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub status: CompletionStatus,
    pub offered: OfferedCheck,
    pub new_references: Vec<NewReference>,
    pub orphaned: Vec<OrphanedEntry>,
    pub credit_mismatches: Vec<FieldDrift>,
    pub title_drifts: Vec<FieldDrift>,
    pub changes: ChangeSet,
    pub summary: Summary,
}

impl Reconciliation {
    pub fn status(&self) -> CompletionStatus {
        self.status
    }

    /// Requirement ids with no registry entry, sorted.
    pub fn new_reference_ids(&self) -> Vec<&str> {
        self.new_references.iter().map(|r| r.course_id.as_str()).collect()
    }

    /// Registry ids referenced by no requirement, sorted.
    pub fn orphaned_ids(&self) -> Vec<&str> {
        self.orphaned.iter().map(|o| o.course_id.as_str()).collect()
    }
}

/// Run all five checks and build the change-set.
///
/// Pure: neither record set is touched. The report is reproducible from
/// the returned value alone.
pub fn reconcile(
    catalog: &Catalog,
    registry: &Registry,
    references: &References,
    institution: &Institution,
) -> Reconciliation {
    let mut changes = ChangeSet::default();

    let offered_updates = checks::offered_delta(catalog, registry);
    let offered = OfferedCheck::from_updates(&offered_updates);
    changes.offered_updates = offered_updates;

    let new_references = checks::new_references(catalog, registry, references, institution);
    let orphaned = checks::orphaned_entries(registry, references);

    let mut credit_mismatches = Vec::new();
    let mut title_drifts = Vec::new();
    for (field, drifts) in checks::all_field_drift(catalog, registry) {
        for drift in &drifts {
            changes.queue_correction(drift);
        }
        match field {
            RecordField::CreditUnits => credit_mismatches = drifts,
            RecordField::Title => title_drifts = drifts,
            RecordField::CurrentlyOffered | RecordField::SourceTag => {}
        }
    }

    let summary = Summary {
        registry_entries: registry.len(),
        catalog_entries: catalog.len(),
        reference_ids: references.len(),
        offered_updates: changes.offered_updates.len(),
        credit_updates: changes.credit_updates.len(),
        title_updates: changes.title_updates.len(),
        new_ids: new_references.len(),
        orphaned: orphaned.len(),
        total_auto_fixable: changes.total(),
    };

    let status = if new_references.is_empty() {
        CompletionStatus::Success
    } else {
        CompletionStatus::AttentionNeeded
    };

    tracing::debug!(
        offered = summary.offered_updates,
        credit = summary.credit_updates,
        title = summary.title_updates,
        new_ids = summary.new_ids,
        orphaned = summary.orphaned,
        "reconciliation complete"
    );

    Reconciliation {
        status,
        offered,
        new_references,
        orphaned,
        credit_mismatches,
        title_drifts,
        changes,
        summary,
    }
}

//! Pending registry mutations produced by a reconciliation

use serde::Serialize;

use super::authority::{FieldValue, RecordField, Source, authority_for};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferedUpdate {
    pub course_id: String,
    pub currently_offered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditUpdate {
    pub course_id: String,
    pub credit_units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleUpdate {
    pub course_id: String,
    pub title: String,
}

/// A disagreement between the catalog and registry on one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDrift {
    pub course_id: String,
    pub field: RecordField,
    pub registry: FieldValue,
    pub catalog: FieldValue,
}

impl FieldDrift {
    /// The value the registry should take, if the catalog owns this field.
    pub fn authoritative(&self) -> Option<&FieldValue> {
        match authority_for(self.field) {
            Source::Catalog => Some(&self.catalog),
            Source::Registry => None,
        }
    }
}

/// Ordered registry mutations, consumed by [`crate::apply_changes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    pub offered_updates: Vec<OfferedUpdate>,
    pub credit_updates: Vec<CreditUpdate>,
    pub title_updates: Vec<TitleUpdate>,
}

impl ChangeSet {
    /// Total auto-fixable mutations, one per field change.
    pub fn total(&self) -> usize {
        self.offered_updates.len() + self.credit_updates.len() + self.title_updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn queue_offered(&mut self, course_id: &str, currently_offered: bool) {
        self.offered_updates.push(OfferedUpdate {
            course_id: course_id.to_string(),
            currently_offered,
        });
    }

    /// Queue the correction for `drift` when its authoritative side is the catalog.
    pub fn queue_correction(&mut self, drift: &FieldDrift) {
        let course_id = drift.course_id.clone();
        match (drift.field, drift.authoritative()) {
            (RecordField::CreditUnits, Some(FieldValue::Units(units))) => {
                self.credit_updates.push(CreditUpdate {
                    course_id,
                    credit_units: *units,
                });
            }
            (RecordField::Title, Some(FieldValue::Text(title))) => {
                self.title_updates.push(TitleUpdate {
                    course_id,
                    title: title.clone(),
                });
            }
            _ => {}
        }
    }
}

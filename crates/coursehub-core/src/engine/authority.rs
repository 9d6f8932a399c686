//! Authoritative source per field
//!
//! Which record set wins when catalog and registry disagree is declared
//! here, not in the checks. A drift on a field whose authority is the
//! catalog queues a registry correction; a registry-authoritative field is
//! never overwritten from the catalog.

use std::fmt;

use serde::Serialize;

use crate::model::{CatalogEntry, RegistryEntry};

/// Credit-unit differences at or below this are treated as equal.
pub const CREDIT_TOLERANCE: f64 = 0.001;

/// A registry field the reconciler reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Title,
    CreditUnits,
    CurrentlyOffered,
    SourceTag,
}

/// The record set whose value wins for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Catalog,
    Registry,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldAuthority {
    pub field: RecordField,
    pub source: Source,
}

pub const FIELD_AUTHORITY: [FieldAuthority; 4] = [
    FieldAuthority { field: RecordField::Title, source: Source::Catalog },
    FieldAuthority { field: RecordField::CreditUnits, source: Source::Catalog },
    FieldAuthority { field: RecordField::CurrentlyOffered, source: Source::Registry },
    FieldAuthority { field: RecordField::SourceTag, source: Source::Registry },
];

/// Authoritative source for `field`. Unlisted fields stay registry-owned.
pub fn authority_for(field: RecordField) -> Source {
    FIELD_AUTHORITY
        .iter()
        .find(|a| a.field == field)
        .map(|a| a.source)
        .unwrap_or(Source::Registry)
}

/// Value of a compared field on one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Units(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            // Debug keeps the fractional part: `1.0`, not `1`.
            Self::Units(units) => write!(f, "{units:?}"),
        }
    }
}

/// Fields compared between a catalog row and its registry entry, in report order.
pub const COMPARED_FIELDS: [RecordField; 2] = [RecordField::CreditUnits, RecordField::Title];

/// Compare one field of a catalog row and registry entry.
///
/// Returns `(registry_value, catalog_value)` when they disagree. Absent
/// credit units and empty titles on either side are not comparable and never
/// count as drift.
pub fn compare(
    field: RecordField,
    catalog: &CatalogEntry,
    registry: &RegistryEntry,
) -> Option<(FieldValue, FieldValue)> {
    match field {
        RecordField::CreditUnits => {
            let (cat, reg) = (catalog.credit_units?, registry.credit_units?);
            ((cat - reg).abs() > CREDIT_TOLERANCE)
                .then_some((FieldValue::Units(reg), FieldValue::Units(cat)))
        }
        RecordField::Title => {
            let (cat, reg) = (&catalog.title, &registry.title);
            (!cat.is_empty() && !reg.is_empty() && cat != reg)
                .then(|| (FieldValue::Text(reg.clone()), FieldValue::Text(cat.clone())))
        }
        RecordField::CurrentlyOffered | RecordField::SourceTag => None,
    }
}

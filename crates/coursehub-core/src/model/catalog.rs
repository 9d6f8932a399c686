//! Catalog records: the currently offered courses produced by the feed

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::department_prefix;

/// One currently offered course as emitted by the feed cleanser.
///
/// Only the fields the reconciler reads are typed; every other feed column is
/// kept in `extra` so a catalog can be re-serialized without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Course_ID")]
    pub course_id: String,

    #[serde(rename = "Course_Title", default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(rename = "Department", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(rename = "Credit_Units", default)]
    pub credit_units: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(course_id: impl Into<String>, title: impl Into<String>, credit_units: Option<f64>) -> Self {
        Self {
            course_id: course_id.into(),
            title: title.into(),
            department: None,
            credit_units,
            extra: Map::new(),
        }
    }

    /// Department, falling back to the course id prefix when the feed left it blank.
    pub fn department(&self) -> &str {
        match self.department.as_deref() {
            Some(dept) if !dept.is_empty() => dept,
            _ => department_prefix(&self.course_id),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The catalog as loaded for one run, indexed by course id.
///
/// The feed is not guaranteed to be unique per id; a later row replaces an
/// earlier one in the index, while [`Catalog::len`] still counts raw rows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: BTreeMap<String, usize>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut index = BTreeMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.course_id.clone(), pos).is_some() {
                tracing::warn!(course_id = %entry.course_id, "duplicate catalog row, keeping the later one");
            }
        }
        Self { entries, index }
    }

    /// Number of catalog rows, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, course_id: &str) -> Option<&CatalogEntry> {
        self.index.get(course_id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.index.contains_key(course_id)
    }

    /// Distinct course ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

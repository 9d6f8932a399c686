//! Registry records: every course a requirement has ever referenced

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Why a registry entry's `currently_offered` flag has its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    /// Offered status derived from the catalog feed
    #[serde(rename = "catalog")]
    Catalog,
    /// Hand-authored entry not (currently) backed by the catalog
    #[serde(rename = "manual")]
    Manual,
    /// Offered status tracked outside the catalog (cross-institution courses)
    #[serde(rename = "non_wharton", alias = "external")]
    External,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Manual => "manual",
            Self::External => "non_wharton",
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One durably tracked course.
///
/// Persisted through [`StoredEntry`], so a load/save cycle of an untouched
/// registry reproduces the file byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct RegistryEntry {
    pub course_id: String,
    pub title: String,
    pub department: Option<String>,
    pub credit_units: Option<f64>,
    pub is_wharton: Option<bool>,
    pub currently_offered: bool,
    pub source_tag: SourceTag,
    pub extra: Map<String, Value>,
    /// The row carried an explicit `"credit_units": null`
    null_credit_units: bool,
}

/// On-disk shape of a registry row. Field order is the persisted key order.
///
/// `credit_units` is a double option: absent, explicit `null`, or a value.
#[derive(Serialize, Deserialize)]
struct StoredEntry {
    course_id: String,

    #[serde(rename = "course_title", default)]
    title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<String>,

    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    credit_units: Option<Option<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_wharton: Option<bool>,

    #[serde(default)]
    currently_offered: bool,

    #[serde(rename = "catalog_source")]
    source_tag: SourceTag,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn present_key<'de, D>(deserializer: D) -> std::result::Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl From<StoredEntry> for RegistryEntry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            course_id: stored.course_id,
            title: stored.title,
            department: stored.department,
            credit_units: stored.credit_units.flatten(),
            is_wharton: stored.is_wharton,
            currently_offered: stored.currently_offered,
            source_tag: stored.source_tag,
            extra: stored.extra,
            null_credit_units: stored.credit_units == Some(None),
        }
    }
}

impl From<RegistryEntry> for StoredEntry {
    fn from(entry: RegistryEntry) -> Self {
        let credit_units = match entry.credit_units {
            Some(units) => Some(Some(units)),
            None if entry.null_credit_units => Some(None),
            None => None,
        };
        Self {
            course_id: entry.course_id,
            title: entry.title,
            department: entry.department,
            credit_units,
            is_wharton: entry.is_wharton,
            currently_offered: entry.currently_offered,
            source_tag: entry.source_tag,
            extra: entry.extra,
        }
    }
}

impl RegistryEntry {
    pub fn new(
        course_id: impl Into<String>,
        title: impl Into<String>,
        credit_units: Option<f64>,
        currently_offered: bool,
        source_tag: SourceTag,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            title: title.into(),
            department: None,
            credit_units,
            is_wharton: None,
            currently_offered,
            source_tag,
            extra: Map::new(),
            null_credit_units: false,
        }
    }
}

/// The registry, keyed uniquely by course id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate course ids.
    pub fn from_entries(entries: Vec<RegistryEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.course_id.clone(), pos).is_some() {
                return Err(Error::DuplicateEntity {
                    records: "registry".to_string(),
                    id: entry.course_id.clone(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn get(&self, course_id: &str) -> Option<&RegistryEntry> {
        self.index.get(course_id).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, course_id: &str) -> Option<&mut RegistryEntry> {
        let pos = *self.index.get(course_id)?;
        Some(&mut self.entries[pos])
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.index.contains_key(course_id)
    }

    /// Course ids in ascending order.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.course_id.as_str()).collect()
    }

    /// Sort entries by course id so the persisted file is diff-stable.
    pub fn sort_by_id(&mut self) {
        self.entries.sort_by(|a, b| a.course_id.cmp(&b.course_id));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.course_id.clone(), pos))
            .collect();
    }

    pub fn into_entries(self) -> Vec<RegistryEntry> {
        self.entries
    }
}

//! Read-only merged view over the catalog and the registry
//!
//! The catalog carries full course data and wins; the registry fills in
//! courses that are not currently offered.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{Catalog, CatalogEntry, Registry, RegistryEntry, SourceTag};

/// A course as seen by downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCourse {
    pub course_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub credit_units: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_wharton: Option<bool>,
    pub currently_offered: bool,
    pub source: SourceTag,
    /// Remaining feed columns, present only for catalog-backed courses
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl From<&CatalogEntry> for ResolvedCourse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            course_id: entry.course_id.clone(),
            title: entry.title.clone(),
            department: Some(entry.department().to_string()),
            credit_units: entry.credit_units,
            is_wharton: Some(true),
            currently_offered: true,
            source: SourceTag::Catalog,
            details: entry.extra.clone(),
        }
    }
}

impl From<&RegistryEntry> for ResolvedCourse {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            course_id: entry.course_id.clone(),
            title: entry.title.clone(),
            department: entry.department.clone(),
            credit_units: entry.credit_units,
            is_wharton: entry.is_wharton,
            currently_offered: entry.currently_offered,
            source: entry.source_tag,
            details: Map::new(),
        }
    }
}

/// Lookup over one catalog and one registry.
pub struct CourseResolver<'a> {
    catalog: &'a Catalog,
    registry: &'a Registry,
}

impl<'a> CourseResolver<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a Registry) -> Self {
        Self { catalog, registry }
    }

    /// Resolve one course: catalog first, then registry.
    pub fn resolve(&self, course_id: &str) -> Option<ResolvedCourse> {
        self.catalog
            .get(course_id)
            .map(ResolvedCourse::from)
            .or_else(|| self.registry.get(course_id).map(ResolvedCourse::from))
    }

    /// Resolve in input order, skipping unknown ids.
    pub fn resolve_many<I, S>(&self, course_ids: I) -> Vec<ResolvedCourse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        course_ids
            .into_iter()
            .filter_map(|id| self.resolve(id.as_ref()))
            .collect()
    }

    /// Every known course, catalog data overriding registry data, sorted by id.
    pub fn all(&self) -> Vec<ResolvedCourse> {
        let mut merged: BTreeMap<&str, ResolvedCourse> = self
            .registry
            .entries()
            .iter()
            .map(|e| (e.course_id.as_str(), ResolvedCourse::from(e)))
            .collect();
        for entry in self.catalog.entries() {
            merged.insert(entry.course_id.as_str(), ResolvedCourse::from(entry));
        }
        merged.into_values().collect()
    }

    /// Every currently offered course, in catalog order.
    pub fn offered(&self) -> Vec<ResolvedCourse> {
        self.catalog.entries().iter().map(ResolvedCourse::from).collect()
    }

    pub fn credit_units(&self, course_id: &str) -> Option<f64> {
        match self.catalog.get(course_id) {
            Some(entry) => entry.credit_units,
            None => self.registry.get(course_id).and_then(|e| e.credit_units),
        }
    }

    pub fn is_currently_offered(&self, course_id: &str) -> bool {
        self.catalog.contains(course_id)
    }
}

//! Typed record models for the three reconciled sources

mod catalog;
mod registry;
mod rules;

pub use catalog::{Catalog, CatalogEntry};
pub use registry::{Registry, RegistryEntry, SourceTag};
pub use rules::{
    CoreRequirement, CoreRequirementsDocument, CourseSection, ElectiveSection, MajorRequirement,
    MajorRequirementsDocument, MajorSections, Pillar, RequirementStructure, RuleBody,
    RuleDocument,
};

/// Department prefix of a course id: its leading run of ASCII letters.
///
/// `"FNCE6110"` -> `"FNCE"`, `"STAT999"` -> `"STAT"`, `"101X"` -> `""`.
pub fn department_prefix(course_id: &str) -> &str {
    let end = course_id
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(course_id.len());
    &course_id[..end]
}

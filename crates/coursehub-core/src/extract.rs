//! Reference extraction from rule documents
//!
//! Walks every rule-group of every document and collects the course ids it
//! references, along with which groups reference each id.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{
    CoreRequirementsDocument, MajorRequirement, MajorRequirementsDocument, RuleBody, RuleDocument,
};
use crate::{Error, Result};

/// Course ids referenced by requirements, and the groups that reference them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct References {
    ids: BTreeSet<String>,
    owners: BTreeMap<String, Vec<String>>,
}

impl References {
    /// Record that `group` references `course_id`.
    ///
    /// Group membership is a set per id: a group listing the same course in
    /// several sections is recorded once.
    pub fn insert(&mut self, course_id: &str, group: &str) {
        self.ids.insert(course_id.to_string());
        let owners = self.owners.entry(course_id.to_string()).or_default();
        if !owners.iter().any(|g| g == group) {
            owners.push(group.to_string());
        }
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.ids.contains(course_id)
    }

    /// Groups referencing `course_id`, in first-seen order.
    pub fn owners_of(&self, course_id: &str) -> &[String] {
        self.owners.get(course_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Extract every referenced course id from `documents`.
///
/// # Errors
///
/// Returns [`Error::MalformedRule`] naming the document and field when a
/// container the document's shape requires is missing.
pub fn extract_references(documents: &[RuleDocument]) -> Result<References> {
    let mut references = References::default();
    for document in documents {
        match &document.body {
            RuleBody::Core(core) => extract_core(&document.name, core, &mut references)?,
            RuleBody::Majors(majors) => extract_majors(&document.name, majors, &mut references)?,
        }
    }
    tracing::debug!(
        documents = documents.len(),
        ids = references.len(),
        "extracted requirement references"
    );
    Ok(references)
}

fn extract_core(
    name: &str,
    document: &CoreRequirementsDocument,
    references: &mut References,
) -> Result<()> {
    let requirements = document
        .core_requirements
        .as_ref()
        .ok_or_else(|| Error::malformed(name, "core_requirements", "is missing"))?;

    for (pos, requirement) in requirements.iter().enumerate() {
        let code = requirement.core_code.as_deref().ok_or_else(|| {
            Error::malformed(name, format!("core_requirements[{pos}].core_code"), "is missing")
        })?;
        let courses = requirement.courses.as_ref().ok_or_else(|| {
            Error::malformed(name, format!("core_requirements[{pos}].courses"), "is missing")
        })?;
        for course_id in courses {
            references.insert(course_id, code);
        }
    }
    Ok(())
}

fn extract_majors(
    name: &str,
    document: &MajorRequirementsDocument,
    references: &mut References,
) -> Result<()> {
    let majors = document
        .majors
        .as_ref()
        .ok_or_else(|| Error::malformed(name, "majors", "is missing"))?;

    for (code, major) in majors {
        for course_id in major_course_ids(name, code, major)? {
            references.insert(course_id, code);
        }
    }
    Ok(())
}

/// All course ids one major references, in document order.
fn major_course_ids<'a>(
    name: &str,
    code: &str,
    major: &'a MajorRequirement,
) -> Result<Vec<&'a String>> {
    let base = format!("majors.{code}.requirements");
    let sections = major
        .requirements
        .as_ref()
        .ok_or_else(|| Error::malformed(name, base.as_str(), "is missing"))?;

    if let Some(structure) = major.requirement_structure {
        for section in structure.required_sections() {
            if !sections.has_section(section) {
                return Err(Error::malformed(
                    name,
                    format!("{base}.{section}"),
                    format!("is required by requirement_structure {structure} but missing"),
                ));
            }
        }
    }

    let mut ids = Vec::new();
    if let Some(required) = &sections.required_courses {
        let courses = required.courses.as_ref().ok_or_else(|| {
            Error::malformed(name, format!("{base}.required_courses.courses"), "is missing")
        })?;
        ids.extend(courses);
    }
    if let Some(electives) = &sections.elective_courses {
        let courses = electives.courses.as_ref().ok_or_else(|| {
            Error::malformed(name, format!("{base}.elective_courses.courses"), "is missing")
        })?;
        ids.extend(courses);
        if let Some(external) = &electives.non_wharton_courses {
            ids.extend(external);
        }
    }
    if let Some(pillars) = &sections.pillars {
        for (pos, pillar) in pillars.iter().enumerate() {
            let courses = pillar.courses.as_ref().ok_or_else(|| {
                Error::malformed(name, format!("{base}.pillars[{pos}].courses"), "is missing")
            })?;
            ids.extend(courses);
        }
    }
    Ok(ids)
}

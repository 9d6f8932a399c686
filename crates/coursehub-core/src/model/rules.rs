//! Rule documents: core and major requirement definitions
//!
//! Containers are deserialized as `Option` on purpose so that a missing list
//! reaches the extractor, which reports the document and field by name. A
//! container of the wrong type is caught while parsing and reported the same
//! way.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Core requirements document (`core_requirements: [...]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreRequirementsDocument {
    #[serde(default)]
    pub core_requirements: Option<Vec<CoreRequirement>>,
}

/// One core requirement; a rule-group labeled by `core_code`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreRequirement {
    #[serde(default)]
    pub core_code: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

/// Major requirements document (`majors: {CODE: {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorRequirementsDocument {
    #[serde(default)]
    pub majors: Option<BTreeMap<String, MajorRequirement>>,
}

/// Declared shape of a major's requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementStructure {
    Electives,
    Combined,
    Pillars,
    CombinedPillars,
}

impl RequirementStructure {
    /// Sections a major with this structure must define.
    pub fn required_sections(&self) -> &'static [&'static str] {
        match self {
            Self::Electives => &["elective_courses"],
            Self::Combined => &["required_courses", "elective_courses"],
            Self::Pillars => &["pillars"],
            Self::CombinedPillars => &["required_courses", "pillars"],
        }
    }
}

impl fmt::Display for RequirementStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Electives => "ELECTIVES",
            Self::Combined => "COMBINED",
            Self::Pillars => "PILLARS",
            Self::CombinedPillars => "COMBINED_PILLARS",
        };
        f.write_str(name)
    }
}

/// One major; a rule-group labeled by its key in `majors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorRequirement {
    #[serde(default)]
    pub major_code: Option<String>,
    #[serde(default)]
    pub requirement_structure: Option<RequirementStructure>,
    #[serde(default)]
    pub requirements: Option<MajorSections>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorSections {
    #[serde(default)]
    pub required_courses: Option<CourseSection>,
    #[serde(default)]
    pub elective_courses: Option<ElectiveSection>,
    #[serde(default)]
    pub pillars: Option<Vec<Pillar>>,
}

impl MajorSections {
    pub fn has_section(&self, name: &str) -> bool {
        match name {
            "required_courses" => self.required_courses.is_some(),
            "elective_courses" => self.elective_courses.is_some(),
            "pillars" => self.pillars.is_some(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSection {
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectiveSection {
    #[serde(default)]
    pub courses: Option<Vec<String>>,
    /// Cross-institution electives; legitimately absent for most majors
    #[serde(default)]
    pub non_wharton_courses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    #[serde(default)]
    pub pillar_code: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

/// Parsed body of a rule document.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleBody {
    Core(CoreRequirementsDocument),
    Majors(MajorRequirementsDocument),
}

/// A rule document together with the name it is reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDocument {
    pub name: String,
    pub body: RuleBody,
}

impl RuleDocument {
    pub fn core(name: impl Into<String>, document: CoreRequirementsDocument) -> Self {
        Self {
            name: name.into(),
            body: RuleBody::Core(document),
        }
    }

    pub fn majors(name: impl Into<String>, document: MajorRequirementsDocument) -> Self {
        Self {
            name: name.into(),
            body: RuleBody::Majors(document),
        }
    }

    /// Parse a core document from its loaded value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRule`] with the dotted path of the first
    /// field whose value has the wrong type.
    pub fn core_from_value(name: impl Into<String>, value: Value) -> Result<Self> {
        let name = name.into();
        let document = typed(&name, value)?;
        Ok(Self::core(name, document))
    }

    /// Parse a majors document from its loaded value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRule`] with the dotted path of the first
    /// field whose value has the wrong type.
    pub fn majors_from_value(name: impl Into<String>, value: Value) -> Result<Self> {
        let name = name.into();
        let document = typed(&name, value)?;
        Ok(Self::majors(name, document))
    }
}

fn typed<T: DeserializeOwned>(name: &str, value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let field = match err.path().to_string() {
            path if path == "." => "(document)".to_string(),
            path => path,
        };
        Error::malformed(name, field, err.into_inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_document_parses_all_sections() {
        let doc: MajorRequirementsDocument = serde_json::from_str(
            r#"{"metadata": {"version": "1"}, "majors": {"FNCE": {
                "major_code": "FNCE",
                "requirement_structure": "COMBINED",
                "requirements": {
                    "required_courses": {"credits_required": 1.0, "courses": ["FNCE6110"]},
                    "elective_courses": {"courses": ["FNCE7050"], "non_wharton_courses": ["ECON7100"]}
                }}}}"#,
        )
        .unwrap();

        let majors = doc.majors.unwrap();
        let fnce = &majors["FNCE"];
        assert_eq!(fnce.requirement_structure, Some(RequirementStructure::Combined));
        let sections = fnce.requirements.as_ref().unwrap();
        assert!(sections.has_section("required_courses"));
        assert!(!sections.has_section("pillars"));
    }

    #[test]
    fn structure_lists_required_sections() {
        assert_eq!(
            RequirementStructure::CombinedPillars.required_sections(),
            &["required_courses", "pillars"]
        );
        assert_eq!(RequirementStructure::CombinedPillars.to_string(), "COMBINED_PILLARS");
    }
}

//! JSON builders for record sets and rule documents.
//!
//! Values are built as [`serde_json::Value`] so tests exercise the same
//! deserialization path as files on disk.

use serde_json::{Map, Value, json};

/// One catalog row in feed column naming.
pub fn catalog_row(course_id: &str, title: &str, credit_units: Option<f64>) -> Value {
    json!({
        "Course_ID": course_id,
        "Course_Title": title,
        "Credit_Units": credit_units,
    })
}

/// One registry entry. `source_tag` is the persisted `catalog_source` value.
pub fn registry_row(
    course_id: &str,
    title: &str,
    credit_units: Option<f64>,
    currently_offered: bool,
    source_tag: &str,
) -> Value {
    json!({
        "course_id": course_id,
        "course_title": title,
        "credit_units": credit_units,
        "currently_offered": currently_offered,
        "catalog_source": source_tag,
    })
}

/// A core requirements document, one requirement per `(code, courses)`.
pub fn core_rules(groups: &[(&str, &[&str])]) -> Value {
    let requirements: Vec<Value> = groups
        .iter()
        .map(|(code, courses)| json!({ "core_code": code, "courses": courses }))
        .collect();
    json!({ "core_requirements": requirements })
}

/// A majors document, listing each major's courses as electives.
pub fn major_rules(groups: &[(&str, &[&str])]) -> Value {
    let majors: Map<String, Value> = groups
        .iter()
        .map(|(code, courses)| {
            (
                code.to_string(),
                json!({
                    "major_code": code,
                    "requirement_structure": "ELECTIVES",
                    "requirements": { "elective_courses": { "courses": courses } },
                }),
            )
        })
        .collect();
    json!({ "majors": majors })
}

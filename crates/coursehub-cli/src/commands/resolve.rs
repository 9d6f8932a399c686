//! Resolve command: merged catalog/registry lookup

use std::process::ExitCode;

use colored::Colorize;

use coursehub_core::{CourseResolver, ResolvedCourse};

use super::Invocation;
use crate::error::Result;

/// Print the resolved record for each id. Exits 1 if any id is unknown.
pub fn run_resolve(invocation: &Invocation<'_>, ids: &[String], json: bool) -> Result<ExitCode> {
    let session = invocation.session()?;
    let (catalog, registry) = session.load_records()?;
    let resolver = CourseResolver::new(&catalog, &registry);

    let resolved = resolver.resolve_many(ids);
    let missing: Vec<&String> = ids.iter().filter(|id| resolver.resolve(id).is_none()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        for course in &resolved {
            println!("{}", describe(course));
        }
    }
    for id in &missing {
        eprintln!("{} {} is in neither the catalog nor the registry", "NOT FOUND".red().bold(), id);
    }

    Ok(if missing.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn describe(course: &ResolvedCourse) -> String {
    let units = course
        .credit_units
        .map(|cu| format!("{cu:?} CU"))
        .unwrap_or_else(|| "? CU".to_string());
    let offered = if course.currently_offered { "offered" } else { "not offered" };
    format!(
        "{}  {}  [{}, {}, {}]",
        course.course_id.bold(),
        course.title,
        units,
        offered,
        course.source
    )
}

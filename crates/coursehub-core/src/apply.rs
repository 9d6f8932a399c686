//! Change applier
//!
//! Applies a [`ChangeSet`] to a registry in memory. Every id is checked
//! before anything is mutated, so an invalid change-set leaves the registry
//! untouched.

use crate::engine::ChangeSet;
use crate::model::{Registry, SourceTag};
use crate::{Error, Result};

/// Apply `changes` to `registry` and re-sort it by course id.
///
/// Offered flips also move the source tag between `manual` and `catalog`.
/// An external entry's flag is updated but its tag is left alone.
///
/// Returns the number of field mutations applied.
///
/// # Errors
///
/// Returns [`Error::UnknownEntity`] if any queued change targets an id the
/// registry does not contain.
pub fn apply_changes(changes: &ChangeSet, registry: &mut Registry) -> Result<usize> {
    validate(changes, registry)?;

    let mut applied = 0;

    for update in &changes.offered_updates {
        let Some(entry) = registry.get_mut(&update.course_id) else {
            continue;
        };
        entry.currently_offered = update.currently_offered;
        entry.source_tag = match (update.currently_offered, entry.source_tag) {
            (true, SourceTag::Manual) => SourceTag::Catalog,
            (false, SourceTag::Catalog) => SourceTag::Manual,
            (_, tag) => tag,
        };
        applied += 1;
    }

    for update in &changes.credit_updates {
        if let Some(entry) = registry.get_mut(&update.course_id) {
            entry.credit_units = Some(update.credit_units);
            applied += 1;
        }
    }

    for update in &changes.title_updates {
        if let Some(entry) = registry.get_mut(&update.course_id) {
            entry.title = update.title.clone();
            applied += 1;
        }
    }

    registry.sort_by_id();
    tracing::info!(applied, "applied registry changes");
    Ok(applied)
}

fn validate(changes: &ChangeSet, registry: &Registry) -> Result<()> {
    let queued = changes
        .offered_updates
        .iter()
        .map(|u| (u.course_id.as_str(), "offered flag update"))
        .chain(changes.credit_updates.iter().map(|u| (u.course_id.as_str(), "credit unit correction")))
        .chain(changes.title_updates.iter().map(|u| (u.course_id.as_str(), "title correction")));

    for (course_id, change) in queued {
        if !registry.contains(course_id) {
            return Err(Error::UnknownEntity {
                id: course_id.to_string(),
                change: change.to_string(),
            });
        }
    }
    Ok(())
}

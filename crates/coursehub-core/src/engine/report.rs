//! Plain-text rendering of a reconciliation
//!
//! Output is deterministic for identical inputs. Only the header line
//! carries a timestamp.

use chrono::{DateTime, Local};

use super::Reconciliation;
use crate::session::{RunMode, RunOutcome};

const RULE_WIDTH: usize = 70;

/// Reported at the end of section 4 until per-term credit data exists.
pub const CROSS_TERM_SLOT: &str = "  Cross-term credit consistency: not checked (unimplemented).";

fn section(lines: &mut Vec<String>, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    lines.push(rule.clone());
    lines.push(title.to_string());
    lines.push(rule);
}

impl Reconciliation {
    /// The five numbered sections and the summary, one entry per line.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.offered_section(&mut lines);
        lines.push(String::new());
        self.new_reference_section(&mut lines);
        lines.push(String::new());
        self.orphan_section(&mut lines);
        lines.push(String::new());
        self.credit_section(&mut lines);
        lines.push(String::new());
        self.title_section(&mut lines);
        lines.push(String::new());
        self.summary_section(&mut lines);
        lines
    }

    /// The report as text, newline-terminated.
    pub fn report_text(&self) -> String {
        let mut text = self.report_lines().join("\n");
        text.push('\n');
        text
    }

    fn offered_section(&self, lines: &mut Vec<String>) {
        section(lines, "1. CURRENTLY_OFFERED FLAG UPDATES");
        let offered = &self.offered;
        if !offered.newly_offered.is_empty() {
            lines.push(String::new());
            lines.push(format!("  Newly offered ({}):", offered.newly_offered.len()));
            for id in &offered.newly_offered {
                lines.push(format!("    + {id} (was not offered, now in catalog)"));
            }
        }
        if !offered.no_longer_offered.is_empty() {
            lines.push(String::new());
            lines.push(format!("  No longer offered ({}):", offered.no_longer_offered.len()));
            for id in &offered.no_longer_offered {
                lines.push(format!("    - {id} (was offered, no longer in catalog)"));
            }
        }
        if offered.is_empty() {
            lines.push("  No changes needed.".to_string());
        }
    }

    fn new_reference_section(&self, lines: &mut Vec<String>) {
        section(lines, "2. NEW REQUIREMENT COURSE IDs NOT IN REGISTRY");
        if self.new_references.is_empty() {
            lines.push("  All requirement course IDs are in the registry. No action needed.".to_string());
            return;
        }
        lines.push(String::new());
        lines.push(format!(
            "  {} course(s) in requirements but NOT in registry:",
            self.new_references.len()
        ));
        lines.push("  These need to be added manually to the course registry".to_string());
        lines.push(String::new());
        for reference in &self.new_references {
            let offered = if reference.in_catalog { " (currently offered)" } else { "" };
            lines.push(format!(
                "    {} [{}]{} — used by: {}",
                reference.course_id,
                reference.label,
                offered,
                reference.used_by.join(", ")
            ));
        }
    }

    fn orphan_section(&self, lines: &mut Vec<String>) {
        section(lines, "3. ORPHANED REGISTRY ENTRIES");
        if self.orphaned.is_empty() {
            lines.push(
                "  No orphaned entries. All registry courses are referenced by requirements."
                    .to_string(),
            );
            return;
        }
        lines.push(String::new());
        lines.push(format!(
            "  {} course(s) in registry but NOT referenced by any requirement:",
            self.orphaned.len()
        ));
        lines.push("  These may be safe to remove, or may be needed for other purposes.".to_string());
        lines.push(String::new());
        for entry in &self.orphaned {
            let title = if entry.title.is_empty() { "?" } else { entry.title.as_str() };
            let offered = if entry.currently_offered { "offered" } else { "not offered" };
            lines.push(format!("    {} ({title}) [{offered}]", entry.course_id));
        }
    }

    fn credit_section(&self, lines: &mut Vec<String>) {
        section(lines, "4. CREDIT UNIT MISMATCHES (catalog vs registry)");
        if self.credit_mismatches.is_empty() {
            lines.push("  No mismatches. Registry credit units match catalog.".to_string());
        } else {
            lines.push(String::new());
            lines.push(format!("  {} mismatch(es) found:", self.credit_mismatches.len()));
            for drift in &self.credit_mismatches {
                lines.push(format!(
                    "    {}: registry={} CU, catalog={} CU",
                    drift.course_id, drift.registry, drift.catalog
                ));
            }
        }
        lines.push(CROSS_TERM_SLOT.to_string());
    }

    fn title_section(&self, lines: &mut Vec<String>) {
        section(lines, "5. TITLE DIFFERENCES (catalog vs registry)");
        if self.title_drifts.is_empty() {
            lines.push("  No title differences between catalog and registry.".to_string());
            return;
        }
        lines.push(String::new());
        lines.push(format!("  {} title difference(s) found:", self.title_drifts.len()));
        lines.push("  Registry will be updated to match catalog (catalog is authoritative).".to_string());
        lines.push(String::new());
        for drift in &self.title_drifts {
            lines.push(format!("    {}:", drift.course_id));
            lines.push(format!("      registry: \"{}\"", drift.registry));
            lines.push(format!("      catalog:  \"{}\"", drift.catalog));
        }
    }

    fn summary_section(&self, lines: &mut Vec<String>) {
        section(lines, "SUMMARY");
        let s = &self.summary;
        lines.push(format!("  Registry entries:      {}", s.registry_entries));
        lines.push(format!("  Catalog entries:       {}", s.catalog_entries));
        lines.push(format!("  Requirement course IDs: {}", s.reference_ids));
        lines.push(format!("  Offered flag updates:  {}", s.offered_updates));
        lines.push(format!("  Credit unit updates:   {}", s.credit_updates));
        lines.push(format!("  Title updates:         {}", s.title_updates));
        lines.push(format!("  New IDs needing add:   {}", s.new_ids));
        lines.push(format!("  Orphaned entries:      {}", s.orphaned));
        lines.push(format!("  Total auto-fixable:    {}", s.total_auto_fixable));
    }
}

/// Run banner: timestamp line, mode line, blank line.
pub fn header_lines(started: &DateTime<Local>, mode: RunMode) -> Vec<String> {
    let mode_line = match mode {
        RunMode::Apply => "APPLY",
        RunMode::Report => "REPORT ONLY (use --apply to write changes)",
    };
    vec![
        format!("CourseHub Reconciliation — {}", started.format("%Y-%m-%d %H:%M:%S")),
        format!("Mode: {mode_line}"),
        String::new(),
    ]
}

/// Closing lines describing what the run did, or would do, to the registry.
pub fn footer_lines(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    let summary = &outcome.reconciliation.summary;
    match outcome.mode {
        RunMode::Apply => {
            lines.push(String::new());
            if outcome.registry_written {
                lines.push(format!(
                    "  Applied {} changes to {}",
                    outcome.applied, outcome.registry_path
                ));
            } else {
                lines.push("  No auto-fixable changes to apply.".to_string());
            }
            if summary.new_ids > 0 {
                lines.push(String::new());
                lines.push(format!(
                    "  WARNING: {} new course ID(s) need manual addition to the registry.",
                    summary.new_ids
                ));
                lines.push("  See section 2 above for details.".to_string());
            }
        }
        RunMode::Report => {
            if summary.total_auto_fixable > 0 {
                lines.push(String::new());
                lines.push(format!(
                    "  Run with --apply to write {} changes to the registry.",
                    summary.total_auto_fixable
                ));
            }
        }
    }
    lines.push(String::new());
    lines
}

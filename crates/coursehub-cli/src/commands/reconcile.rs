//! Reconcile command: report and optionally apply the registry delta

use std::process::ExitCode;

use chrono::Local;
use colored::Colorize;

use coursehub_core::engine::report::{footer_lines, header_lines};
use coursehub_core::{CompletionStatus, RunMode, RunOutcome};

use super::Invocation;
use crate::error::Result;

/// Run reconciliation and print the report (or JSON) to stdout.
///
/// Returns exit code 1 when new requirement course ids need manual
/// registration, 0 otherwise.
pub fn run_reconcile(invocation: &Invocation<'_>, apply: bool, json: bool) -> Result<ExitCode> {
    let mode = if apply { RunMode::Apply } else { RunMode::Report };
    let started = Local::now();
    let session = invocation.session()?;

    let outcome = session.run(mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_report(&started, &outcome);
    }

    Ok(exit_code(outcome.status()))
}

fn print_report(started: &chrono::DateTime<Local>, outcome: &RunOutcome) {
    let lines = header_lines(started, outcome.mode)
        .into_iter()
        .chain(outcome.reconciliation.report_lines())
        .chain(footer_lines(outcome));
    for line in lines {
        println!("{line}");
    }

    if outcome.status() == CompletionStatus::AttentionNeeded {
        eprintln!(
            "{} {} new course id(s) need manual registration",
            "ATTENTION".yellow().bold(),
            outcome.reconciliation.summary.new_ids
        );
    }
}

pub fn exit_code(status: CompletionStatus) -> ExitCode {
    match status {
        CompletionStatus::Success => ExitCode::SUCCESS,
        CompletionStatus::AttentionNeeded => ExitCode::from(1),
    }
}

//! Summary command: source counts without running checks

use std::process::ExitCode;

use colored::Colorize;

use super::Invocation;
use crate::error::Result;

pub fn run_summary(invocation: &Invocation<'_>, json: bool) -> Result<ExitCode> {
    let session = invocation.session()?;
    let summary = session.summary()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "=>".blue().bold(), session.config().root);
    println!("  Catalog entries:        {}", summary.catalog_entries);
    println!("  Registry entries:       {}", summary.registry_entries);
    println!("  Requirement course IDs: {}", summary.reference_ids);
    println!("  Offered:                {}", summary.offered);
    println!("  Not offered:            {}", summary.not_offered);
    println!("  External:               {}", summary.external);
    Ok(ExitCode::SUCCESS)
}

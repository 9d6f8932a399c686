//! CourseHub CLI
//!
//! Reconciles the course catalog, the course registry and the requirement
//! documents. Stdout carries the report; logs and diagnostics go to stderr.

mod cli;
mod commands;
mod context;
mod error;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SourceArgs};
use commands::Invocation;
use error::Result;

/// Exit code for any error that aborts a run.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let root = context::resolve_root(cli.root.as_deref(), &cwd)?;

    let command = cli.command.unwrap_or(Commands::Reconcile {
        apply: false,
        json: false,
        sources: SourceArgs::default(),
    });

    let config = cli.config.as_deref();
    match command {
        Commands::Reconcile { apply, json, sources } => {
            commands::run_reconcile(&Invocation::new(&root, config, sources), apply, json)
        }
        Commands::Resolve { ids, json, sources } => {
            commands::run_resolve(&Invocation::new(&root, config, sources), &ids, json)
        }
        Commands::Summary { json, sources } => {
            commands::run_summary(&Invocation::new(&root, config, sources), json)
        }
    }
}

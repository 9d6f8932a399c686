//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// CourseHub - keep the course catalog, registry and requirements consistent
#[derive(Parser, Debug)]
#[command(name = "coursehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root; defaults to the nearest directory holding coursehub.toml
    #[arg(long, global = true, env = "COURSEHUB_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file; defaults to <root>/coursehub.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run; `reconcile` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for where the record sets live.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Catalog file (JSON or YAML)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Registry file (JSON or YAML)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Core requirements document; repeat for several
    #[arg(long = "core-rules")]
    pub core_rules: Vec<PathBuf>,

    /// Major requirements document; repeat for several
    #[arg(long = "major-rules")]
    pub major_rules: Vec<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare catalog, registry and requirements, and report the delta
    ///
    /// Exits 0 when every requirement course is registered and 1 when new
    /// course ids need to be added by hand.
    ///
    /// Examples:
    ///   coursehub reconcile            # Report only
    ///   coursehub reconcile --apply    # Write auto-fixable changes to the registry
    Reconcile {
        /// Write auto-fixable changes to the registry
        #[arg(long)]
        apply: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Look up courses, preferring catalog data over registry data
    Resolve {
        /// Course ids to resolve
        #[arg(required = true)]
        ids: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Count catalog, registry and requirement entries without running checks
    Summary {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        sources: SourceArgs,
    },
}

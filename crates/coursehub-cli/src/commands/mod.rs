//! Command implementations for coursehub-cli

pub mod reconcile;
pub mod resolve;
pub mod summary;

use std::path::Path;

use coursehub_core::{ConfigResolver, ReconcileSession, SourceOverrides};
use coursehub_fs::NormalizedPath;

use crate::cli::SourceArgs;
use crate::error::Result;

pub use reconcile::run_reconcile;
pub use resolve::run_resolve;
pub use summary::run_summary;

/// Where a command runs and which sources it reads.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub root: &'a Path,
    pub config: Option<&'a Path>,
    pub sources: SourceArgs,
}

impl<'a> Invocation<'a> {
    pub fn new(root: &'a Path, config: Option<&'a Path>, sources: SourceArgs) -> Self {
        Self {
            root,
            config,
            sources,
        }
    }

    /// Resolve configuration layers and open a session over them.
    pub fn session(&self) -> Result<ReconcileSession> {
        let overrides = SourceOverrides {
            catalog: self.sources.catalog.clone(),
            registry: self.sources.registry.clone(),
            core_rules: self.sources.core_rules.clone(),
            major_rules: self.sources.major_rules.clone(),
        };
        let mut resolver = ConfigResolver::new(NormalizedPath::new(self.root)).with_overrides(overrides);
        if let Some(config) = self.config {
            resolver = resolver.with_config_file(NormalizedPath::new(config));
        }
        Ok(ReconcileSession::new(resolver.resolve()?))
    }
}

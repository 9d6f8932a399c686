//! One reconciliation run over the configured sources
//!
//! A session loads every source up front, so malformed input aborts the
//! run before any comparison. In apply mode the registry is mutated in
//! memory and written once, atomically, after the whole change-set has
//! been applied.

use coursehub_fs::{NormalizedPath, RecordStore};
use serde::Serialize;

use crate::Result;
use crate::apply::apply_changes;
use crate::config::{ResolvedConfig, RuleKind, RuleSource};
use crate::engine::{CompletionStatus, Reconciliation, reconcile};
use crate::extract::extract_references;
use crate::model::{Catalog, CatalogEntry, Registry, RegistryEntry, RuleDocument};

/// Whether a run may write the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Print the report, never mutate
    #[default]
    Report,
    /// Print the report, then persist the corrected registry
    Apply,
}

/// Everything a run reads, fully loaded.
#[derive(Debug, Clone)]
pub struct Sources {
    pub catalog: Catalog,
    pub registry: Registry,
    pub rules: Vec<RuleDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub mode: RunMode,
    pub reconciliation: Reconciliation,
    /// Field mutations applied to the registry
    pub applied: usize,
    pub registry_written: bool,
    #[serde(serialize_with = "serialize_path")]
    pub registry_path: NormalizedPath,
}

impl RunOutcome {
    pub fn status(&self) -> CompletionStatus {
        self.reconciliation.status()
    }
}

fn serialize_path<S: serde::Serializer>(path: &NormalizedPath, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(path.as_str())
}

/// Source counts, without running any checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub catalog_entries: usize,
    pub registry_entries: usize,
    pub reference_ids: usize,
    pub offered: usize,
    pub not_offered: usize,
    pub external: usize,
}

pub struct ReconcileSession {
    config: ResolvedConfig,
    store: RecordStore,
}

impl ReconcileSession {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            store: RecordStore::new(),
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Load catalog and registry.
    pub fn load_records(&self) -> Result<(Catalog, Registry)> {
        let catalog: Vec<CatalogEntry> = self.store.load(&self.config.catalog)?;
        let registry: Vec<RegistryEntry> = self.store.load(&self.config.registry)?;
        tracing::debug!(
            catalog = catalog.len(),
            registry = registry.len(),
            "loaded record sets"
        );
        Ok((Catalog::from_entries(catalog), Registry::from_entries(registry)?))
    }

    /// Load every source.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or malformed source, or on a registry
    /// holding a duplicate course id.
    pub fn load(&self) -> Result<Sources> {
        let (catalog, registry) = self.load_records()?;
        let rules = self
            .config
            .rules
            .iter()
            .map(|source| self.load_rule(source))
            .collect::<Result<Vec<_>>>()?;
        Ok(Sources {
            catalog,
            registry,
            rules,
        })
    }

    fn load_rule(&self, source: &RuleSource) -> Result<RuleDocument> {
        let name = source.path.to_string();
        let value: serde_json::Value = self.store.load(&source.path)?;
        match source.kind {
            RuleKind::Core => RuleDocument::core_from_value(name, value),
            RuleKind::Majors => RuleDocument::majors_from_value(name, value),
        }
    }

    /// Reconcile, and in apply mode persist the corrected registry.
    ///
    /// The registry file is written only in apply mode and only when the
    /// change-set is non-empty.
    pub fn run(&self, mode: RunMode) -> Result<RunOutcome> {
        let Sources {
            catalog,
            mut registry,
            rules,
        } = self.load()?;
        let references = extract_references(&rules)?;
        let reconciliation = reconcile(&catalog, &registry, &references, &self.config.institution);

        let mut applied = 0;
        let mut registry_written = false;
        if mode == RunMode::Apply && !reconciliation.changes.is_empty() {
            applied = apply_changes(&reconciliation.changes, &mut registry)?;
            self.store.save(&self.config.registry, &registry.entries())?;
            registry_written = true;
            tracing::info!(applied, path = %self.config.registry, "registry written");
        }

        Ok(RunOutcome {
            mode,
            reconciliation,
            applied,
            registry_written,
            registry_path: self.config.registry.clone(),
        })
    }

    pub fn summary(&self) -> Result<SourceSummary> {
        let sources = self.load()?;
        let references = extract_references(&sources.rules)?;
        let entries = sources.registry.entries();
        Ok(SourceSummary {
            catalog_entries: sources.catalog.len(),
            registry_entries: entries.len(),
            reference_ids: references.len(),
            offered: entries.iter().filter(|e| e.currently_offered).count(),
            not_offered: entries.iter().filter(|e| !e.currently_offered).count(),
            external: entries.iter().filter(|e| e.source_tag.is_external()).count(),
        })
    }
}

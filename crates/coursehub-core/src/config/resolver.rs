//! Layered resolution of source paths and institution settings

use std::collections::BTreeSet;
use std::path::PathBuf;

use coursehub_fs::NormalizedPath;
use serde::Serialize;

use super::settings::Settings;
use super::{
    CONFIG_FILE_NAME, DEFAULT_CATALOG_PATH, DEFAULT_CORE_RULES_PATH, DEFAULT_MAJOR_RULES_PATH,
    DEFAULT_REGISTRY_PATH,
};
use crate::engine::Institution;
use crate::{Error, Result};

/// Which rule document shape a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Core,
    Majors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSource {
    pub kind: RuleKind,
    pub path: NormalizedPath,
}

/// Command-line overrides, the top configuration layer.
///
/// An empty rule list leaves the lower layers' list in place.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub catalog: Option<PathBuf>,
    pub registry: Option<PathBuf>,
    pub core_rules: Vec<PathBuf>,
    pub major_rules: Vec<PathBuf>,
}

/// Effective configuration for one run, all paths absolute or root-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub root: NormalizedPath,
    pub catalog: NormalizedPath,
    pub registry: NormalizedPath,
    pub rules: Vec<RuleSource>,
    pub institution: Institution,
}

pub struct ConfigResolver {
    root: NormalizedPath,
    config_file: Option<NormalizedPath>,
    overrides: SourceOverrides,
}

impl ConfigResolver {
    /// Resolver for `root`, reading `<root>/coursehub.toml` if it exists.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            config_file: None,
            overrides: SourceOverrides::default(),
        }
    }

    /// Read an explicit config file instead. It must exist.
    pub fn with_config_file(mut self, path: NormalizedPath) -> Self {
        self.config_file = Some(path);
        self
    }

    pub fn with_overrides(mut self, overrides: SourceOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Whether the default config file exists at the root.
    pub fn has_config(&self) -> bool {
        self.root.join(CONFIG_FILE_NAME).is_file()
    }

    /// Merge defaults, the config file and the overrides.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] when an explicit config file is missing, or a
    /// parse error when the config file is not valid TOML for [`Settings`].
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let settings = self.load_settings()?;
        let sources = settings.sources;
        let overrides = &self.overrides;

        let catalog = pick(
            overrides.catalog.as_ref(),
            sources.catalog.as_deref(),
            DEFAULT_CATALOG_PATH,
        );
        let registry = pick(
            overrides.registry.as_ref(),
            sources.registry.as_deref(),
            DEFAULT_REGISTRY_PATH,
        );

        let mut rules = Vec::new();
        for (kind, flagged, configured, default) in [
            (RuleKind::Core, &overrides.core_rules, sources.core_rules, DEFAULT_CORE_RULES_PATH),
            (RuleKind::Majors, &overrides.major_rules, sources.major_rules, DEFAULT_MAJOR_RULES_PATH),
        ] {
            let paths: Vec<NormalizedPath> = if !flagged.is_empty() {
                flagged.iter().map(NormalizedPath::new).collect()
            } else if let Some(configured) = configured {
                configured.iter().map(NormalizedPath::new).collect()
            } else {
                vec![NormalizedPath::new(default)]
            };
            rules.extend(paths.into_iter().map(|path| RuleSource {
                kind,
                path: path.resolve_against(&self.root),
            }));
        }

        let mut institution = Institution::default();
        if let Some(name) = settings.institution.name {
            institution.name = name;
        }
        if let Some(prefixes) = settings.institution.native_prefixes {
            institution.native_prefixes = prefixes.into_iter().collect::<BTreeSet<_>>();
        }

        let resolved = ResolvedConfig {
            catalog: catalog.resolve_against(&self.root),
            registry: registry.resolve_against(&self.root),
            root: self.root.clone(),
            rules,
            institution,
        };
        tracing::debug!(
            catalog = %resolved.catalog,
            registry = %resolved.registry,
            rules = resolved.rules.len(),
            "resolved configuration"
        );
        Ok(resolved)
    }

    fn load_settings(&self) -> Result<Settings> {
        let path = match &self.config_file {
            Some(explicit) => {
                let path = explicit.resolve_against(&self.root);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound {
                        path: path.to_native(),
                    });
                }
                path
            }
            None => {
                let path = self.root.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!(%path, "no config file, using defaults");
                    return Ok(Settings::default());
                }
                path
            }
        };
        tracing::debug!(%path, "loading config file");
        let content = coursehub_fs::io::read_text(&path)?;
        Settings::parse(&content)
    }
}

fn pick(flag: Option<&PathBuf>, file: Option<&str>, default: &str) -> NormalizedPath {
    match (flag, file) {
        (Some(flag), _) => NormalizedPath::new(flag),
        (None, Some(file)) => NormalizedPath::new(file),
        (None, None) => NormalizedPath::new(default),
    }
}

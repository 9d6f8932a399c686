//! Parsed `coursehub.toml`

use serde::{Deserialize, Serialize};

use crate::Result;

/// `[sources]`: where the record sets live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    pub catalog: Option<String>,
    pub registry: Option<String>,
    pub core_rules: Option<Vec<String>>,
    pub major_rules: Option<Vec<String>>,
}

/// `[institution]`: whose courses count as native.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstitutionSection {
    pub name: Option<String>,
    pub native_prefixes: Option<Vec<String>>,
}

/// One config file. Every key is optional; absent keys fall through to
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sources: SourcesSection,

    #[serde(default)]
    pub institution: InstitutionSection,
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// ```
    /// use coursehub_core::Settings;
    ///
    /// let settings = Settings::parse(r#"
    /// [sources]
    /// registry = "registry.yaml"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.sources.registry.as_deref(), Some("registry.yaml"));
    /// assert!(settings.institution.name.is_none());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }
}

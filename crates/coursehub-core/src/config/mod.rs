//! Run configuration
//!
//! Source locations and institution settings are resolved in three layers,
//! later layers overriding earlier ones:
//!
//! 1. **Defaults** - the standard CourseHub layout under the workspace root
//! 2. **Config file** - `coursehub.toml` at the root, or an explicit `--config` path
//! 3. **Overrides** - command-line flags
//!
//! Relative paths in any layer are resolved against the workspace root.
//!
//! ```toml
//! [sources]
//! catalog = "scripts/cleaned_courses.json"
//! registry = "data/course_registry.json"
//! core_rules = ["Student Requirements/wharton_mba_core_requirements.json"]
//! major_rules = ["Student Requirements/wharton_mba_major_requirements.json"]
//!
//! [institution]
//! name = "Wharton"
//! native_prefixes = ["ACCT", "FNCE", "STAT"]
//! ```

mod resolver;
mod settings;

pub use resolver::{ConfigResolver, ResolvedConfig, RuleKind, RuleSource, SourceOverrides};
pub use settings::{InstitutionSection, Settings, SourcesSection};

/// Config file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = "coursehub.toml";

pub const DEFAULT_CATALOG_PATH: &str = "scripts/cleaned_courses.json";
pub const DEFAULT_REGISTRY_PATH: &str = "data/course_registry.json";
pub const DEFAULT_CORE_RULES_PATH: &str = "Student Requirements/wharton_mba_core_requirements.json";
pub const DEFAULT_MAJOR_RULES_PATH: &str = "Student Requirements/wharton_mba_major_requirements.json";

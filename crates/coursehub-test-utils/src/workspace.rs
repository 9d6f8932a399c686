//! [`TestWorkspace`] builder for reconciliation scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

pub const CATALOG_PATH: &str = "scripts/cleaned_courses.json";
pub const REGISTRY_PATH: &str = "data/course_registry.json";
pub const CORE_RULES_PATH: &str = "Student Requirements/wharton_mba_core_requirements.json";
pub const MAJOR_RULES_PATH: &str = "Student Requirements/wharton_mba_major_requirements.json";

/// A temporary CourseHub root using the default source layout.
///
/// # Example
///
/// ```rust,no_run
/// use coursehub_test_utils::TestWorkspace;
/// use coursehub_test_utils::fixtures::{catalog_row, core_rules, major_rules, registry_row};
/// use serde_json::json;
///
/// let ws = TestWorkspace::new()
///     .with_catalog(json!([catalog_row("FNCE101", "Corp Finance", Some(1.0))]))
///     .with_registry(json!([registry_row("FNCE101", "Corporate Finance", Some(0.5), false, "manual")]))
///     .with_core_rules(core_rules(&[]))
///     .with_major_rules(major_rules(&[("FNCE", &["FNCE101"])]));
/// ws.assert_file_exists("data/course_registry.json");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
    }

    /// Write `value` to `rel` as pretty JSON.
    pub fn write_json(&self, rel: &str, value: &Value) {
        let mut content = serde_json::to_string_pretty(value).unwrap();
        content.push('\n');
        self.write_file(rel, &content);
    }

    pub fn with_catalog(self, rows: Value) -> Self {
        self.write_json(CATALOG_PATH, &rows);
        self
    }

    pub fn with_registry(self, rows: Value) -> Self {
        self.write_json(REGISTRY_PATH, &rows);
        self
    }

    pub fn with_core_rules(self, document: Value) -> Self {
        self.write_json(CORE_RULES_PATH, &document);
        self
    }

    pub fn with_major_rules(self, document: Value) -> Self {
        self.write_json(MAJOR_RULES_PATH, &document);
        self
    }

    /// Write `coursehub.toml` at the root.
    pub fn with_config(self, toml: &str) -> Self {
        self.write_file("coursehub.toml", toml);
        self
    }

    pub fn read_file(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    pub fn read_json(&self, rel: &str) -> Value {
        serde_json::from_str(&self.read_file(rel)).unwrap()
    }

    /// The persisted registry as raw text.
    pub fn registry_text(&self) -> String {
        self.read_file(REGISTRY_PATH)
    }

    /// Assert that `rel` exists under the root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read_file(rel);
        assert!(
            file_content.contains(content),
            "File {rel} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

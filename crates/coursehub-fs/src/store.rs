//! Format-agnostic record loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format of a record file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
    Toml,
}

impl RecordFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }
}

/// Loads and saves record files.
///
/// Format is detected from the file extension:
/// - `.json` -> JSON (pretty printed, two-space indent on save)
/// - `.yaml`, `.yml` -> YAML
/// - `.toml` -> TOML
///
/// Saved text always ends with a single trailing newline so persisted files
/// stay diff-stable across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordStore;

impl RecordStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a record file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = RecordFormat::from_path(path)?;
        let content = io::read_text(path)?;
        self.parse(path, format, &content)
    }

    /// Deserialize already-read content as if it came from `path`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        path: &NormalizedPath,
        format: RecordFormat,
        content: &str,
    ) -> Result<T> {
        let parsed = match format {
            RecordFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            RecordFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            RecordFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_native(),
            format: format.name().into(),
            message,
        })
    }

    /// Serialize `value` to the text that [`RecordStore::save`] would write.
    pub fn render<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<String> {
        let format = RecordFormat::from_path(path)?;
        let rendered = match format {
            RecordFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            RecordFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            RecordFormat::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        };
        let mut content = rendered.map_err(|message| Error::Serialize {
            path: path.to_native(),
            format: format.name().into(),
            message,
        })?;

        if !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }

    /// Serialize and atomically write a record file.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = self.render(path, value)?;
        io::write_text(path, &content)
    }
}

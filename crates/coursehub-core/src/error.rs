//! Error types for coursehub-core

use std::path::PathBuf;

/// Result type for coursehub-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, reconciling or applying
///
/// Input malformation and invariant violations both abort a run before the
/// registry is persisted. New or orphaned identifiers are never errors; they
/// surface through the reconciliation report instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A rule document is missing an expected container or label
    #[error("Malformed rule document {document}: `{field}` {reason}")]
    MalformedRule {
        document: String,
        field: String,
        reason: String,
    },

    /// A record set that must be keyed uniquely repeats an identifier
    #[error("Duplicate course id {id} in {records}")]
    DuplicateEntity { records: String, id: String },

    /// A change-set mutation targets an id the registry does not hold
    #[error("Change-set {change} references unknown registry id {id}")]
    UnknownEntity { id: String, change: String },

    // Transparent wrappers for underlying crate errors
    /// Record file error from coursehub-fs
    #[error(transparent)]
    Fs(#[from] coursehub_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn malformed(
        document: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRule {
            document: document.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

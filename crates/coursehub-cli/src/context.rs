//! Workspace root detection
//!
//! Commands work from anywhere inside a CourseHub checkout: the root is the
//! nearest ancestor holding `coursehub.toml`, or the starting directory when
//! none does.

use std::path::{Path, PathBuf};

use coursehub_core::config::CONFIG_FILE_NAME;

use crate::error::{CliError, Result};

/// Walk up from `cwd` looking for `coursehub.toml`.
pub fn find_root(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

/// The root to run against: `explicit` if given, else the detected root,
/// else `cwd`.
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(root) if !root.is_dir() => Err(CliError::user(format!(
            "Root directory does not exist: {}",
            root.display()
        ))),
        Some(root) => Ok(root.to_path_buf()),
        None => Ok(find_root(cwd).unwrap_or_else(|| {
            tracing::debug!(cwd = %cwd.display(), "no coursehub.toml found, using current directory");
            cwd.to_path_buf()
        })),
    }
}

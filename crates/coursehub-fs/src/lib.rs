//! Record file handling for CourseHub
//!
//! Provides format-agnostic loading of record sets (catalog, registry, rule
//! documents, configuration), atomic locked persistence, and normalized paths.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{RecordFormat, RecordStore};

//! Shared test utilities for the CourseHub workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] — JSON builders for catalog rows, registry entries and rule documents
//! - [`workspace`] — [`TestWorkspace`](workspace::TestWorkspace), a temporary
//!   CourseHub root laid out like a real checkout

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;

//! Reconciliation core for CourseHub
//!
//! Keeps three independently maintained record sets consistent:
//!
//! - **Catalog**: currently offered courses, regenerated from the feed each term
//! - **Registry**: durable, hand-curated superset of every course a requirement
//!   has ever referenced
//! - **Rule documents**: core and major requirement definitions that reference
//!   courses by id
//!
//! # Architecture
//!
//! ```text
//!                 coursehub-cli
//!                       |
//!                  ReconcileSession
//!                       |
//!    +---------+--------+---------+-----------+
//!    |         |                  |           |
//!  model    extract            engine       apply
//!    |                            |
//! coursehub-fs            report / authority
//! ```
//!
//! A run loads all sources, extracts requirement references, reconciles, and
//! in apply mode mutates the registry in memory before a single atomic write.

pub mod apply;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod resolver;
pub mod session;

pub use apply::apply_changes;
pub use config::{ConfigResolver, ResolvedConfig, RuleKind, RuleSource, Settings, SourceOverrides};
pub use engine::{
    ChangeSet, CompletionStatus, FieldDrift, Institution, Reconciliation, Summary, reconcile,
};
pub use error::{Error, Result};
pub use extract::{References, extract_references};
pub use model::{Catalog, CatalogEntry, Registry, RegistryEntry, RuleDocument, SourceTag};
pub use resolver::{CourseResolver, ResolvedCourse};
pub use session::{ReconcileSession, RunMode, RunOutcome, SourceSummary, Sources};

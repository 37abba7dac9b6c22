//! Registry Sanity Core
//!
//! A library for checking the consistency of a community's repository
//! registries: who owns each repository, how each repository is declared in
//! its namespace registry, and what changed since the last merged revision.
//!
//! # Features
//!
//! - **Typed loading**: every registry file is deserialized once, so shape
//!   errors surface as a single [`LoadError`](model::LoadError)
//! - **Ownership resolution**: case-insensitive and case-sensitive ownership
//!   maps side by side
//! - **Checks**: single ownership, cross-references, coverage, naming, branch
//!   policy and change-set metadata
//! - **Snapshots**: previous registries fetched through a
//!   [`SnapshotProvider`](validate::SnapshotProvider) into temporary files
//!   that are always removed
//!
//! # Quick Start
//!
//! ```no_run
//! use registry_sanity_core::model::{CommunityLoader, NamespaceLayout, OwnersFileDirectory, RegistryPaths};
//! use registry_sanity_core::validate::{SanityRunner, SnapshotError, SnapshotProvider};
//! use std::path::Path;
//!
//! struct Unavailable;
//!
//! impl SnapshotProvider for Unavailable {
//!     fn show(&self, _revision: &str, _path: &Path) -> Result<Vec<u8>, SnapshotError> {
//!         Err(SnapshotError::Provider("offline".to_string()))
//!     }
//! }
//!
//! let root = Path::new("/path/to/community");
//! let loader = CommunityLoader::new(root, RegistryPaths::default(), NamespaceLayout::default());
//! let maintainers = OwnersFileDirectory::new(root, RegistryPaths::default());
//!
//! let report = SanityRunner::default().run(&loader, &Unavailable, &maintainers);
//! for section in &report.sections {
//!     for issue in &section.result.issues {
//!         println!("{}", issue);
//!     }
//! }
//! println!("{} errors", report.error_count());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Typed registry records and loading
//! - [`ownership`]: Ownership maps and normalization policies
//! - [`validate`]: Checks, snapshots and the run orchestrator

#[cfg(feature = "generate")]
pub mod generate;
pub mod model;
pub mod ownership;
pub mod validate;

// Re-export commonly used types at the crate root
pub use model::{Community, CommunityLoader, LoadError, NamespaceLayout, RegistryPaths};
pub use ownership::OwnershipIndex;
pub use validate::checks::{Check, CheckContext};
pub use validate::{FatalError, SanityReport, SanityRunner, ValidationResult};

//! Validation of a community snapshot.
//!
//! [`SanityRunner`] runs the checks of [`checks`] in order and collects their
//! findings into a [`SanityReport`].
//!
//! # Example
//!
//! ```rust
//! use registry_sanity_core::validate::checks::NamingCheck;
//! use registry_sanity_core::validate::Severity;
//!
//! assert!(NamingCheck::check_name("openEuler-docs").is_none());
//!
//! let issue = NamingCheck::check_name("9lives").unwrap();
//! assert_eq!(issue.severity(), Severity::Error);
//! assert_eq!(issue.to_string(), "9lives must start with a letter");
//! ```

pub mod checks;
mod error;
pub mod runner;
pub mod snapshot;
pub mod suggest;

// Re-export public types
pub use error::{FatalError, Severity, ValidationIssue, ValidationResult};
pub use runner::{CheckSection, DEFAULT_PREVIOUS_REVISION, RunOptions, SanityReport, SanityRunner};
pub use snapshot::{PreviousRegistries, SnapshotError, SnapshotProvider};
pub use suggest::{MaintainerDirectory, ReviewSuggestion, suggest_reviewers};

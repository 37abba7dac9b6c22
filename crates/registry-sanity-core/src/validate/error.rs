//! Findings and fatal errors of registry validation.
//!
//! Counted findings are [`ValidationIssue`]s collected in a
//! [`ValidationResult`]; only [`Severity::Error`] contributes to the exit code.
//! Conditions that stop the run are [`FatalError`]s.

use crate::model::{FormatVersion, LoadError};
use crate::ownership::PrivateSummary;
use crate::validate::snapshot::SnapshotError;
use serde::Serialize;
use thiserror::Error;

/// The severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note, never counted.
    Info,
    /// Advisory finding, printed but never counted.
    Warning,
    /// Rule violation, counted toward the exit code.
    Error,
}

fn join(sigs: &[String]) -> String {
    sigs.join(", ")
}

/// A finding reported by one of the checks.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Repository owned by more than one group.
    #[error("{repository}: co-managed by these SIGs {{{}}}", join(.sigs))]
    MultipleOwners {
        /// Case-insensitive repository key.
        repository: String,
        /// All owning groups.
        sigs: Vec<String>,
    },

    /// A group lists the same repository twice.
    #[error("{repository} has been managed by {sig} multiple times")]
    DuplicateClaim {
        /// Normalized identifier.
        repository: String,
        /// Claiming group.
        sig: String,
    },

    /// Aggregate result of the `Private` co-management analysis.
    #[error(
        "There're {} repositories in total, {} co-managed by Private, {} managed by Private only",
        .summary.total,
        .summary.co_managed,
        .summary.private_only
    )]
    PrivateManagement {
        /// Counts of the analysis.
        summary: PrivateSummary,
    },

    /// Registry entry without a `type` field.
    #[error("Repository {repository} has no type tag")]
    MissingType {
        /// Qualified identifier.
        repository: String,
    },

    /// Registry entry listed more than once.
    #[error("Repository {repository} in {registry}.yaml has duplication")]
    DuplicateEntry {
        /// Qualified identifier.
        repository: String,
        /// Registry name.
        registry: String,
    },

    /// Registry entry not owned by any group.
    #[error("Repository {repository} in {registry}.yaml cannot be found in the SIG registry")]
    NotOwned {
        /// Qualified identifier.
        repository: String,
        /// Registry name.
        registry: String,
    },

    /// Public repository owned by `Private`.
    #[error(
        "Repository {repository} marked as public in {registry}.yaml, but listed in Private SIG"
    )]
    PublicButPrivateOwned {
        /// Qualified identifier.
        repository: String,
        /// Registry name.
        registry: String,
    },

    /// Private repository not owned by `Private`.
    #[error(
        "Repository {repository} marked as private in {registry}.yaml, but not listed in Private SIG"
    )]
    PrivateButNotPrivateOwned {
        /// Qualified identifier.
        repository: String,
        /// Registry name.
        registry: String,
    },

    /// Owned repository absent from every namespace registry.
    #[error("{repository} listed in the SIG registry, but not in {registry}.yaml")]
    MissingFromRegistry {
        /// Identifier as listed by the owning group.
        repository: String,
        /// Registry the identifier points at.
        registry: String,
    },

    /// Repository name outside the allowed length.
    #[error("{name} too long or too short")]
    NameLength {
        /// Lower-cased repository name.
        name: String,
    },

    /// Repository name with a forbidden character.
    #[error("{name} contains invalid character")]
    NameInvalidCharacter {
        /// Lower-cased repository name.
        name: String,
    },

    /// Repository name not starting with a letter.
    #[error("{name} must start with a letter")]
    NameMustStartWithLetter {
        /// Lower-cased repository name.
        name: String,
    },

    /// No flat protected-branch list.
    #[error("{repository} doesn't have protected_branches")]
    MissingProtectedBranches {
        /// Qualified identifier.
        repository: String,
    },

    /// `master` missing from the protected-branch list.
    #[error("master branch in {repository} is not protected")]
    MasterNotProtected {
        /// Qualified identifier.
        repository: String,
    },

    /// No structured branch declarations.
    #[error("{repository} doesn't have branches")]
    MissingBranches {
        /// Qualified identifier.
        repository: String,
    },

    /// Branch with a protection kind other than `protected`/`readonly`.
    #[error("{repository} branch {branch} is not valid")]
    InvalidBranchType {
        /// Qualified identifier.
        repository: String,
        /// Branch name.
        branch: String,
    },

    /// Non-master branch without a parent.
    #[error("{repository} branch {branch} has not valid parent branch")]
    MissingBranchParent {
        /// Qualified identifier.
        repository: String,
        /// Branch name.
        branch: String,
    },

    /// Zero or several `master` declarations.
    #[error("{repository}'s master branch is not properly set")]
    MasterBranchMisconfigured {
        /// Qualified identifier.
        repository: String,
        /// Number of `master` declarations found.
        count: usize,
    },

    /// Added or changed repository, with the groups owning it.
    #[error("adding {repository} to SIG {{{}}}", join(.sigs))]
    RepositoryChanged {
        /// Qualified identifier.
        repository: String,
        /// Owning groups.
        sigs: Vec<String>,
    },

    /// Description shorter than required.
    #[error("{repository}'s description is too short")]
    DescriptionTooShort {
        /// Qualified identifier.
        repository: String,
    },

    /// Source package without upstream link.
    #[error("{repository} missed upstream information")]
    MissingUpstream {
        /// Qualified identifier.
        repository: String,
    },

    /// Repository name on the blacklist.
    #[error("{repository} was black-listed. Because: {reason}")]
    Blacklisted {
        /// Qualified identifier.
        repository: String,
        /// Reason from the blacklist.
        reason: String,
    },

    /// Repository present in the previous snapshot only.
    #[error("deleting {repository}")]
    RepositoryDeleted {
        /// Qualified identifier.
        repository: String,
    },

    /// Maintainer list of a group to notify could not be read.
    #[error("cannot find maintainers of SIG {sig}: {reason}")]
    MaintainersUnavailable {
        /// Group name.
        sig: String,
        /// Load failure.
        reason: String,
    },
}

impl ValidationIssue {
    /// Returns the severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::MultipleOwners { .. } => Severity::Error,
            ValidationIssue::DuplicateClaim { .. } => Severity::Error,
            ValidationIssue::PrivateManagement { .. } => Severity::Info,
            ValidationIssue::MissingType { .. } => Severity::Error,
            ValidationIssue::DuplicateEntry { .. } => Severity::Error,
            ValidationIssue::NotOwned { .. } => Severity::Error,
            ValidationIssue::PublicButPrivateOwned { .. } => Severity::Error,
            ValidationIssue::PrivateButNotPrivateOwned { .. } => Severity::Warning,
            ValidationIssue::MissingFromRegistry { .. } => Severity::Error,
            ValidationIssue::NameLength { .. } => Severity::Error,
            ValidationIssue::NameInvalidCharacter { .. } => Severity::Error,
            ValidationIssue::NameMustStartWithLetter { .. } => Severity::Error,
            ValidationIssue::MissingProtectedBranches { .. } => Severity::Error,
            ValidationIssue::MasterNotProtected { .. } => Severity::Error,
            ValidationIssue::MissingBranches { .. } => Severity::Error,
            ValidationIssue::InvalidBranchType { .. } => Severity::Error,
            ValidationIssue::MissingBranchParent { .. } => Severity::Error,
            ValidationIssue::MasterBranchMisconfigured { .. } => Severity::Error,
            ValidationIssue::RepositoryChanged { .. } => Severity::Info,
            ValidationIssue::DescriptionTooShort { .. } => Severity::Error,
            ValidationIssue::MissingUpstream { .. } => Severity::Error,
            ValidationIssue::Blacklisted { .. } => Severity::Error,
            ValidationIssue::RepositoryDeleted { .. } => Severity::Warning,
            ValidationIssue::MaintainersUnavailable { .. } => Severity::Warning,
        }
    }
}

/// The findings of one check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// All findings, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Creates a new empty validation result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validation result with the given issues.
    pub fn with_issues(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Returns true if no error-severity issue was found.
    pub fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    /// Returns true if at least one error-severity issue was found.
    pub fn has_errors(&self) -> bool {
        self.errors_only().next().is_some()
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.errors_only().count()
    }

    /// Returns only errors.
    pub fn errors_only(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|e| e.severity() == Severity::Error)
    }

    /// Returns only warnings.
    pub fn warnings_only(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|e| e.severity() == Severity::Warning)
    }

    /// Adds an issue to the result.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Merges another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.issues.extend(other.issues);
    }
}

/// A condition that stops the run.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A registry file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The previous snapshot could not be retrieved.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// A namespace registry declares another community.
    #[error("{registry}.yaml has wrong community setting (found {})", .found.as_deref().unwrap_or("nothing"))]
    WrongCommunity {
        /// Registry name, also the expected tag.
        registry: String,
        /// Declared tag.
        found: Option<String>,
    },

    /// The two registries declare different schema versions.
    #[error("{public} and {source_package} have different format_version ({public_version} vs {source_version})")]
    VersionMismatch {
        /// Public registry name.
        public: String,
        /// Version of the public registry.
        public_version: FormatVersion,
        /// Source-package registry name.
        source_package: String,
        /// Version of the source-package registry.
        source_version: FormatVersion,
    },

    /// The shared schema version is outside the supported range.
    #[error(
        "current format version {version} is out of support ({}..={})",
        FormatVersion::MIN_SUPPORTED,
        FormatVersion::MAX_SUPPORTED
    )]
    UnsupportedVersion {
        /// Declared version.
        version: FormatVersion,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_owners_lists_sigs() {
        let issue = ValidationIssue::MultipleOwners {
            repository: "foo".to_string(),
            sigs: vec!["SIG-A".to_string(), "SIG-B".to_string()],
        };
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.to_string(), "foo: co-managed by these SIGs {SIG-A, SIG-B}");
    }

    #[test]
    fn advisory_issues_are_not_errors() {
        let warning = ValidationIssue::RepositoryDeleted {
            repository: "openeuler/baz".to_string(),
        };
        assert_eq!(warning.severity(), Severity::Warning);

        let info = ValidationIssue::PrivateManagement {
            summary: PrivateSummary::default(),
        };
        assert_eq!(info.severity(), Severity::Info);
    }

    #[test]
    fn blacklisted_includes_reason() {
        let issue = ValidationIssue::Blacklisted {
            repository: "openeuler/bad".to_string(),
            reason: "license".to_string(),
        };
        assert!(issue.to_string().contains("Because: license"));
    }

    #[test]
    fn issues_serialize_with_kind_tag() {
        let issue = ValidationIssue::InvalidBranchType {
            repository: "openeuler/a".to_string(),
            branch: "dev".to_string(),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["kind"], "invalid_branch_type");
        assert_eq!(value["branch"], "dev");
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), "warning");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn validation_result_counts_errors_only() {
        let result = ValidationResult::with_issues(vec![
            ValidationIssue::MissingType {
                repository: "openeuler/a".to_string(),
            },
            ValidationIssue::RepositoryDeleted {
                repository: "openeuler/b".to_string(),
            },
        ]);
        assert!(!result.is_ok());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warnings_only().count(), 1);
    }

    #[test]
    fn validation_result_with_only_warnings_is_ok() {
        let mut result = ValidationResult::new();
        result.add(ValidationIssue::RepositoryDeleted {
            repository: "openeuler/b".to_string(),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn validation_result_merge() {
        let mut first = ValidationResult::new();
        first.add(ValidationIssue::NameLength {
            name: "a".to_string(),
        });
        let mut second = ValidationResult::new();
        second.add(ValidationIssue::NameLength {
            name: "b".to_string(),
        });
        first.merge(second);
        assert_eq!(first.error_count(), 2);
    }

    #[test]
    fn fatal_messages() {
        let error = FatalError::WrongCommunity {
            registry: "openeuler".to_string(),
            found: Some("other".to_string()),
        };
        assert!(error.to_string().contains("openeuler.yaml has wrong community setting"));

        let error = FatalError::UnsupportedVersion {
            version: FormatVersion::new(2.5),
        };
        assert!(error.to_string().contains("2.5"));
    }
}

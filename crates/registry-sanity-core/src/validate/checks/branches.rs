//! Default-branch protection policy.

use super::{Check, CheckContext};
use crate::model::{FormatVersion, RegistryEntry};
use crate::validate::{ValidationIssue, ValidationResult};

const MASTER: &str = "master";

/// The rule set in force for a schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRules {
    /// Versions below 2.0: a flat `protected_branches` list containing `master`.
    ProtectedList,
    /// Version 2.0: structured `branches` records.
    Structured,
}

impl BranchRules {
    /// Selects the rule set for a schema version.
    pub fn for_version(version: FormatVersion) -> Self {
        if version < FormatVersion::STRUCTURED_BRANCHES {
            Self::ProtectedList
        } else {
            Self::Structured
        }
    }
}

/// A check that every registry entry protects its default branch.
#[derive(Debug, Clone)]
pub struct BranchPolicyCheck {
    rules: BranchRules,
}

impl BranchPolicyCheck {
    /// Creates the check with an explicit rule set.
    pub fn new(rules: BranchRules) -> Self {
        Self { rules }
    }

    /// Creates the check for a schema version.
    pub fn for_version(version: FormatVersion) -> Self {
        Self::new(BranchRules::for_version(version))
    }

    /// Returns the rule set in force.
    pub fn rules(&self) -> BranchRules {
        self.rules
    }

    fn check_protected_list(repository: &str, entry: &RegistryEntry, result: &mut ValidationResult) {
        let branches = entry.protected_branches.as_deref().unwrap_or_default();
        if branches.is_empty() {
            result.add(ValidationIssue::MissingProtectedBranches {
                repository: repository.to_string(),
            });
        } else if !branches.iter().any(|branch| branch == MASTER) {
            result.add(ValidationIssue::MasterNotProtected {
                repository: repository.to_string(),
            });
        }
    }

    fn check_structured(repository: &str, entry: &RegistryEntry, result: &mut ValidationResult) {
        let branches = entry.branches.as_deref().unwrap_or_default();
        if branches.is_empty() {
            result.add(ValidationIssue::MissingBranches {
                repository: repository.to_string(),
            });
            return;
        }

        let mut masters = 0;
        for branch in branches {
            if !branch.has_valid_kind() {
                result.add(ValidationIssue::InvalidBranchType {
                    repository: repository.to_string(),
                    branch: branch.name.clone(),
                });
            }
            if branch.name == MASTER {
                masters += 1;
            } else if !branch.has_parent() {
                result.add(ValidationIssue::MissingBranchParent {
                    repository: repository.to_string(),
                    branch: branch.name.clone(),
                });
            }
        }

        if masters != 1 {
            result.add(ValidationIssue::MasterBranchMisconfigured {
                repository: repository.to_string(),
                count: masters,
            });
        }
    }
}

impl Check for BranchPolicyCheck {
    fn name(&self) -> &'static str {
        "branches"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        match self.rules {
            BranchRules::ProtectedList => "All repositories' must have protected_branches",
            BranchRules::Structured => "All repositories' must have proper branches setting",
        }
        .to_string()
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (namespace, entry) in ctx.community.entries() {
            let repository = ctx.layout().qualify(namespace, &entry.name);
            match self.rules {
                BranchRules::ProtectedList => {
                    Self::check_protected_list(&repository, entry, &mut result)
                }
                BranchRules::Structured => Self::check_structured(&repository, entry, &mut result),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BranchSpec, RepositoryType};
    use crate::validate::checks::test_support::{community, context};

    fn run(rules: BranchRules, entry: RegistryEntry) -> ValidationResult {
        let ctx = context(community(vec![], vec![entry], vec![]));
        BranchPolicyCheck::new(rules).run(&ctx)
    }

    fn entry() -> RegistryEntry {
        RegistryEntry::new("repo", RepositoryType::Public)
    }

    #[test]
    fn rules_selected_by_version() {
        assert_eq!(
            BranchRules::for_version(FormatVersion::new(1.0)),
            BranchRules::ProtectedList
        );
        assert_eq!(
            BranchRules::for_version(FormatVersion::new(1.9)),
            BranchRules::ProtectedList
        );
        assert_eq!(
            BranchRules::for_version(FormatVersion::new(2.0)),
            BranchRules::Structured
        );
    }

    #[test]
    fn protected_list_with_master_passes() {
        let result = run(
            BranchRules::ProtectedList,
            entry().with_protected_branches(["master", "next"]),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn protected_list_missing_or_empty() {
        let result = run(BranchRules::ProtectedList, entry());
        assert!(matches!(
            result.issues[0],
            ValidationIssue::MissingProtectedBranches { .. }
        ));

        let result = run(
            BranchRules::ProtectedList,
            entry().with_protected_branches(Vec::<String>::new()),
        );
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn protected_list_without_master() {
        let result = run(
            BranchRules::ProtectedList,
            entry().with_protected_branches(["develop"]),
        );
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.issues[0].to_string(),
            "master branch in openeuler/repo is not protected"
        );
    }

    #[test]
    fn structured_valid() {
        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![
                BranchSpec::new("master", "protected"),
                BranchSpec::new("openEuler-22.03-LTS", "readonly").with_create_from("master"),
            ]),
        );
        assert!(result.issues.is_empty());
    }

    #[test]
    fn structured_missing_branches() {
        let result = run(BranchRules::Structured, entry());
        assert_eq!(result.error_count(), 1);
        assert!(matches!(result.issues[0], ValidationIssue::MissingBranches { .. }));
    }

    #[test]
    fn structured_invalid_type() {
        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![BranchSpec::new("master", "open")]),
        );
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.issues[0].to_string(),
            "openeuler/repo branch master is not valid"
        );
    }

    #[test]
    fn structured_branch_without_parent() {
        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![
                BranchSpec::new("master", "protected"),
                BranchSpec::new("feature", "protected"),
            ]),
        );
        assert_eq!(result.error_count(), 1);
        assert!(matches!(
            result.issues[0],
            ValidationIssue::MissingBranchParent { .. }
        ));
    }

    #[test]
    fn structured_master_count() {
        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![
                BranchSpec::new("stable", "protected").with_create_from("next"),
            ]),
        );
        assert!(matches!(
            result.issues[0],
            ValidationIssue::MasterBranchMisconfigured { count: 0, .. }
        ));

        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![
                BranchSpec::new("master", "protected"),
                BranchSpec::new("master", "readonly"),
            ]),
        );
        assert_eq!(result.error_count(), 1);
        assert!(matches!(
            result.issues[0],
            ValidationIssue::MasterBranchMisconfigured { count: 2, .. }
        ));
    }

    #[test]
    fn one_branch_can_raise_several_errors() {
        let result = run(
            BranchRules::Structured,
            entry().with_branches(vec![BranchSpec {
                name: "dev".to_string(),
                kind: None,
                create_from: None,
            }]),
        );
        // invalid type, missing parent, no master
        assert_eq!(result.error_count(), 3);
    }
}

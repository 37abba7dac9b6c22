//! Ownership uniqueness checks.

use super::{Check, CheckContext};
use crate::validate::{ValidationIssue, ValidationResult};
use log::debug;

/// A check that every repository is owned by exactly one group.
///
/// Uses the case-insensitive map, so a repository and its counterpart in the
/// other namespace must share their owner. `Private` is not counted and
/// identifiers in the exception set are skipped.
#[derive(Debug, Clone, Default)]
pub struct SingleOwnerCheck;

impl SingleOwnerCheck {
    /// Creates a new single-owner check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for SingleOwnerCheck {
    fn name(&self) -> &'static str {
        "single-owner"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        "Repository in both namespaces should be managed by a single SIG.".to_string()
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (repository, sigs) in ctx.ownership.case_insensitive() {
            if sigs.len() == 1 || ctx.community.exceptions.exempts(repository) {
                continue;
            }
            result.add(ValidationIssue::MultipleOwners {
                repository: repository.clone(),
                sigs: sigs.iter().cloned().collect(),
            });
        }

        debug!("Single-owner check found {} issues", result.issues.len());
        result
    }
}

/// A check that no group lists the same repository twice.
///
/// Comparison is case-insensitive because the hosting platform refuses names
/// that differ only by case.
#[derive(Debug, Clone, Default)]
pub struct DuplicateClaimCheck;

impl DuplicateClaimCheck {
    /// Creates a new duplicate-claim check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for DuplicateClaimCheck {
    fn name(&self) -> &'static str {
        "duplicate-claim"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        "Repository in either namespace should never be duplicated.".to_string()
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        ValidationResult::with_issues(
            ctx.ownership
                .duplicate_claims()
                .iter()
                .map(|claim| ValidationIssue::DuplicateClaim {
                    repository: claim.repository.clone(),
                    sig: claim.sig.clone(),
                })
                .collect(),
        )
    }
}

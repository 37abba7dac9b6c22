//! Ownership coverage: every owned repository is registered somewhere.

use super::{Check, CheckContext, CrossChecked};
use crate::model::Namespace;
use crate::validate::{ValidationIssue, ValidationResult};

/// A check that every identifier in the case-sensitive ownership map was seen
/// by the cross-reference passes.
#[derive(Debug, Clone)]
pub struct CoverageCheck {
    cross_checked: CrossChecked,
}

impl CoverageCheck {
    /// Creates the check from the identifiers recorded by cross-referencing.
    pub fn new(cross_checked: CrossChecked) -> Self {
        Self { cross_checked }
    }
}

impl Check for CoverageCheck {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn description(&self, ctx: &CheckContext) -> String {
        let layout = ctx.layout();
        format!(
            "All repositories in the SIG registry must be listed in either {}.yaml or {}.yaml",
            layout.name(Namespace::Public),
            layout.name(Namespace::SourcePackage)
        )
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        let mut result = ValidationResult::new();

        for repository in ctx.ownership.case_sensitive().keys() {
            if self.cross_checked.contains(repository) {
                continue;
            }
            let registry = match ctx.layout().split(repository) {
                Some((namespace, _)) => ctx.layout().name(namespace).to_string(),
                None => repository
                    .split('/')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            };
            result.add(ValidationIssue::MissingFromRegistry {
                repository: repository.clone(),
                registry,
            });
        }

        result
    }
}

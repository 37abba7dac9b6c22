//! Registry-to-ownership cross-referencing.

use super::CheckContext;
use crate::model::{Namespace, RepositoryType};
use crate::validate::{ValidationIssue, ValidationResult};
use log::debug;
use std::collections::BTreeSet;

/// Qualified identifiers already cross-referenced during this run.
///
/// Filled by [`CrossReferenceCheck`] across both namespace passes and then
/// handed to [`CoverageCheck`](super::CoverageCheck).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossChecked {
    identifiers: BTreeSet<String>,
}

impl CrossChecked {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the identifier was already processed.
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Records an identifier.
    pub fn insert(&mut self, identifier: String) {
        self.identifiers.insert(identifier);
    }

    /// Number of recorded identifiers.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// A check that one namespace registry agrees with the group registry.
///
/// For each entry, in order: a missing `type` is an error and ends processing
/// of the entry; an identifier already seen is a duplicate; an identifier no
/// group owns is an error unless exempted; a public entry owned by `Private`
/// is an error; a private entry not owned by `Private` is a warning.
#[derive(Debug, Clone)]
pub struct CrossReferenceCheck {
    namespace: Namespace,
}

impl CrossReferenceCheck {
    /// Creates the check for one namespace.
    pub fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// Returns the name of this check.
    pub fn name(&self) -> &'static str {
        match self.namespace {
            Namespace::Public => "cross-reference-public",
            Namespace::SourcePackage => "cross-reference-source",
        }
    }

    /// Returns the statement of the rule.
    pub fn description(&self, ctx: &CheckContext) -> String {
        format!(
            "repository/{}.yaml should be consistent with the SIG registry",
            ctx.layout().name(self.namespace)
        )
    }

    /// Runs the check, recording every processed identifier in `cross_checked`.
    pub fn run(&self, ctx: &CheckContext, cross_checked: &mut CrossChecked) -> ValidationResult {
        let mut result = ValidationResult::new();
        let registry = ctx.layout().name(self.namespace).to_string();

        for entry in &ctx.community.registry(self.namespace).repositories {
            let repository = ctx.layout().qualify(self.namespace, &entry.name);

            let Some(repo_type) = &entry.repo_type else {
                result.add(ValidationIssue::MissingType { repository });
                continue;
            };

            if cross_checked.contains(&repository) {
                result.add(ValidationIssue::DuplicateEntry {
                    repository: repository.clone(),
                    registry: registry.clone(),
                });
            }

            if ctx.ownership.owners(&repository).is_none()
                && !ctx.community.exceptions.exempts(&repository)
            {
                result.add(ValidationIssue::NotOwned {
                    repository: repository.clone(),
                    registry: registry.clone(),
                });
            }

            let private_owned = ctx.ownership.is_private_owned(&repository);
            match repo_type {
                RepositoryType::Public if private_owned => {
                    result.add(ValidationIssue::PublicButPrivateOwned {
                        repository: repository.clone(),
                        registry: registry.clone(),
                    });
                }
                RepositoryType::Private if !private_owned => {
                    result.add(ValidationIssue::PrivateButNotPrivateOwned {
                        repository: repository.clone(),
                        registry: registry.clone(),
                    });
                }
                _ => {}
            }

            cross_checked.insert(repository);
        }

        debug!(
            "Cross-reference of {} found {} issues, {} identifiers recorded",
            registry,
            result.issues.len(),
            cross_checked.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExceptionSet, PRIVATE_SIG, RegistryEntry, SigRecord};
    use crate::validate::Severity;
    use crate::validate::checks::test_support::{community, context};

    fn public(name: &str) -> RegistryEntry {
        RegistryEntry::new(name, RepositoryType::Public)
    }

    fn private(name: &str) -> RegistryEntry {
        RegistryEntry::new(name, RepositoryType::Private)
    }

    fn run_public(sigs: Vec<SigRecord>, entries: Vec<RegistryEntry>) -> (ValidationResult, CrossChecked) {
        let ctx = context(community(sigs, entries, vec![]));
        let mut cross_checked = CrossChecked::new();
        let result = CrossReferenceCheck::new(Namespace::Public).run(&ctx, &mut cross_checked);
        (result, cross_checked)
    }

    #[test]
    fn consistent_registry_passes() {
        let (result, cross_checked) = run_public(
            vec![SigRecord::new("A", ["openeuler/a"])],
            vec![public("a")],
        );
        assert!(result.issues.is_empty());
        assert!(cross_checked.contains("openeuler/a"));
    }

    #[test]
    fn missing_type_skips_remaining_checks() {
        let entry = RegistryEntry {
            name: "untyped".to_string(),
            ..Default::default()
        };
        let (result, cross_checked) = run_public(vec![], vec![entry]);
        assert_eq!(result.issues.len(), 1);
        assert!(matches!(result.issues[0], ValidationIssue::MissingType { .. }));
        assert!(!cross_checked.contains("openeuler/untyped"));
    }

    #[test]
    fn duplicate_entry_reported() {
        let (result, _) = run_public(
            vec![SigRecord::new("A", ["openeuler/a"])],
            vec![public("a"), public("a")],
        );
        assert_eq!(result.error_count(), 1);
        assert!(matches!(result.issues[0], ValidationIssue::DuplicateEntry { .. }));
    }

    #[test]
    fn duplicate_detected_against_running_set() {
        let ctx = context(community(
            vec![SigRecord::new("A", ["openeuler/a"])],
            vec![public("a")],
            vec![],
        ));
        let mut cross_checked = CrossChecked::new();
        cross_checked.insert("openeuler/a".to_string());
        let result = CrossReferenceCheck::new(Namespace::Public).run(&ctx, &mut cross_checked);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn unowned_entry_reported_unless_exempted() {
        let (result, _) = run_public(vec![], vec![public("orphan")]);
        assert_eq!(result.error_count(), 1);
        assert!(result.issues[0].to_string().contains("cannot be found"));

        let mut community = community(vec![], vec![public("orphan")], vec![]);
        community.exceptions = ["openeuler/orphan"].into_iter().collect::<ExceptionSet>();
        let mut cross_checked = CrossChecked::new();
        let result =
            CrossReferenceCheck::new(Namespace::Public).run(&context(community), &mut cross_checked);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn ownership_lookup_is_case_sensitive() {
        let (result, _) = run_public(
            vec![SigRecord::new("A", ["openeuler/Docs"])],
            vec![public("docs")],
        );
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn public_owned_by_private_is_error() {
        let (result, _) = run_public(
            vec![SigRecord::new(PRIVATE_SIG, ["openeuler/secret"])],
            vec![public("secret")],
        );
        assert_eq!(result.error_count(), 1);
        assert!(matches!(
            result.issues[0],
            ValidationIssue::PublicButPrivateOwned { .. }
        ));
    }

    #[test]
    fn private_not_owned_by_private_is_warning() {
        let (result, _) = run_public(
            vec![SigRecord::new("A", ["openeuler/hidden"])],
            vec![private("hidden")],
        );
        assert!(result.is_ok());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity(), Severity::Warning);
    }

    #[test]
    fn private_owned_by_private_passes() {
        let (result, _) = run_public(
            vec![
                SigRecord::new("A", ["openeuler/hidden"]),
                SigRecord::new(PRIVATE_SIG, ["openeuler/hidden"]),
            ],
            vec![private("hidden")],
        );
        assert!(result.issues.is_empty());
    }

    #[test]
    fn source_namespace_uses_its_prefix() {
        let ctx = context(community(
            vec![SigRecord::new("A", ["src-openeuler/zlib"])],
            vec![],
            vec![public("zlib")],
        ));
        let mut cross_checked = CrossChecked::new();
        let result =
            CrossReferenceCheck::new(Namespace::SourcePackage).run(&ctx, &mut cross_checked);
        assert!(result.issues.is_empty());
        assert!(cross_checked.contains("src-openeuler/zlib"));
    }
}

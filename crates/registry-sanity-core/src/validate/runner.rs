//! Orchestration of a full sanity run.

use super::checks::{
    BranchPolicyCheck, ChangeSetCheck, Check, CheckContext, CoverageCheck, CrossChecked,
    CrossReferenceCheck, DuplicateClaimCheck, NamingCheck, PrivateManagementCheck,
    SingleOwnerCheck, VersionGate,
};
use super::snapshot::{PreviousRegistries, SnapshotProvider};
use super::suggest::{MaintainerDirectory, ReviewSuggestion, suggest_reviewers};
use super::{FatalError, ValidationResult};
use crate::model::{Community, CommunityLoader, Namespace, RegistryPaths};
use log::{debug, info};
use serde::Serialize;

/// Revision the change set is computed against unless configured otherwise.
pub const DEFAULT_PREVIOUS_REVISION: &str = "remotes/origin/master";

/// Options of a sanity run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Revision of the previously merged registries.
    pub previous_revision: String,
    /// Skips the change-set section and the suggestions.
    pub skip_changes: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            previous_revision: DEFAULT_PREVIOUS_REVISION.to_string(),
            skip_changes: false,
        }
    }
}

/// The outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSection {
    /// Check name.
    pub name: &'static str,
    /// Statement of the rule.
    pub description: String,
    /// Findings.
    pub result: ValidationResult,
    /// Printed when the section has errors.
    pub hint: Option<&'static str>,
}

impl CheckSection {
    fn from_check(check: &dyn Check, ctx: &CheckContext) -> Self {
        debug!("Running check: {}", check.name());
        let result = check.run(ctx);
        debug!(
            "Check '{}' found {} issues",
            check.name(),
            result.issues.len()
        );
        Self {
            name: check.name(),
            description: check.description(ctx),
            result,
            hint: check.failure_hint(),
        }
    }

    /// Returns true if the section has no error-severity issue.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a run produced, in execution order.
///
/// Sections finished before a fatal error are kept.
#[derive(Debug, Default)]
pub struct SanityReport {
    /// Completed sections.
    pub sections: Vec<CheckSection>,
    /// Maintainers to ask for review.
    pub suggestions: Vec<ReviewSuggestion>,
    /// The condition that stopped the run, if any.
    pub fatal: Option<FatalError>,
}

impl SanityReport {
    /// Total number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.result.error_count())
            .sum()
    }

    /// Returns true if the run completed without errors.
    pub fn is_clean(&self) -> bool {
        self.fatal.is_none() && self.error_count() == 0
    }

    fn stop(mut self, error: FatalError) -> Self {
        info!("Run stopped: {}", error);
        self.fatal = Some(error);
        self
    }
}

/// Runs every section in order against one community directory.
#[derive(Debug, Clone, Default)]
pub struct SanityRunner {
    options: RunOptions,
}

impl SanityRunner {
    /// Creates a runner.
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this runner.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Loads the current snapshot and checks it.
    pub fn run(
        &self,
        loader: &CommunityLoader,
        snapshots: &dyn SnapshotProvider,
        maintainers: &dyn MaintainerDirectory,
    ) -> SanityReport {
        match loader.load() {
            Ok(community) => self.check(community, loader.paths(), snapshots, maintainers),
            Err(error) => SanityReport::default().stop(error.into()),
        }
    }

    /// Checks an already loaded snapshot.
    ///
    /// `paths` locates the registries inside the previous revision.
    pub fn check(
        &self,
        community: Community,
        paths: &RegistryPaths,
        snapshots: &dyn SnapshotProvider,
        maintainers: &dyn MaintainerDirectory,
    ) -> SanityReport {
        let mut report = SanityReport::default();

        let gate = VersionGate::new();
        let version = match gate.verify(&community) {
            Ok(version) => version,
            Err(error) => return report.stop(error),
        };
        report.sections.push(CheckSection {
            name: gate.name(),
            description: gate.description(&community.layout),
            result: ValidationResult::new(),
            hint: None,
        });

        let ctx = CheckContext::new(community, version);
        info!(
            "Checking {} owned repositories",
            ctx.ownership.case_sensitive().len()
        );

        for check in [
            &SingleOwnerCheck::new() as &dyn Check,
            &DuplicateClaimCheck::new(),
            &PrivateManagementCheck::new(),
        ] {
            report.sections.push(CheckSection::from_check(check, &ctx));
        }

        let mut cross_checked = CrossChecked::new();
        for namespace in Namespace::ALL {
            let check = CrossReferenceCheck::new(namespace);
            let result = check.run(&ctx, &mut cross_checked);
            report.sections.push(CheckSection {
                name: check.name(),
                description: check.description(&ctx),
                result,
                hint: None,
            });
        }

        for check in [
            &CoverageCheck::new(cross_checked) as &dyn Check,
            &NamingCheck::new(),
            &BranchPolicyCheck::for_version(version),
        ] {
            report.sections.push(CheckSection::from_check(check, &ctx));
        }

        if self.options.skip_changes {
            info!("Change-set validation skipped");
            return report;
        }

        let previous =
            match PreviousRegistries::fetch(snapshots, &self.options.previous_revision, paths) {
                Ok(previous) => previous,
                Err(error) => return report.stop(error.into()),
            };
        let check = ChangeSetCheck::new(previous);
        let changes = check.evaluate(&ctx);
        let (suggestions, lookups) = suggest_reviewers(&changes.attention, maintainers);

        let mut result = changes.result;
        result.merge(lookups);
        report.sections.push(CheckSection {
            name: check.name(),
            description: check.description(&ctx),
            result,
            hint: check.failure_hint(),
        });
        report.suggestions = suggestions;

        info!(
            "Sanity run complete: {} errors in {} sections",
            report.error_count(),
            report.sections.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LoadError, NamespaceLayout, RegistryEntry, RepositoryType, SigRecord};
    use crate::validate::checks::test_support::community;
    use crate::validate::snapshot::SnapshotError;
    use std::cell::Cell;
    use std::path::Path;

    /// Serves the same registry for both namespaces and counts requests.
    struct StaticSnapshots {
        content: &'static str,
        calls: Cell<usize>,
    }

    impl StaticSnapshots {
        fn new(content: &'static str) -> Self {
            Self {
                content,
                calls: Cell::new(0),
            }
        }
    }

    impl SnapshotProvider for StaticSnapshots {
        fn show(&self, _revision: &str, _path: &Path) -> Result<Vec<u8>, SnapshotError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.content.as_bytes().to_vec())
        }
    }

    struct NoRevision;

    impl SnapshotProvider for NoRevision {
        fn show(&self, revision: &str, path: &Path) -> Result<Vec<u8>, SnapshotError> {
            Err(SnapshotError::NotFound {
                revision: revision.to_string(),
                path: path.to_path_buf(),
                message: "unknown revision".to_string(),
            })
        }
    }

    struct Maintainers;

    impl MaintainerDirectory for Maintainers {
        fn maintainers(&self, _sig: &str) -> Result<Vec<String>, LoadError> {
            Ok(vec!["maintainer".to_string()])
        }
    }

    fn healthy() -> Community {
        community(
            vec![SigRecord::new("Base", ["openeuler/infra"])],
            vec![
                RegistryEntry::new("infra", RepositoryType::Public)
                    .with_description("community infrastructure")
                    .with_protected_branches(["master"]),
            ],
            vec![],
        )
    }

    fn check(community: Community, snapshots: &dyn SnapshotProvider) -> SanityReport {
        SanityRunner::default().check(community, &RegistryPaths::default(), snapshots, &Maintainers)
    }

    #[test]
    fn clean_run_reports_every_section() {
        let report = check(healthy(), &StaticSnapshots::new("repositories: []\n"));
        assert!(report.fatal.is_none());
        let names: Vec<_> = report.sections.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "version",
                "single-owner",
                "duplicate-claim",
                "private-management",
                "cross-reference-public",
                "cross-reference-source",
                "coverage",
                "naming",
                "branches",
                "changes",
            ]
        );
        assert_eq!(report.error_count(), 0);
        assert!(report.is_clean());
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].sig, "Base");
    }

    #[test]
    fn errors_accumulate_across_sections() {
        let mut community = healthy();
        community
            .public
            .repositories
            .push(RegistryEntry::new("x", RepositoryType::Public));
        let report = check(community, &StaticSnapshots::new("repositories: []\n"));
        // not owned, name too short, no protected branches, short description
        assert_eq!(report.error_count(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn version_failure_stops_before_any_section() {
        let mut community = healthy();
        community.public.community = Some("other".to_string());
        let snapshots = StaticSnapshots::new("repositories: []\n");
        let report = check(community, &snapshots);
        assert!(report.sections.is_empty());
        assert!(matches!(report.fatal, Some(FatalError::WrongCommunity { .. })));
        assert_eq!(snapshots.calls.get(), 0);
    }

    #[test]
    fn snapshot_failure_keeps_finished_sections() {
        let report = check(healthy(), &NoRevision);
        assert!(matches!(report.fatal, Some(FatalError::Snapshot(_))));
        assert_eq!(report.sections.len(), 9);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn skip_changes_never_touches_snapshots() {
        let snapshots = StaticSnapshots::new("repositories: []\n");
        let runner = SanityRunner::new(RunOptions {
            skip_changes: true,
            ..Default::default()
        });
        let report = runner.check(healthy(), &RegistryPaths::default(), &snapshots, &Maintainers);
        assert!(report.fatal.is_none());
        assert_eq!(report.sections.len(), 9);
        assert_eq!(snapshots.calls.get(), 0);
    }

    #[test]
    fn missing_files_are_fatal() {
        let loader = CommunityLoader::new(
            "/nonexistent/community",
            RegistryPaths::default(),
            NamespaceLayout::default(),
        );
        let report = SanityRunner::default().run(&loader, &NoRevision, &Maintainers);
        assert!(matches!(
            report.fatal,
            Some(FatalError::Load(LoadError::NotFound { .. }))
        ));
    }
}

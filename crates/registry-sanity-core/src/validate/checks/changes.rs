//! Change-set validation against the previously merged revision.
//!
//! Entries are matched by name within a namespace. An entry present in both
//! snapshots counts as unchanged, except when it went from `public` to
//! `private`: that transition keeps it in the changed set so its metadata is
//! checked again. The reverse transition is treated as unchanged.

use super::{Check, CheckContext};
use crate::model::{Namespace, RegistryEntry};
use crate::validate::snapshot::PreviousRegistries;
use crate::validate::{ValidationIssue, ValidationResult};
use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Minimum description length, in characters, of an added repository.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Findings of the change-set check plus the groups whose review is suggested.
#[derive(Debug, Clone, Default)]
pub struct ChangeSetReport {
    /// Counted and advisory findings.
    pub result: ValidationResult,
    /// Groups owning an added, changed or deleted repository.
    pub attention: BTreeSet<String>,
}

/// A check of added, changed and deleted registry entries.
#[derive(Debug, Clone)]
pub struct ChangeSetCheck {
    previous: PreviousRegistries,
}

impl ChangeSetCheck {
    /// Creates the check against the previous registries.
    pub fn new(previous: PreviousRegistries) -> Self {
        Self { previous }
    }

    /// Runs the diff over both namespaces.
    pub fn evaluate(&self, ctx: &CheckContext) -> ChangeSetReport {
        let mut report = ChangeSetReport::default();
        for namespace in Namespace::ALL {
            self.evaluate_namespace(ctx, namespace, &mut report);
        }
        report
    }

    fn evaluate_namespace(
        &self,
        ctx: &CheckContext,
        namespace: Namespace,
        report: &mut ChangeSetReport,
    ) {
        let current = &ctx.community.registry(namespace).repositories;
        let previous = &self.previous.registry(namespace).repositories;

        let mut working: HashMap<&str, &RegistryEntry> = current
            .iter()
            .map(|entry| (entry.name.as_str(), entry))
            .collect();

        let mut seen = HashSet::new();
        let mut removals: Vec<&str> = Vec::new();
        for before in previous {
            if !seen.insert(before.name.as_str()) {
                continue;
            }
            match working.get(before.name.as_str()).copied() {
                Some(now) if before.is_public() && now.is_private() => {}
                Some(_) => {
                    working.remove(before.name.as_str());
                }
                None => removals.push(&before.name),
            }
        }

        debug!(
            "{}: {} changed, {} removal candidates",
            ctx.layout().name(namespace),
            working.len(),
            removals.len()
        );

        for entry in current {
            let Some(entry) = working.remove(entry.name.as_str()) else {
                continue;
            };
            let repository = ctx.layout().qualify(namespace, &entry.name);
            let owners: Vec<String> = ctx
                .ownership
                .owners(&repository)
                .map(|owners| owners.iter().cloned().collect())
                .unwrap_or_default();
            report.attention.extend(owners.iter().cloned());
            report.result.add(ValidationIssue::RepositoryChanged {
                repository: repository.clone(),
                sigs: owners,
            });

            if namespace == Namespace::SourcePackage && entry.upstream().is_empty() {
                report.result.add(ValidationIssue::MissingUpstream {
                    repository: repository.clone(),
                });
            }
            if entry.description().chars().count() < MIN_DESCRIPTION_LEN {
                report.result.add(ValidationIssue::DescriptionTooShort {
                    repository: repository.clone(),
                });
            }
            if let Some(reason) = ctx.community.blacklist.reason(&entry.name) {
                report.result.add(ValidationIssue::Blacklisted {
                    repository,
                    reason: reason.to_string(),
                });
            }

            if let Some(previous_name) = &entry.rename_from {
                removals.retain(|name| name != previous_name);
            }
        }

        for name in removals {
            let repository = ctx.layout().qualify(namespace, name);
            if let Some(owners) = ctx.ownership.owners(&repository) {
                report.attention.extend(owners.iter().cloned());
            }
            report
                .result
                .add(ValidationIssue::RepositoryDeleted { repository });
        }
    }
}

impl Check for ChangeSetCheck {
    fn name(&self) -> &'static str {
        "changes"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        "Newly added or changed repositories must carry the required information".to_string()
    }

    fn failure_hint(&self) -> Option<&'static str> {
        Some("Some newly changed repositories don't follow the community requirements")
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        self.evaluate(ctx).result
    }
}

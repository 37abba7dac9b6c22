//! Ownership resolution: which groups own which repository.
//!
//! The hosting platform rejects creating a repository whose name differs from
//! an existing one only by case, but resolves direct access by exact name.
//! Two maps are therefore kept side by side, each under its own normalization
//! policy:
//!
//! - the *case-insensitive* map, keyed by [`repository_key`], backs the
//!   single-owner rule across namespaces;
//! - the *case-sensitive* map, keyed by [`normalize_case_sensitive`], backs
//!   the `Private` co-management analysis, registry cross-referencing and
//!   change-set owner lookup.

use crate::model::{NamespaceLayout, PRIVATE_SIG, SigRegistry};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Repository identifier to the set of owning group names.
pub type OwnershipMap = BTreeMap<String, BTreeSet<String>>;

/// Case-insensitive policy: lower-cases the full identifier.
///
/// Serves the duplicate-registration rule, since repository creation on the
/// hosting platform is case-insensitive.
pub fn normalize_case_insensitive(identifier: &str) -> String {
    identifier.to_lowercase()
}

/// Case-sensitive policy: the identifier as written.
///
/// Serves every lookup that mirrors direct access on the hosting platform:
/// `Private` co-management, cross-referencing and change-set owners.
pub fn normalize_case_sensitive(identifier: &str) -> &str {
    identifier
}

/// Key of the single-owner rule: namespace prefix stripped, then
/// [`normalize_case_insensitive`].
///
/// A repository and its counterpart in the other namespace share a key, so
/// they must be owned by the same single group.
pub fn repository_key(layout: &NamespaceLayout, identifier: &str) -> String {
    normalize_case_insensitive(layout.strip(identifier))
}

/// A group listing the same repository more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateClaim {
    /// Claiming group.
    pub sig: String,
    /// Case-insensitively normalized identifier.
    pub repository: String,
}

/// Aggregate counts of the case-sensitive pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PrivateSummary {
    /// Distinct repositories across all groups.
    pub total: usize,
    /// Repositories owned by `Private` and at least one other group.
    pub co_managed: usize,
    /// Repositories owned by `Private` alone.
    pub private_only: usize,
}

/// Both ownership maps plus the duplicate claims found while building them.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    case_insensitive: OwnershipMap,
    case_sensitive: OwnershipMap,
    duplicate_claims: Vec<DuplicateClaim>,
}

impl OwnershipIndex {
    /// Resolves ownership from the group-membership registry.
    pub fn build(sigs: &SigRegistry, layout: &NamespaceLayout) -> Self {
        let mut case_insensitive = OwnershipMap::new();
        let mut duplicate_claims = Vec::new();

        for sig in sigs.public_sigs() {
            let mut claimed = HashSet::new();
            for identifier in &sig.repositories {
                let normalized = normalize_case_insensitive(identifier);
                if !claimed.insert(normalized.clone()) {
                    duplicate_claims.push(DuplicateClaim {
                        sig: sig.name.clone(),
                        repository: normalized,
                    });
                }

                case_insensitive
                    .entry(repository_key(layout, identifier))
                    .or_default()
                    .insert(sig.name.clone());
            }
        }

        let mut case_sensitive = OwnershipMap::new();
        for sig in &sigs.sigs {
            for identifier in &sig.repositories {
                case_sensitive
                    .entry(normalize_case_sensitive(identifier).to_string())
                    .or_default()
                    .insert(sig.name.clone());
            }
        }

        debug!(
            "Resolved ownership: {} case-insensitive keys, {} case-sensitive keys, {} duplicate claims",
            case_insensitive.len(),
            case_sensitive.len(),
            duplicate_claims.len()
        );

        Self {
            case_insensitive,
            case_sensitive,
            duplicate_claims,
        }
    }

    /// The map used by the single-owner rule; `Private` is excluded.
    pub fn case_insensitive(&self) -> &OwnershipMap {
        &self.case_insensitive
    }

    /// The map of exact identifiers; includes `Private`.
    pub fn case_sensitive(&self) -> &OwnershipMap {
        &self.case_sensitive
    }

    /// Groups that list the same identifier more than once.
    pub fn duplicate_claims(&self) -> &[DuplicateClaim] {
        &self.duplicate_claims
    }

    /// Owners of an exact, namespace-qualified identifier.
    pub fn owners(&self, identifier: &str) -> Option<&BTreeSet<String>> {
        self.case_sensitive
            .get(normalize_case_sensitive(identifier))
            .filter(|owners| !owners.is_empty())
    }

    /// Returns true if `Private` is among the owners of the identifier.
    pub fn is_private_owned(&self, identifier: &str) -> bool {
        self.owners(identifier)
            .is_some_and(|owners| owners.contains(PRIVATE_SIG))
    }

    /// Classifies every repository of the case-sensitive map.
    pub fn private_summary(&self) -> PrivateSummary {
        let mut summary = PrivateSummary {
            total: self.case_sensitive.len(),
            ..Default::default()
        };
        for owners in self.case_sensitive.values() {
            if owners.contains(PRIVATE_SIG) {
                if owners.len() == 1 {
                    summary.private_only += 1;
                } else {
                    summary.co_managed += 1;
                }
            }
        }
        summary
    }
}

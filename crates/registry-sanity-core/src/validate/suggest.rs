//! Reviewer suggestions for the groups touched by a change set.

use crate::model::{LoadError, PRIVATE_SIG};
use crate::validate::{ValidationIssue, ValidationResult};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// Looks up the maintainers of a group.
pub trait MaintainerDirectory {
    /// Returns the maintainer account names of `sig`.
    fn maintainers(&self, sig: &str) -> Result<Vec<String>, LoadError>;
}

/// Maintainers whose review is suggested for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSuggestion {
    /// Group name.
    pub sig: String,
    /// Maintainer account names.
    pub maintainers: Vec<String>,
}

impl ReviewSuggestion {
    /// Maintainers as `@` mentions separated by spaces.
    pub fn mentions(&self) -> String {
        self.maintainers
            .iter()
            .map(|maintainer| format!("@{maintainer}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolves the maintainers of every group in `attention`, except `Private`.
///
/// A failed lookup becomes a warning and the group is left out of the
/// suggestions. Nothing returned here is an error.
pub fn suggest_reviewers(
    attention: &BTreeSet<String>,
    directory: &dyn MaintainerDirectory,
) -> (Vec<ReviewSuggestion>, ValidationResult) {
    let mut suggestions = Vec::new();
    let mut result = ValidationResult::new();

    for sig in attention.iter().filter(|sig| *sig != PRIVATE_SIG) {
        match directory.maintainers(sig) {
            Ok(maintainers) => suggestions.push(ReviewSuggestion {
                sig: sig.clone(),
                maintainers,
            }),
            Err(error) => {
                debug!("No maintainers for {}: {}", sig, error);
                result.add(ValidationIssue::MaintainersUnavailable {
                    sig: sig.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    (suggestions, result)
}

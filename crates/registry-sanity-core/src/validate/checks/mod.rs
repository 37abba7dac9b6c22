//! Check trait and shared context for registry validation.
//!
//! Every check is a pure function from the [`CheckContext`] to a
//! [`ValidationResult`]. The two checks that thread state between
//! invocations, cross-referencing and coverage, exchange it explicitly
//! through [`CrossChecked`].

mod branches;
mod changes;
mod coverage;
mod cross_reference;
mod naming;
mod owners;
mod private;
mod version;

pub use branches::{BranchPolicyCheck, BranchRules};
pub use changes::{ChangeSetCheck, ChangeSetReport, MIN_DESCRIPTION_LEN};
pub use coverage::CoverageCheck;
pub use cross_reference::{CrossChecked, CrossReferenceCheck};
pub use naming::{NAMING_HELP, NamingCheck};
pub use owners::{DuplicateClaimCheck, SingleOwnerCheck};
pub use private::PrivateManagementCheck;
pub use version::VersionGate;

use crate::model::{Community, FormatVersion, NamespaceLayout};
use crate::ownership::OwnershipIndex;
use crate::validate::ValidationResult;

/// Immutable state shared by every check of a run.
///
/// Built once from the current snapshot after the version gate passed.
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Current snapshot.
    pub community: Community,
    /// Ownership maps resolved from the group registry.
    pub ownership: OwnershipIndex,
    /// Schema version validated by the version gate.
    pub version: FormatVersion,
}

impl CheckContext {
    /// Creates the context, resolving ownership from the group registry.
    pub fn new(community: Community, version: FormatVersion) -> Self {
        let ownership = OwnershipIndex::build(&community.sigs, &community.layout);
        Self {
            community,
            ownership,
            version,
        }
    }

    /// Names of the namespaces.
    pub fn layout(&self) -> &NamespaceLayout {
        &self.community.layout
    }
}

/// A synchronous validation check.
pub trait Check {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Returns the one-line statement of the rule being checked.
    fn description(&self, ctx: &CheckContext) -> String;

    /// Returns the hint printed once when the check finds errors.
    fn failure_hint(&self) -> Option<&'static str> {
        None
    }

    /// Runs the check and returns validation results.
    fn run(&self, ctx: &CheckContext) -> ValidationResult;
}

//! `Private` co-management summary.

use super::{Check, CheckContext};
use crate::validate::{ValidationIssue, ValidationResult};

/// Reports how many repositories are co-managed with, or managed only by,
/// the `Private` group. Informational only.
#[derive(Debug, Clone, Default)]
pub struct PrivateManagementCheck;

impl PrivateManagementCheck {
    /// Creates a new summary check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for PrivateManagementCheck {
    fn name(&self) -> &'static str {
        "private-management"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        "Repository managed by both SIG and Private.".to_string()
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        ValidationResult::with_issues(vec![ValidationIssue::PrivateManagement {
            summary: ctx.ownership.private_summary(),
        }])
    }
}

//! Repository name syntax, as enforced by the hosting platform.

use super::{Check, CheckContext};
use crate::validate::{ValidationIssue, ValidationResult};

/// Help text printed once when any name is rejected.
pub const NAMING_HELP: &str = "Repo name allows only letters, numbers, or an underscore (_), \
dash (-), and period (.). It must start with a letter, and its length is 2 to 200 characters.";

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 200;

/// A check that every registered name is 2 to 200 characters of letters,
/// digits, `-`, `_` and `.`, starting with a letter.
///
/// At most one violation is reported per name, in the order length,
/// characters, first letter.
#[derive(Debug, Clone, Default)]
pub struct NamingCheck;

impl NamingCheck {
    /// Creates a new naming check.
    pub fn new() -> Self {
        Self
    }

    /// Validates a single repository name.
    pub fn check_name(name: &str) -> Option<ValidationIssue> {
        let name = name.to_lowercase();
        let len = name.chars().count();

        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Some(ValidationIssue::NameLength { name });
        }

        let mut significant = name.chars().filter(|c| !matches!(c, '-' | '_' | '.')).peekable();
        let valid_chars = significant.peek().is_some() && significant.all(char::is_alphanumeric);
        if !valid_chars {
            return Some(ValidationIssue::NameInvalidCharacter { name });
        }

        if !name.chars().next().is_some_and(char::is_alphabetic) {
            return Some(ValidationIssue::NameMustStartWithLetter { name });
        }

        None
    }
}

impl Check for NamingCheck {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self, _ctx: &CheckContext) -> String {
        "All repositories' name must follow the hosting platform requirements".to_string()
    }

    fn failure_hint(&self) -> Option<&'static str> {
        Some(NAMING_HELP)
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        ValidationResult::with_issues(
            ctx.community
                .entries()
                .filter_map(|(_, entry)| Self::check_name(&entry.name))
                .collect(),
        )
    }
}

//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for sanity
//! reports.

use colored::Colorize;
use registry_sanity_core::validate::{
    CheckSection, ReviewSuggestion, SanityReport, Severity, ValidationIssue,
};
use serde::Serialize;
use std::io::Write;

const PASS: &str = "PASS WITHOUT ISSUES FOUND.";

/// JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Completed sections, in execution order.
    pub sections: Vec<JsonSection<'a>>,
    /// Suggested reviewers.
    pub suggestions: &'a [ReviewSuggestion],
    /// Total number of errors.
    pub error_count: usize,
    /// Message of the fatal error that stopped the run.
    pub fatal: Option<String>,
}

impl<'a> JsonOutput<'a> {
    /// Builds the JSON view of a report.
    pub fn new(report: &'a SanityReport) -> Self {
        Self {
            sections: report.sections.iter().map(JsonSection::from).collect(),
            suggestions: &report.suggestions,
            error_count: report.error_count(),
            fatal: report.fatal.as_ref().map(ToString::to_string),
        }
    }

    /// Writes the JSON output to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// A single section in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonSection<'a> {
    /// Check name.
    pub name: &'a str,
    /// Statement of the rule.
    pub description: &'a str,
    /// Whether the section has no errors.
    pub passed: bool,
    /// Findings of the section.
    pub issues: Vec<JsonIssue<'a>>,
}

impl<'a> From<&'a CheckSection> for JsonSection<'a> {
    fn from(section: &'a CheckSection) -> Self {
        Self {
            name: section.name,
            description: &section.description,
            passed: section.passed(),
            issues: section.result.issues.iter().map(JsonIssue::from).collect(),
        }
    }
}

/// A single issue in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonIssue<'a> {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Structured fields of the issue.
    pub detail: &'a ValidationIssue,
}

impl<'a> From<&'a ValidationIssue> for JsonIssue<'a> {
    fn from(issue: &'a ValidationIssue) -> Self {
        Self {
            severity: issue.severity(),
            message: issue.to_string(),
            detail: issue,
        }
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes every section, the suggestions and the fatal error if any.
    pub fn write_report(&mut self, report: &SanityReport) -> std::io::Result<()> {
        for (index, section) in report.sections.iter().enumerate() {
            self.write_section(index + 1, section)?;
        }
        self.write_suggestions(&report.suggestions)?;
        if let Some(fatal) = &report.fatal {
            self.write_fatal(&fatal.to_string())?;
        }
        Ok(())
    }

    /// Writes a numbered section: header, issues, then the verdict.
    pub fn write_section(&mut self, number: usize, section: &CheckSection) -> std::io::Result<()> {
        let header = format!("Check {}:", number);
        if self.use_colors {
            writeln!(self.writer, "{} {}", header.bold(), section.description)?;
        } else {
            writeln!(self.writer, "{} {}", header, section.description)?;
        }

        for issue in &section.result.issues {
            self.write_issue(issue)?;
        }

        if section.passed() {
            if self.use_colors {
                writeln!(self.writer, "{}", PASS.green().bold())?;
            } else {
                writeln!(self.writer, "{}", PASS)?;
            }
        } else if let Some(hint) = section.hint {
            writeln!(self.writer, "{}", hint)?;
        }
        writeln!(self.writer)
    }

    /// Writes a single issue.
    pub fn write_issue(&mut self, issue: &ValidationIssue) -> std::io::Result<()> {
        let label = match issue.severity() {
            Severity::Error => "ERROR!",
            Severity::Warning => "WARNING!",
            Severity::Info => "INFO:",
        };

        if self.use_colors {
            let colored_label = match issue.severity() {
                Severity::Error => label.red().bold(),
                Severity::Warning => label.yellow().bold(),
                Severity::Info => label.cyan(),
            };
            writeln!(self.writer, "{} {}", colored_label, issue)
        } else {
            writeln!(self.writer, "{} {}", label, issue)
        }
    }

    /// Writes the suggested reviewers, one line per group.
    pub fn write_suggestions(&mut self, suggestions: &[ReviewSuggestion]) -> std::io::Result<()> {
        if suggestions.is_empty() {
            return Ok(());
        }

        let header = "SUGGESTION:";
        if self.use_colors {
            writeln!(self.writer, "{}", header.blue().bold())?;
        } else {
            writeln!(self.writer, "{}", header)?;
        }
        for suggestion in suggestions {
            writeln!(self.writer, "{}: {}", suggestion.sig, suggestion.mentions())?;
        }
        Ok(())
    }

    /// Writes the condition that stopped the run.
    pub fn write_fatal(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "ERROR!".red().bold(), message)
        } else {
            writeln!(self.writer, "ERROR! {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_sanity_core::validate::{FatalError, ValidationResult};

    fn section(issues: Vec<ValidationIssue>, hint: Option<&'static str>) -> CheckSection {
        CheckSection {
            name: "naming",
            description: "All repositories' name must follow the hosting platform requirements"
                .to_string(),
            result: ValidationResult::with_issues(issues),
            hint,
        }
    }

    fn report() -> SanityReport {
        SanityReport {
            sections: vec![
                section(vec![], None),
                section(
                    vec![
                        ValidationIssue::NameLength {
                            name: "x".to_string(),
                        },
                        ValidationIssue::RepositoryDeleted {
                            repository: "openeuler/baz".to_string(),
                        },
                    ],
                    Some("Names must be 2 to 200 characters"),
                ),
            ],
            suggestions: vec![ReviewSuggestion {
                sig: "Base".to_string(),
                maintainers: vec!["alice".to_string(), "bob".to_string()],
            }],
            fatal: None,
        }
    }

    fn render(report: &SanityReport) -> String {
        let mut buffer = Vec::new();
        HumanOutput::new(&mut buffer, false)
            .write_report(report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_human_output() {
        let text = render(&report());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Check 1: All repositories'"));
        assert_eq!(lines[1], PASS);
        assert!(lines[3].starts_with("Check 2:"));
        assert_eq!(lines[4], "ERROR! x too long or too short");
        assert_eq!(lines[5], "WARNING! deleting openeuler/baz");
        assert_eq!(lines[6], "Names must be 2 to 200 characters");
        assert!(text.contains("SUGGESTION:\nBase: @alice @bob\n"));
    }

    #[test]
    fn test_warnings_only_section_passes() {
        let report = SanityReport {
            sections: vec![section(
                vec![ValidationIssue::RepositoryDeleted {
                    repository: "openeuler/baz".to_string(),
                }],
                Some("hint"),
            )],
            ..Default::default()
        };
        let text = render(&report);
        assert!(text.contains(PASS));
        assert!(!text.contains("hint"));
    }

    #[test]
    fn test_fatal_is_printed() {
        let report = SanityReport {
            fatal: Some(FatalError::WrongCommunity {
                registry: "openeuler".to_string(),
                found: None,
            }),
            ..Default::default()
        };
        let text = render(&report);
        assert_eq!(
            text,
            "ERROR! openeuler.yaml has wrong community setting (found nothing)\n"
        );
    }

    #[test]
    fn test_json_output() {
        let report = report();
        let mut buffer = Vec::new();
        JsonOutput::new(&report).write(&mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["error_count"], 1);
        assert!(value["fatal"].is_null());
        assert_eq!(value["sections"][0]["passed"], true);
        assert_eq!(value["sections"][1]["issues"][0]["severity"], "error");
        assert_eq!(value["sections"][1]["issues"][0]["detail"]["kind"], "name_length");
        assert_eq!(value["sections"][1]["issues"][1]["severity"], "warning");
        assert_eq!(value["suggestions"][0]["sig"], "Base");
    }
}

//! Namespace registry records.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A namespace registry file: the community tag, the schema version and the
/// list of repositories hosted in the namespace.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NamespaceRegistry {
    /// Community tag, expected to equal the namespace name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    /// Declared schema version.
    #[serde(default)]
    pub format_version: FormatVersion,
    /// Registered repositories.
    pub repositories: Vec<RegistryEntry>,
}

/// Registry schema version.
///
/// Accepts either a YAML number or a numeric string; defaults to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FormatVersion(f64);

impl FormatVersion {
    /// Lowest supported version.
    pub const MIN_SUPPORTED: FormatVersion = FormatVersion(1.0);
    /// Highest supported version.
    pub const MAX_SUPPORTED: FormatVersion = FormatVersion(2.0);
    /// First version using structured branch declarations.
    pub const STRUCTURED_BRANCHES: FormatVersion = FormatVersion(2.0);

    /// Creates a version from its numeric value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if the version lies in the supported inclusive range.
    pub fn is_supported(self) -> bool {
        self >= Self::MIN_SUPPORTED && self <= Self::MAX_SUPPORTED
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<'de> Deserialize<'de> for FormatVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text.trim().parse().map(Self).map_err(|_| {
                de::Error::custom(format!("format_version '{text}' is not a number"))
            }),
        }
    }
}

/// Visibility of a registered repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// Visible to everyone.
    Public,
    /// Restricted access, expected to be owned by the `Private` group.
    Private,
    /// Any other declared value.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryType::Public => write!(f, "public"),
            RepositoryType::Private => write!(f, "private"),
            RepositoryType::Other(value) => write!(f, "{value}"),
        }
    }
}

/// A single repository in a namespace registry.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RegistryEntry {
    /// Bare repository name, without namespace prefix.
    pub name: String,
    /// Declared visibility.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepositoryType>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Upstream project link; required for source packages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
    /// Flat protected-branch list (schema versions below 2.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_branches: Option<Vec<String>>,
    /// Structured branch declarations (schema version 2.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BranchSpec>>,
    /// Previous name when the repository is being renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_from: Option<String>,
}

impl RegistryEntry {
    /// Creates an entry with a name and visibility.
    pub fn new(name: impl Into<String>, repo_type: RepositoryType) -> Self {
        Self {
            name: name.into(),
            repo_type: Some(repo_type),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the upstream link.
    pub fn with_upstream(mut self, upstream: impl Into<String>) -> Self {
        self.upstream = Some(upstream.into());
        self
    }

    /// Sets the flat protected-branch list.
    pub fn with_protected_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the structured branch declarations.
    pub fn with_branches(mut self, branches: Vec<BranchSpec>) -> Self {
        self.branches = Some(branches);
        self
    }

    /// Marks the entry as renamed from a previous name.
    pub fn with_rename_from(mut self, previous: impl Into<String>) -> Self {
        self.rename_from = Some(previous.into());
        self
    }

    /// Description, empty when absent.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Upstream link, empty when absent.
    pub fn upstream(&self) -> &str {
        self.upstream.as_deref().unwrap_or_default()
    }

    /// Returns true if the entry is declared public.
    pub fn is_public(&self) -> bool {
        self.repo_type == Some(RepositoryType::Public)
    }

    /// Returns true if the entry is declared private.
    pub fn is_private(&self) -> bool {
        self.repo_type == Some(RepositoryType::Private)
    }
}

/// A structured branch declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct BranchSpec {
    /// Branch name.
    pub name: String,
    /// Protection kind, `protected` or `readonly`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Branch the new branch is created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_from: Option<String>,
}

impl BranchSpec {
    /// Creates a branch declaration.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind.into()),
            create_from: None,
        }
    }

    /// Sets the parent branch.
    pub fn with_create_from(mut self, parent: impl Into<String>) -> Self {
        self.create_from = Some(parent.into());
        self
    }

    /// Returns true if the protection kind is one of the accepted values.
    pub fn has_valid_kind(&self) -> bool {
        matches!(self.kind.as_deref(), Some("protected" | "readonly"))
    }

    /// Returns true if a non-empty parent branch is declared.
    pub fn has_parent(&self) -> bool {
        self.create_from.as_deref().is_some_and(|parent| !parent.is_empty())
    }
}

//! Repository namespaces.
//!
//! A community hosts repositories in two namespaces, each described by its
//! own registry file. Group records refer to repositories with a
//! namespace-qualified identifier such as `src-openeuler/zlib`.

use serde::Serialize;
use std::fmt;

/// One of the two repository namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Namespace for publicly hosted project repositories.
    Public,
    /// Namespace for source-package repositories.
    SourcePackage,
}

impl Namespace {
    /// Both namespaces, in validation order.
    pub const ALL: [Namespace; 2] = [Namespace::Public, Namespace::SourcePackage];
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Public => write!(f, "public"),
            Namespace::SourcePackage => write!(f, "source-package"),
        }
    }
}

/// Names of the two namespaces of a community.
///
/// The name doubles as the identifier prefix (`<name>/<repo>`) and as the
/// community tag the namespace registry must declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceLayout {
    public: String,
    source_package: String,
}

impl Default for NamespaceLayout {
    fn default() -> Self {
        Self::new("openeuler", "src-openeuler")
    }
}

impl NamespaceLayout {
    /// Creates a layout from the two namespace names.
    pub fn new(public: impl Into<String>, source_package: impl Into<String>) -> Self {
        Self {
            public: public.into(),
            source_package: source_package.into(),
        }
    }

    /// Returns the name of a namespace.
    pub fn name(&self, namespace: Namespace) -> &str {
        match namespace {
            Namespace::Public => &self.public,
            Namespace::SourcePackage => &self.source_package,
        }
    }

    /// Builds the namespace-qualified identifier of a repository.
    pub fn qualify(&self, namespace: Namespace, repository: &str) -> String {
        format!("{}/{}", self.name(namespace), repository)
    }

    /// Splits a qualified identifier into its namespace and bare name.
    ///
    /// Returns `None` when the identifier carries no recognized prefix.
    pub fn split<'a>(&self, identifier: &'a str) -> Option<(Namespace, &'a str)> {
        Namespace::ALL.into_iter().find_map(|namespace| {
            identifier
                .strip_prefix(self.name(namespace))
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|name| (namespace, name))
        })
    }

    /// Removes a recognized namespace prefix, leaving other identifiers untouched.
    pub fn strip<'a>(&self, identifier: &'a str) -> &'a str {
        self.split(identifier)
            .map_or(identifier, |(_, name)| name)
    }
}

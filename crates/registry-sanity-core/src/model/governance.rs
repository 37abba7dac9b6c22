//! Governance lists: single-owner exceptions, the software blacklist and
//! per-group maintainer lists.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Repository identifiers exempt from the single-owner rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "ExceptionFile", into = "ExceptionFile")]
pub struct ExceptionSet {
    identifiers: BTreeSet<String>,
}

#[derive(Deserialize, Serialize)]
struct ExceptionFile {
    #[serde(default)]
    exceptions: Option<Vec<String>>,
}

impl From<ExceptionFile> for ExceptionSet {
    fn from(file: ExceptionFile) -> Self {
        file.exceptions.unwrap_or_default().into_iter().collect()
    }
}

impl From<ExceptionSet> for ExceptionFile {
    fn from(set: ExceptionSet) -> Self {
        Self {
            exceptions: Some(set.identifiers.into_iter().collect()),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ExceptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            identifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExceptionSet {
    /// Returns true if the identifier is listed verbatim.
    pub fn exempts(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Number of listed identifiers.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns true if nothing is exempted.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Software names that must not be registered, with the reason for each.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "BlacklistFile", into = "BlacklistFile")]
pub struct Blacklist {
    reasons: BTreeMap<String, String>,
}

/// A single blacklisted software name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlacklistEntry {
    /// Software name.
    pub name: String,
    /// Why it may not be registered.
    pub reason: String,
}

#[derive(Deserialize, Serialize)]
struct BlacklistFile {
    #[serde(rename = "blacklist-software", default)]
    entries: Option<Vec<BlacklistEntry>>,
}

impl From<BlacklistFile> for Blacklist {
    fn from(file: BlacklistFile) -> Self {
        file.entries.unwrap_or_default().into_iter().collect()
    }
}

impl From<Blacklist> for BlacklistFile {
    fn from(blacklist: Blacklist) -> Self {
        let entries = blacklist
            .reasons
            .into_iter()
            .map(|(name, reason)| BlacklistEntry { name, reason })
            .collect();
        Self {
            entries: Some(entries),
        }
    }
}

impl FromIterator<BlacklistEntry> for Blacklist {
    fn from_iter<I: IntoIterator<Item = BlacklistEntry>>(iter: I) -> Self {
        Self {
            reasons: iter
                .into_iter()
                .map(|entry| (entry.name, entry.reason))
                .collect(),
        }
    }
}

impl Blacklist {
    /// Returns the reason a name is blacklisted, if it is.
    pub fn reason(&self, name: &str) -> Option<&str> {
        self.reasons.get(name).map(String::as_str)
    }

    /// Number of blacklisted names.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Returns true if the blacklist is empty.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Maintainers of a group, as listed in its `OWNERS` file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MaintainerList {
    /// Maintainer account names.
    #[serde(default)]
    pub maintainers: Vec<String>,
}

//! Group-membership registry.

use serde::{Deserialize, Serialize};

/// Name of the reserved pseudo-group owning restricted-access repositories.
pub const PRIVATE_SIG: &str = "Private";

/// The group-membership registry: every group and the repositories it owns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SigRegistry {
    /// All groups, including the reserved `Private` group.
    pub sigs: Vec<SigRecord>,
}

impl SigRegistry {
    /// Creates a registry from group records.
    pub fn new(sigs: Vec<SigRecord>) -> Self {
        Self { sigs }
    }

    /// Iterates over groups other than `Private`.
    pub fn public_sigs(&self) -> impl Iterator<Item = &SigRecord> {
        self.sigs.iter().filter(|sig| !sig.is_private())
    }
}

/// A group and the repository identifiers it owns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SigRecord {
    /// Group name.
    pub name: String,
    /// Owned repository identifiers, usually namespace-qualified.
    #[serde(default)]
    pub repositories: Vec<String>,
}

impl SigRecord {
    /// Creates a group record.
    pub fn new<I, S>(name: impl Into<String>, repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            repositories: repositories.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true for the reserved `Private` group.
    pub fn is_private(&self) -> bool {
        self.name == PRIVATE_SIG
    }
}

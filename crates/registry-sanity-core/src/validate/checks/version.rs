//! Schema version and community tag gate.
//!
//! Unlike the other checks this one is fatal: the branch-policy rules depend
//! on the version it validates.

use crate::model::{Community, FormatVersion, Namespace, NamespaceLayout};
use crate::validate::FatalError;
use log::debug;

/// Confirms both registries belong to the right community and declare the
/// same supported schema version.
#[derive(Debug, Clone, Default)]
pub struct VersionGate;

impl VersionGate {
    /// Creates a new version gate.
    pub fn new() -> Self {
        Self
    }

    /// Returns the name of this check.
    pub fn name(&self) -> &'static str {
        "version"
    }

    /// Returns the statement of the rule.
    pub fn description(&self, layout: &NamespaceLayout) -> String {
        format!(
            "Validate basic versioning and setting of {} and {}",
            layout.name(Namespace::Public),
            layout.name(Namespace::SourcePackage)
        )
    }

    /// Returns the shared version, or the first violation found.
    pub fn verify(&self, community: &Community) -> Result<FormatVersion, FatalError> {
        let layout = &community.layout;

        for namespace in Namespace::ALL {
            let expected = layout.name(namespace);
            let registry = community.registry(namespace);
            if registry.community.as_deref() != Some(expected) {
                return Err(FatalError::WrongCommunity {
                    registry: expected.to_string(),
                    found: registry.community.clone(),
                });
            }
        }

        let public_version = community.public.format_version;
        let source_version = community.source_package.format_version;
        if public_version != source_version {
            return Err(FatalError::VersionMismatch {
                public: layout.name(Namespace::Public).to_string(),
                public_version,
                source_package: layout.name(Namespace::SourcePackage).to_string(),
                source_version,
            });
        }

        if !public_version.is_supported() {
            return Err(FatalError::UnsupportedVersion {
                version: public_version,
            });
        }

        debug!("Registries declare format version {}", public_version);
        Ok(public_version)
    }
}

//! Typed records of the community registries.
//!
//! Every file is deserialized with `serde_yaml` into the structs of this
//! module, so shape errors surface once, as a [`LoadError`], at the load
//! boundary.
//!
//! # Example
//!
//! ```rust
//! use registry_sanity_core::model::{NamespaceRegistry, parse_yaml};
//! use std::path::Path;
//!
//! let yaml = "community: openeuler\nrepositories:\n  - name: infra\n    type: public\n";
//! let registry: NamespaceRegistry = parse_yaml(yaml, Path::new("openeuler.yaml")).unwrap();
//! assert_eq!(registry.repositories[0].name, "infra");
//! ```

mod error;
mod governance;
mod load;
mod namespace;
mod registry;
mod sigs;

pub use error::LoadError;
pub use governance::{Blacklist, BlacklistEntry, ExceptionSet, MaintainerList};
pub use load::{CommunityLoader, OwnersFileDirectory, RegistryPaths, load_yaml, parse_yaml};
pub use namespace::{Namespace, NamespaceLayout};
pub use registry::{BranchSpec, FormatVersion, NamespaceRegistry, RegistryEntry, RepositoryType};
pub use sigs::{PRIVATE_SIG, SigRecord, SigRegistry};

/// The current snapshot of a community: every registry the checks read.
#[derive(Debug, Clone)]
pub struct Community {
    /// Names of the two namespaces.
    pub layout: NamespaceLayout,
    /// Group-membership registry.
    pub sigs: SigRegistry,
    /// Single-owner exceptions.
    pub exceptions: ExceptionSet,
    /// Software blacklist.
    pub blacklist: Blacklist,
    /// Public namespace registry.
    pub public: NamespaceRegistry,
    /// Source-package namespace registry.
    pub source_package: NamespaceRegistry,
}

impl Community {
    /// Returns the registry of a namespace.
    pub fn registry(&self, namespace: Namespace) -> &NamespaceRegistry {
        match namespace {
            Namespace::Public => &self.public,
            Namespace::SourcePackage => &self.source_package,
        }
    }

    /// Iterates over the entries of both registries with their namespace.
    pub fn entries(&self) -> impl Iterator<Item = (Namespace, &RegistryEntry)> {
        Namespace::ALL.into_iter().flat_map(move |namespace| {
            self.registry(namespace)
                .repositories
                .iter()
                .map(move |entry| (namespace, entry))
        })
    }
}

//! Access to registry files as of a previous revision.
//!
//! The provider itself is external (the CLI shells out to `git`); this module
//! defines the trait and materializes the fetched content into temporary files
//! that are removed when dropped, whichever way the run ends.

use crate::model::{LoadError, Namespace, NamespaceRegistry, RegistryPaths, load_yaml};
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur when retrieving a previous snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The revision or the path does not exist.
    #[error("{} does not exist at revision {revision}: {message}", path.display())]
    NotFound {
        /// Requested revision.
        revision: String,
        /// Requested path.
        path: PathBuf,
        /// Provider diagnostic.
        message: String,
    },

    /// The provider could not be run.
    #[error("snapshot provider failed: {0}")]
    Provider(String),

    /// The temporary copy could not be written.
    #[error("cannot materialize snapshot of {}: {source}", path.display())]
    Materialize {
        /// Path being materialized.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The materialized copy could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Returns file content as of a revision of the hosting version-control system.
///
/// # Example
///
/// ```rust
/// use registry_sanity_core::validate::snapshot::{SnapshotError, SnapshotProvider};
/// use std::path::Path;
///
/// struct Fixed(&'static str);
///
/// impl SnapshotProvider for Fixed {
///     fn show(&self, _revision: &str, _path: &Path) -> Result<Vec<u8>, SnapshotError> {
///         Ok(self.0.as_bytes().to_vec())
///     }
/// }
///
/// let provider = Fixed("repositories: []\n");
/// assert!(provider.show("HEAD", Path::new("repository/openeuler.yaml")).is_ok());
/// ```
pub trait SnapshotProvider {
    /// Returns the content of `path` (relative to the community directory)
    /// at `revision`.
    fn show(&self, revision: &str, path: &Path) -> Result<Vec<u8>, SnapshotError>;
}

/// A snapshot copied into a temporary file.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct MaterializedSnapshot {
    file: NamedTempFile,
}

impl MaterializedSnapshot {
    /// Fetches `path` at `revision` and writes it to a temporary file.
    pub fn fetch(
        provider: &dyn SnapshotProvider,
        revision: &str,
        path: &Path,
    ) -> Result<Self, SnapshotError> {
        let content = provider.show(revision, path)?;
        let materialize = |source| SnapshotError::Materialize {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tempfile::Builder::new()
            .prefix("registry-snapshot-")
            .suffix(".yaml")
            .tempfile()
            .map_err(materialize)?;
        file.write_all(&content).map_err(materialize)?;
        file.flush().map_err(materialize)?;

        debug!(
            "Materialized {}@{} into {}",
            path.display(),
            revision,
            file.path().display()
        );
        Ok(Self { file })
    }

    /// Location of the temporary copy.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the temporary copy as a namespace registry.
    pub fn load_registry(&self) -> Result<NamespaceRegistry, LoadError> {
        load_yaml(self.path())
    }
}

/// Both namespace registries as of the previous revision.
#[derive(Debug, Clone)]
pub struct PreviousRegistries {
    /// Previous public namespace registry.
    pub public: NamespaceRegistry,
    /// Previous source-package namespace registry.
    pub source_package: NamespaceRegistry,
}

impl PreviousRegistries {
    /// Fetches and loads both registries at `revision`.
    ///
    /// Temporary copies are removed before returning, on success and on error.
    pub fn fetch(
        provider: &dyn SnapshotProvider,
        revision: &str,
        paths: &RegistryPaths,
    ) -> Result<Self, SnapshotError> {
        let public = MaterializedSnapshot::fetch(
            provider,
            revision,
            paths.registry(Namespace::Public),
        )?;
        let source_package = MaterializedSnapshot::fetch(
            provider,
            revision,
            paths.registry(Namespace::SourcePackage),
        )?;

        Ok(Self {
            public: public.load_registry()?,
            source_package: source_package.load_registry()?,
        })
    }

    /// Returns the previous registry of a namespace.
    pub fn registry(&self, namespace: Namespace) -> &NamespaceRegistry {
        match namespace {
            Namespace::Public => &self.public,
            Namespace::SourcePackage => &self.source_package,
        }
    }
}

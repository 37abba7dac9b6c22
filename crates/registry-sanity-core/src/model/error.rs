//! Errors raised while loading registry files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A registry file could not be turned into typed records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("cannot load {}: file not found (could be wrong path)", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The content is not valid YAML or does not match the expected schema.
    #[error("{}: invalid YAML file: {source}", path.display())]
    InvalidYaml {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser error with location.
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Creates the error for a failed read, distinguishing missing files.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns the path of the file that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path } => path,
            LoadError::Io { path, .. } => path,
            LoadError::InvalidYaml { path, .. } => path,
        }
    }
}

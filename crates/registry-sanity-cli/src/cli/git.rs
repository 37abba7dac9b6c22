//! `git`-backed snapshot provider.
//!
//! Reads registry files as of a previous revision with `git show`, run in the
//! community directory.

use registry_sanity_core::validate::{SnapshotError, SnapshotProvider};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Retrieves file content from the `git` history of the community directory.
#[derive(Debug, Clone)]
pub struct GitSnapshotProvider {
    repo_path: PathBuf,
}

impl GitSnapshotProvider {
    /// Creates a provider for the repository containing `repo_path`.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

/// Formats the `<revision>:<path>` object name, with `/` separators whatever
/// the platform.
pub fn object_name(revision: &str, path: &Path) -> String {
    let path = path
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}:{}", revision, path)
}

impl SnapshotProvider for GitSnapshotProvider {
    fn show(&self, revision: &str, path: &Path) -> Result<Vec<u8>, SnapshotError> {
        let object = object_name(revision, path);
        debug!("git show {} in {}", object, self.repo_path.display());

        let output = Command::new("git")
            .current_dir(&self.repo_path)
            .args(["show", &object])
            .output()
            .map_err(|err| SnapshotError::Provider(format!("cannot run git: {}", err)))?;

        if !output.status.success() {
            return Err(SnapshotError::NotFound {
                revision: revision.to_string(),
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

//! Loading registry files from a community directory.

use super::error::LoadError;
use super::governance::{Blacklist, ExceptionSet, MaintainerList};
use super::namespace::{Namespace, NamespaceLayout};
use super::registry::NamespaceRegistry;
use super::sigs::SigRegistry;
use super::Community;
use crate::validate::suggest::MaintainerDirectory;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Locations of the registry files, relative to the community directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPaths {
    /// Group-membership registry.
    pub sigs: PathBuf,
    /// Single-owner exception list.
    pub exceptions: PathBuf,
    /// Software blacklist.
    pub blacklist: PathBuf,
    /// Registry of the public namespace.
    pub public_registry: PathBuf,
    /// Registry of the source-package namespace.
    pub source_registry: PathBuf,
    /// Directory holding one `<group>/OWNERS` file per group.
    pub sig_dir: PathBuf,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        Self {
            sigs: PathBuf::from("sig/sigs.yaml"),
            exceptions: PathBuf::from("zh/technical-committee/governance/exceptions.yaml"),
            blacklist: PathBuf::from("zh/technical-committee/governance/blacklist-software.yaml"),
            public_registry: PathBuf::from("repository/openeuler.yaml"),
            source_registry: PathBuf::from("repository/src-openeuler.yaml"),
            sig_dir: PathBuf::from("sig"),
        }
    }
}

impl RegistryPaths {
    /// Derives registry file names from the namespace names, keeping the
    /// remaining defaults.
    pub fn for_layout(layout: &NamespaceLayout) -> Self {
        Self {
            public_registry: Path::new("repository")
                .join(format!("{}.yaml", layout.name(Namespace::Public))),
            source_registry: Path::new("repository")
                .join(format!("{}.yaml", layout.name(Namespace::SourcePackage))),
            ..Self::default()
        }
    }

    /// Returns the registry path of a namespace.
    pub fn registry(&self, namespace: Namespace) -> &Path {
        match namespace {
            Namespace::Public => &self.public_registry,
            Namespace::SourcePackage => &self.source_registry,
        }
    }

    /// Returns the `OWNERS` path of a group.
    pub fn owners(&self, sig: &str) -> PathBuf {
        self.sig_dir.join(sig).join("OWNERS")
    }
}

/// Parses YAML content into a typed record; `path` is used for error reporting.
pub fn parse_yaml<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, LoadError> {
    serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a YAML file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    trace!("Loading {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    parse_yaml(&content, path)
}

/// Loads the current snapshot of a community directory.
#[derive(Debug, Clone)]
pub struct CommunityLoader {
    root: PathBuf,
    paths: RegistryPaths,
    layout: NamespaceLayout,
}

impl CommunityLoader {
    /// Creates a loader for a community directory.
    pub fn new(root: impl Into<PathBuf>, paths: RegistryPaths, layout: NamespaceLayout) -> Self {
        Self {
            root: root.into(),
            paths,
            layout,
        }
    }

    /// Returns the community directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configured file locations.
    pub fn paths(&self) -> &RegistryPaths {
        &self.paths
    }

    fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Loads the registry of one namespace.
    pub fn load_registry(&self, namespace: Namespace) -> Result<NamespaceRegistry, LoadError> {
        load_yaml(&self.resolve(self.paths.registry(namespace)))
    }

    /// Loads every file of the current snapshot.
    pub fn load(&self) -> Result<Community, LoadError> {
        debug!("Loading community from {}", self.root.display());

        let sigs: SigRegistry = load_yaml(&self.resolve(&self.paths.sigs))?;
        let exceptions: ExceptionSet = load_yaml(&self.resolve(&self.paths.exceptions))?;
        let blacklist: Blacklist = load_yaml(&self.resolve(&self.paths.blacklist))?;
        let public = self.load_registry(Namespace::Public)?;
        let source_package = self.load_registry(Namespace::SourcePackage)?;

        debug!(
            "Loaded {} SIGs, {} exceptions, {} blacklisted names, {} + {} repositories",
            sigs.sigs.len(),
            exceptions.len(),
            blacklist.len(),
            public.repositories.len(),
            source_package.repositories.len()
        );

        Ok(Community {
            layout: self.layout.clone(),
            sigs,
            exceptions,
            blacklist,
            public,
            source_package,
        })
    }
}

/// Reads maintainer lists from `<sig_dir>/<group>/OWNERS`.
#[derive(Debug, Clone)]
pub struct OwnersFileDirectory {
    root: PathBuf,
    paths: RegistryPaths,
}

impl OwnersFileDirectory {
    /// Creates a directory rooted at the community directory.
    pub fn new(root: impl Into<PathBuf>, paths: RegistryPaths) -> Self {
        Self {
            root: root.into(),
            paths,
        }
    }
}

impl MaintainerDirectory for OwnersFileDirectory {
    fn maintainers(&self, sig: &str) -> Result<Vec<String>, LoadError> {
        let list: MaintainerList = load_yaml(&self.root.join(self.paths.owners(sig)))?;
        Ok(list.maintainers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup_community() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "sig/sigs.yaml",
            "sigs:\n  - name: Base\n    repositories:\n      - openeuler/infra\n      - src-openeuler/zlib\n",
        );
        write(
            root,
            "zh/technical-committee/governance/exceptions.yaml",
            "exceptions:\n  - kernel\n",
        );
        write(
            root,
            "zh/technical-committee/governance/blacklist-software.yaml",
            "blacklist-software:\n  - name: bad\n    reason: unmaintained\n",
        );
        write(
            root,
            "repository/openeuler.yaml",
            "community: openeuler\nrepositories:\n  - name: infra\n    type: public\n",
        );
        write(
            root,
            "repository/src-openeuler.yaml",
            "community: src-openeuler\nrepositories:\n  - name: zlib\n    type: public\n",
        );
        write(root, "sig/Base/OWNERS", "maintainers:\n  - alice\n");
        dir
    }

    #[test]
    fn load_full_community() {
        let dir = setup_community();
        let loader = CommunityLoader::new(
            dir.path(),
            RegistryPaths::default(),
            NamespaceLayout::default(),
        );
        let community = loader.load().unwrap();

        assert_eq!(community.sigs.sigs.len(), 1);
        assert!(community.exceptions.exempts("kernel"));
        assert_eq!(community.blacklist.reason("bad"), Some("unmaintained"));
        assert_eq!(community.registry(Namespace::Public).repositories.len(), 1);
        assert_eq!(
            community.registry(Namespace::SourcePackage).repositories[0].name,
            "zlib"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = setup_community();
        fs::remove_file(dir.path().join("sig/sigs.yaml")).unwrap();
        let loader = CommunityLoader::new(
            dir.path(),
            RegistryPaths::default(),
            NamespaceLayout::default(),
        );
        let error = loader.load().unwrap_err();
        assert!(matches!(error, LoadError::NotFound { .. }));
        assert!(error.path().ends_with("sig/sigs.yaml"));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let dir = setup_community();
        write(dir.path(), "repository/openeuler.yaml", "repositories: [\n");
        let loader = CommunityLoader::new(
            dir.path(),
            RegistryPaths::default(),
            NamespaceLayout::default(),
        );
        assert!(matches!(
            loader.load().unwrap_err(),
            LoadError::InvalidYaml { .. }
        ));
    }

    #[test]
    fn registry_without_repositories_is_rejected() {
        let dir = setup_community();
        write(dir.path(), "repository/openeuler.yaml", "community: openeuler\n");
        let loader = CommunityLoader::new(
            dir.path(),
            RegistryPaths::default(),
            NamespaceLayout::default(),
        );
        let error = loader.load_registry(Namespace::Public).unwrap_err();
        assert!(error.to_string().contains("repositories"));
    }

    #[test]
    fn paths_follow_layout() {
        let layout = NamespaceLayout::new("public-hosted", "source-package-hosted");
        let paths = RegistryPaths::for_layout(&layout);
        assert_eq!(
            paths.registry(Namespace::SourcePackage),
            Path::new("repository/source-package-hosted.yaml")
        );
        assert_eq!(paths.owners("Base"), PathBuf::from("sig/Base/OWNERS"));
    }

    #[test]
    fn owners_file_directory() {
        let dir = setup_community();
        let directory = OwnersFileDirectory::new(dir.path(), RegistryPaths::default());
        assert_eq!(directory.maintainers("Base").unwrap(), vec!["alice"]);
        assert!(directory.maintainers("Unknown").is_err());
    }
}

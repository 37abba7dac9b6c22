//! Random community generation for benchmarking and testing.
//!
//! Generated communities are internally consistent: every repository is
//! owned by exactly one group and registered in both namespaces, so a run
//! over them reports no errors unless [`GeneratorConfig::with_defects`] asks
//! for some.

use crate::model::{
    Blacklist, BlacklistEntry, BranchSpec, Community, ExceptionSet, FormatVersion,
    MaintainerList, Namespace, NamespaceLayout, NamespaceRegistry, PRIVATE_SIG, RegistryEntry,
    RegistryPaths, RepositoryType, SigRecord, SigRegistry,
};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Configuration for generating communities.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of repositories per namespace.
    pub num_repositories: usize,
    /// Number of groups, `Private` excluded.
    pub num_sigs: usize,
    /// Percentage of repositories also owned by `Private`.
    pub private_percent: u32,
    /// Number of repositories deliberately claimed by a second group.
    pub defects: usize,
    /// Schema version of both registries.
    pub format_version: FormatVersion,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_repositories: 100,
            num_sigs: 10,
            private_percent: 5,
            defects: 0,
            format_version: FormatVersion::MAX_SUPPORTED,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with roughly one group per ten repositories.
    pub fn new(num_repositories: usize) -> Self {
        Self {
            num_repositories,
            num_sigs: (num_repositories / 10).max(1),
            ..Default::default()
        }
    }

    /// Small fixture (~20 repositories).
    pub fn small() -> Self {
        Self::new(20)
    }

    /// Medium fixture (~1k repositories).
    pub fn medium() -> Self {
        Self::new(1_000)
    }

    /// Large fixture (~10k repositories), about the size of a real distribution.
    pub fn large() -> Self {
        Self::new(10_000)
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the schema version of both registries.
    pub fn with_format_version(mut self, version: FormatVersion) -> Self {
        self.format_version = version;
        self
    }

    /// Claim this many repositories by a second group.
    pub fn with_defects(mut self, defects: usize) -> Self {
        self.defects = defects;
        self
    }
}

/// Vocabulary for generating realistic names.
mod vocabulary {
    pub const PREFIXES: &[&str] = &["lib", "python-", "perl-", "rust-", "golang-", "", "", ""];
    pub const STEMS: &[&str] = &[
        "zlib", "xml", "ssl", "yaml", "json", "curl", "gtk", "qt", "kernel", "boot", "docs",
        "infra", "crypto", "audio", "image", "shell",
    ];
    pub const SIG_AREAS: &[&str] = &[
        "Base", "Compiler", "Kernel", "Desktop", "Networking", "Security", "Storage", "Cloud",
        "Runtime", "Doc",
    ];
    pub const USERNAMES: &[&str] = &["alice", "bob", "charlie", "dev", "maintainer", "reviewer"];
}

/// Probability of declaring a release branch besides `master` (percentage).
const RELEASE_BRANCH_PROBABILITY: u32 = 30;

fn sig_name(index: usize) -> String {
    let area = vocabulary::SIG_AREAS[index % vocabulary::SIG_AREAS.len()];
    format!("{}-{}", area, index)
}

fn repository_name(rng: &mut StdRng, index: usize) -> String {
    use vocabulary::*;

    let prefix = PREFIXES[rng.random_range(0..PREFIXES.len())];
    let stem = STEMS[rng.random_range(0..STEMS.len())];
    format!("{}{}{}", prefix, stem, index)
}

fn registry_entry(
    rng: &mut StdRng,
    name: &str,
    namespace: Namespace,
    version: FormatVersion,
) -> RegistryEntry {
    let mut entry = RegistryEntry::new(name, RepositoryType::Public)
        .with_description(format!("{} maintained by the community", name));
    if namespace == Namespace::SourcePackage {
        entry = entry.with_upstream(format!("https://example.org/{}", name));
    }

    if version < FormatVersion::STRUCTURED_BRANCHES {
        return entry.with_protected_branches(["master"]);
    }

    let mut branches = vec![BranchSpec::new("master", "protected")];
    if rng.random_ratio(RELEASE_BRANCH_PROBABILITY, 100) {
        branches.push(BranchSpec::new("openEuler-24.03-LTS", "readonly").with_create_from("master"));
    }
    entry.with_branches(branches)
}

/// Generates a random community based on configuration.
pub fn generate_community(config: &GeneratorConfig) -> Community {
    let layout = NamespaceLayout::default();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let num_sigs = config.num_sigs.max(1);

    let mut sigs: Vec<SigRecord> = (0..num_sigs)
        .map(|index| SigRecord::new(sig_name(index), Vec::<String>::new()))
        .collect();
    let mut private = SigRecord::new(PRIVATE_SIG, Vec::<String>::new());
    let mut public = Vec::with_capacity(config.num_repositories);
    let mut source_package = Vec::with_capacity(config.num_repositories);
    let mut owners = Vec::with_capacity(config.num_repositories);

    for index in 0..config.num_repositories {
        let name = repository_name(&mut rng, index);
        let owner = rng.random_range(0..num_sigs);
        owners.push(owner);
        for namespace in Namespace::ALL {
            sigs[owner]
                .repositories
                .push(layout.qualify(namespace, &name));
        }

        let mut entry = registry_entry(&mut rng, &name, Namespace::Public, config.format_version);
        if rng.random_ratio(config.private_percent.min(100), 100) {
            private
                .repositories
                .push(layout.qualify(Namespace::Public, &name));
            entry.repo_type = Some(RepositoryType::Private);
        }
        public.push(entry);
        source_package.push(registry_entry(
            &mut rng,
            &name,
            Namespace::SourcePackage,
            config.format_version,
        ));
    }

    for (entry, owner) in public.iter().zip(&owners).take(config.defects) {
        let intruder = (owner + 1) % num_sigs;
        let identifier = layout.qualify(Namespace::SourcePackage, &entry.name);
        if !sigs[intruder].repositories.contains(&identifier) {
            sigs[intruder].repositories.push(identifier);
        }
    }

    sigs.push(private);

    let exceptions = public
        .iter()
        .take(2)
        .map(|entry| format!("{}-legacy", entry.name))
        .collect::<ExceptionSet>();
    let blacklist = [BlacklistEntry {
        name: "forbidden-codec".to_string(),
        reason: "patent encumbered".to_string(),
    }]
    .into_iter()
    .collect::<Blacklist>();

    let registry = |namespace: Namespace, repositories| NamespaceRegistry {
        community: Some(layout.name(namespace).to_string()),
        format_version: config.format_version,
        repositories,
    };

    Community {
        public: registry(Namespace::Public, public),
        source_package: registry(Namespace::SourcePackage, source_package),
        layout: layout.clone(),
        sigs: SigRegistry::new(sigs),
        exceptions,
        blacklist,
    }
}

fn write_yaml<T: Serialize>(root: &Path, relative: &Path, value: &T) -> io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_yaml::to_string(value).map_err(io::Error::other)?;
    fs::write(path, content)
}

/// Writes a community as a directory tree, including one `OWNERS` file per
/// group.
pub fn write_community(community: &Community, root: &Path, paths: &RegistryPaths) -> io::Result<()> {
    use vocabulary::USERNAMES;

    write_yaml(root, &paths.sigs, &community.sigs)?;
    write_yaml(root, &paths.exceptions, &community.exceptions)?;
    write_yaml(root, &paths.blacklist, &community.blacklist)?;
    for namespace in Namespace::ALL {
        write_yaml(root, paths.registry(namespace), community.registry(namespace))?;
    }

    for (index, sig) in community.sigs.public_sigs().enumerate() {
        let maintainers = MaintainerList {
            maintainers: vec![
                USERNAMES[index % USERNAMES.len()].to_string(),
                USERNAMES[(index + 1) % USERNAMES.len()].to_string(),
            ],
        };
        write_yaml(root, &paths.owners(&sig.name), &maintainers)?;
    }
    Ok(())
}

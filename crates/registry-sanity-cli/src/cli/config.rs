//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types.

use crate::cli::Args;
use registry_sanity_core::model::{CommunityLoader, NamespaceLayout, RegistryPaths};
use registry_sanity_core::validate::RunOptions;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application exit codes.
///
/// A run that completes maps its error count to the exit code directly, see
/// [`ExitCode::for_error_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No errors found.
    Success,
    /// Startup failed or a fatal condition stopped the run.
    StartupFailure,
    /// The run completed with this many errors, saturated to 255.
    ValidationFailed(u8),
}

impl ExitCode {
    /// Maps an error count to an exit code.
    pub fn for_error_count(errors: usize) -> Self {
        match errors {
            0 => Self::Success,
            n => Self::ValidationFailed(u8::try_from(n).unwrap_or(u8::MAX)),
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => 0,
            ExitCode::StartupFailure => 1,
            ExitCode::ValidationFailed(n) => i32::from(n),
        }
    }
}

/// Validated and processed configuration for running the checker.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Canonical path to the community directory.
    pub community_path: PathBuf,
    /// Names of the two namespaces.
    pub layout: NamespaceLayout,
    /// Locations of the registry files.
    pub paths: RegistryPaths,
    /// Options for the runner.
    pub run_options: RunOptions,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let community_path = args.community.canonicalize().map_err(|e| {
            ConfigError::Invalid(format!(
                "community path '{}' is invalid: {}",
                args.community.display(),
                e
            ))
        })?;
        if !community_path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "community path '{}' is not a directory",
                community_path.display()
            )));
        }

        let public = args.public_namespace.trim();
        let source_package = args.source_namespace.trim();
        if public.is_empty() || source_package.is_empty() {
            return Err(ConfigError::Invalid(
                "namespace names must not be empty".to_string(),
            ));
        }
        if public == source_package {
            return Err(ConfigError::Invalid(format!(
                "public and source-package namespaces must differ (both are '{}')",
                public
            )));
        }

        let layout = NamespaceLayout::new(public, source_package);
        let paths = RegistryPaths::for_layout(&layout);

        if args.previous_revision.trim().is_empty() && !args.skip_changes {
            return Err(ConfigError::Invalid(
                "previous revision must not be empty".to_string(),
            ));
        }

        Ok(Self {
            community_path,
            layout,
            paths,
            run_options: RunOptions {
                previous_revision: args.previous_revision.trim().to_string(),
                skip_changes: args.skip_changes,
            },
            json_output: args.json,
        })
    }

    /// Creates the loader for the current snapshot.
    pub fn loader(&self) -> CommunityLoader {
        CommunityLoader::new(
            self.community_path.clone(),
            self.paths.clone(),
            self.layout.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use registry_sanity_core::model::Namespace;
    use tempfile::TempDir;

    fn args(extra: &[&str], path: &std::path::Path) -> Args {
        let mut argv = vec!["registry-sanity".to_string()];
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv.push(path.display().to_string());
        Args::parse_from(argv)
    }

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&args(&[], dir.path())).unwrap();
        assert_eq!(config.community_path, dir.path().canonicalize().unwrap());
        assert_eq!(config.layout, NamespaceLayout::default());
        assert_eq!(config.run_options, RunOptions::default());
        assert!(!config.json_output);
        assert_eq!(config.loader().root(), config.community_path);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let result = ValidatedConfig::from_args(&args(&[], &missing));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_is_not_a_community() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sigs.yaml");
        std::fs::write(&file, "sigs: []\n").unwrap();
        let result = ValidatedConfig::from_args(&args(&[], &file));
        assert!(result.is_err());
    }

    #[test]
    fn test_identical_namespaces() {
        let dir = TempDir::new().unwrap();
        let result = ValidatedConfig::from_args(&args(
            &["--public-namespace", "same", "--source-namespace", "same"],
            dir.path(),
        ));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("must differ"));
    }

    #[test]
    fn test_custom_namespaces_move_registry_paths() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&args(
            &["--public-namespace", "public-hosted", "--source-namespace", "src-package-hosted"],
            dir.path(),
        ))
        .unwrap();
        assert!(
            config
                .paths
                .registry(Namespace::SourcePackage)
                .ends_with("src-package-hosted.yaml")
        );
    }

    #[test]
    fn test_skip_changes() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&args(&["--skip-changes", "-j"], dir.path())).unwrap();
        assert!(config.run_options.skip_changes);
        assert!(config.json_output);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::StartupFailure), 1);
        assert_eq!(i32::from(ExitCode::for_error_count(0)), 0);
        assert_eq!(i32::from(ExitCode::for_error_count(3)), 3);
        assert_eq!(i32::from(ExitCode::for_error_count(255)), 255);
        assert_eq!(i32::from(ExitCode::for_error_count(1_000)), 255);
    }
}

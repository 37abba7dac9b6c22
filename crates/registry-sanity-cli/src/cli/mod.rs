//! CLI module for the registry sanity checker.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod git;
pub mod output;

use clap::Parser;
use registry_sanity_core::validate::DEFAULT_PREVIOUS_REVISION;
use std::path::PathBuf;

/// Community registry sanity checker.
///
/// Checks that the SIG registry, the namespace registries and the governance
/// lists of a community directory agree with each other, and reviews what
/// changed since the previously merged revision.
#[derive(Parser, Debug)]
#[command(name = "registry-sanity")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the community data directory.
    #[arg(env = "COMMUNITY_PATH", value_name = "COMMUNITY")]
    pub community: PathBuf,

    /// Revision holding the previously merged registries.
    #[arg(long, env = "SANITY_PREVIOUS_REVISION", default_value = DEFAULT_PREVIOUS_REVISION)]
    pub previous_revision: String,

    /// Name of the public namespace.
    #[arg(long, env = "SANITY_PUBLIC_NAMESPACE", default_value = "openeuler")]
    pub public_namespace: String,

    /// Name of the source-package namespace.
    #[arg(long, env = "SANITY_SOURCE_NAMESPACE", default_value = "src-openeuler")]
    pub source_namespace: String,

    /// Skip change-set validation against the previous revision.
    #[arg(long)]
    pub skip_changes: bool,

    /// Output the report as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

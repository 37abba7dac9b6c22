//! Generate synthetic community directories for benchmarking.
//!
//! Usage: cargo run --release --bin generate-community --features generate -- [output_dir]
//!
//! Generates deterministic communities using the same presets as the Rust benchmarks.

use registry_sanity_core::generate::{GeneratorConfig, generate_community, write_community};
use registry_sanity_core::model::RegistryPaths;
use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};

/// Type alias for fixture preset entries.
type PresetEntry = (&'static str, fn() -> GeneratorConfig);

/// Community presets - keep in sync with benches/fixtures.rs
const PRESETS: &[PresetEntry] = &[
    ("small", GeneratorConfig::small),
    ("medium", GeneratorConfig::medium),
    ("large", GeneratorConfig::large),
];

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/cli/communities"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;
    let paths = RegistryPaths::default();

    for (name, config_fn) in PRESETS {
        let config = config_fn();
        let community = generate_community(&config);
        let root = output_dir.join(name);
        write_community(&community, &root, &paths)?;
        println!(
            "Generated {} ({} repositories per namespace, {} SIGs)",
            root.display(),
            community.public.repositories.len(),
            community.sigs.sigs.len()
        );
    }

    Ok(())
}

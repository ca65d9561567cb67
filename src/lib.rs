//! # Archgen
//!
//! Builds a synthetic population for quantitative-genetics studies and writes
//! it to disk: a genetic architecture, the allele matrix seeded by mutation,
//! and the trait values developed from both.
//!
//! [`run`] is the whole pipeline. The engines themselves live in
//! `archgen_core`, the file formats in `archgen_io`.

use anyhow::{Context, Result};
use archgen_core::population::{Population, TraitSummary};
use archgen_core::{rng, AppConfig, ArchitectureLogic, MutationReport, PhaseTimer};
use archgen_data::Architecture;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ARCHITECTURE_FILE: &str = "architecture.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const TRAITS_FILE: &str = "traits.csv";
pub const ALLELES_CSV_FILE: &str = "alleles.csv";
pub const ALLELES_BINARY_FILE: &str = "alleles.dat";

/// What a run produced and how long each phase took.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Seed actually used, drawn fresh when the configuration had none.
    pub seed: u64,
    pub fingerprint: String,
    pub n_individuals: usize,
    pub n_loci: usize,
    pub n_edges: usize,
    pub mutation: MutationReport,
    pub traits: Vec<TraitSummary>,
    pub files: Vec<PathBuf>,
    pub phases: Vec<(String, Duration)>,
}

/// Reads a TOML configuration and runs it into `out_dir`.
pub fn run_from_file<P: AsRef<Path>, Q: AsRef<Path>>(
    config_path: P,
    out_dir: Q,
) -> Result<RunSummary> {
    let config = archgen_io::load_config(&config_path)
        .with_context(|| format!("loading configuration {:?}", config_path.as_ref()))?;
    run(config, out_dir.as_ref())
}

/// Generates (or loads) an architecture, a population under it, and writes
/// the requested files into `out_dir`.
///
/// The seed is resolved first and recorded in the saved configuration, so
/// rerunning that file reproduces the run.
pub fn run(mut config: AppConfig, out_dir: &Path) -> Result<RunSummary> {
    config.validate().context("invalid configuration")?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {out_dir:?}"))?;

    let seed = rng::resolve_seed(config.population.seed);
    config.population.seed = Some(seed);
    let mut rng = rng::seeded(seed);
    let mut timer = PhaseTimer::new();
    let mut files = Vec::new();

    let architecture = match config.output.load_architecture.clone() {
        Some(path) => {
            let arch = archgen_io::load_architecture(&path)
                .with_context(|| format!("loading architecture {path:?}"))?;
            config
                .override_with(&arch)
                .context("architecture does not fit the configuration")?;
            arch
        }
        None => Architecture::generate_with_rng(&config, &mut rng)
            .context("generating architecture")?,
    };
    timer.finish("architecture");

    tracing::info!(
        seed,
        fingerprint = %config.fingerprint(),
        individuals = config.population.size,
        traits = config.n_traits(),
        loci = architecture.n_loci(),
        edges = architecture.n_edges(),
        "Architecture ready"
    );

    if config.output.save_architecture {
        let path = out_dir.join(ARCHITECTURE_FILE);
        archgen_io::save_architecture(&path, &architecture)?;
        files.push(path);
    }
    if config.output.save_config {
        let path = out_dir.join(CONFIG_FILE);
        archgen_io::save_config(&path, &config)?;
        files.push(path);
    }

    let population = Population::with_architecture(&config, architecture, &mut rng)
        .context("generating population")?;
    timer.finish("population");

    let traits_path = out_dir.join(TRAITS_FILE);
    archgen_io::save_traits(&traits_path, &population.traits)?;
    files.push(traits_path);

    let alleles_path = out_dir.join(if config.output.binary {
        ALLELES_BINARY_FILE
    } else {
        ALLELES_CSV_FILE
    });
    archgen_io::save_alleles(&alleles_path, &population.alleles, config.output.binary)?;
    files.push(alleles_path);
    timer.finish("output");

    let summary = RunSummary {
        seed,
        fingerprint: config.fingerprint(),
        n_individuals: population.size(),
        n_loci: population.architecture.n_loci(),
        n_edges: population.architecture.n_edges(),
        mutation: population.report,
        traits: population.summary(),
        files,
        phases: timer
            .phases()
            .iter()
            .map(|(name, d)| ((*name).to_string(), *d))
            .collect(),
    };

    tracing::info!(
        flipped = summary.mutation.flipped,
        frequency = population.allele_frequency(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Run complete"
    );
    Ok(summary)
}

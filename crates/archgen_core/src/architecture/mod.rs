pub mod generation;
pub mod validation;

use crate::config::AppConfig;
use crate::error::Result;
use archgen_data::Architecture;
use rand::Rng;

pub use generation::preferential_attachment;

/// Trait defining how genetic architectures are built and validated.
pub trait ArchitectureLogic: Sized {
    /// Builds a random architecture matching the configured per-trait locus
    /// and edge counts.
    fn generate_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Result<Self>;

    /// Checks the structural invariants: every locus encodes a known trait,
    /// every trait has a locus, and every edge joins two distinct loci of the
    /// same trait.
    fn check(&self) -> Result<()>;

    /// Runs `check` and also compares the realized per-trait counts with the
    /// configuration.
    fn check_against(&self, config: &AppConfig) -> Result<()>;
}

impl ArchitectureLogic for Architecture {
    fn generate_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Result<Self> {
        generation::generate_with_rng(config, rng)
    }

    fn check(&self) -> Result<()> {
        validation::check(self)
    }

    fn check_against(&self, config: &AppConfig) -> Result<()> {
        validation::check_against(self, config)
    }
}

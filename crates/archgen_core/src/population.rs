use crate::architecture::ArchitectureLogic;
use crate::config::AppConfig;
use crate::development::develop;
use crate::error::Result;
use crate::mutation::{AlleleLogic, MutationReport};
use archgen_data::{AlleleMatrix, Architecture, TraitMatrix};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A generated population together with the architecture it was developed
/// under.
#[derive(Debug, Clone)]
pub struct Population {
    pub architecture: Architecture,
    pub alleles: AlleleMatrix,
    pub traits: TraitMatrix,
    pub report: MutationReport,
}

/// Population mean and variance of one trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitSummary {
    pub trait_id: usize,
    pub mean: f64,
    pub variance: f64,
}

impl Population {
    /// Generates an architecture and then a population under it.
    pub fn generate<R: Rng>(config: &AppConfig, rng: &mut R) -> Result<Self> {
        let architecture = Architecture::generate_with_rng(config, rng)?;
        Self::with_architecture(config, architecture, rng)
    }

    /// Seeds alleles at the configured frequency and develops trait values
    /// under a supplied architecture.
    pub fn with_architecture<R: Rng>(
        config: &AppConfig,
        architecture: Architecture,
        rng: &mut R,
    ) -> Result<Self> {
        architecture.check_against(config)?;

        let mut alleles = AlleleMatrix::new(config.population.size, architecture.n_loci());
        let report = alleles.mutate_with_config(&config.mutation, rng)?;
        let traits = develop(&alleles, &architecture, config, rng)?;

        Ok(Self {
            architecture,
            alleles,
            traits,
            report,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.alleles.n_individuals()
    }

    /// Fraction of alleles in state 1.
    #[must_use]
    pub fn allele_frequency(&self) -> f64 {
        if self.alleles.is_empty() {
            return 0.0;
        }
        self.alleles.count_ones() as f64 / self.alleles.len() as f64
    }

    #[must_use]
    pub fn summary(&self) -> Vec<TraitSummary> {
        (0..self.traits.n_traits())
            .map(|trait_id| TraitSummary {
                trait_id,
                mean: self.traits.mean(trait_id),
                variance: self.traits.variance(trait_id),
            })
            .collect()
    }
}

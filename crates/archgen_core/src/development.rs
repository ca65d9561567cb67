//! Genotype-to-phenotype mapping.
//!
//! Each trait value is the sum of additive locus terms, pairwise epistatic
//! terms along the trait network and one Gaussian environmental deviation.
//! Individuals are independent, so the work is sharded by individual.

use crate::architecture::ArchitectureLogic;
use crate::config::AppConfig;
use crate::error::{CoreError, Result};
use crate::rng;
use archgen_data::{AlleleMatrix, Architecture, TraitMatrix};
use rand::Rng;
use rand_distr::StandardNormal;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-locus and per-edge factors folded from the architecture and the trait
/// scales, shared read-only by every individual.
struct Coefficients {
    /// `dominance * trait dominance` per locus; times genotype gives expression.
    expression: Vec<f64>,
    /// `effect * (1 - trait epistasis)` per locus.
    additive: Vec<f64>,
    trait_of: Vec<usize>,
    /// `(from, to, weight * trait epistasis)`.
    interactions: Vec<(usize, usize, f64)>,
    noise: Vec<f64>,
}

impl Coefficients {
    fn fold(arch: &Architecture, config: &AppConfig) -> Self {
        let traits = &config.traits;
        Self {
            expression: arch
                .loci
                .iter()
                .map(|l| l.dominance * traits[l.trait_id].dominance)
                .collect(),
            additive: arch
                .loci
                .iter()
                .map(|l| l.effect * (1.0 - traits[l.trait_id].epistasis))
                .collect(),
            trait_of: arch.loci.iter().map(|l| l.trait_id).collect(),
            interactions: arch
                .edges
                .iter()
                .map(|e| {
                    let epistasis = traits[arch.loci[e.from].trait_id].epistasis;
                    (e.from, e.to, e.weight * epistasis)
                })
                .collect(),
            noise: traits.iter().map(|t| t.env_noise).collect(),
        }
    }
}

/// Computes the trait values of every individual in `alleles`.
///
/// Noise for individual `i` comes from sub-stream `i` of a seed drawn once
/// from `rng`, so results for a given seed do not depend on thread count.
pub fn develop<R: Rng>(
    alleles: &AlleleMatrix,
    arch: &Architecture,
    config: &AppConfig,
    rng: &mut R,
) -> Result<TraitMatrix> {
    arch.check()?;
    if alleles.n_loci() != arch.n_loci() {
        return Err(CoreError::dimension(format!(
            "allele matrix has {} loci, architecture has {}",
            alleles.n_loci(),
            arch.n_loci()
        )));
    }
    if config.n_traits() != arch.n_traits {
        return Err(CoreError::dimension(format!(
            "configuration has {} traits, architecture has {}",
            config.n_traits(),
            arch.n_traits
        )));
    }

    let n_individuals = alleles.n_individuals();
    let n_traits = arch.n_traits;
    let coefficients = Coefficients::fold(arch, config);
    let noise_seed: u64 = rng.gen();
    let mut values = vec![0.0; n_individuals * n_traits];

    #[cfg(feature = "parallel")]
    values
        .par_chunks_mut(n_traits)
        .enumerate()
        .for_each_init(
            || vec![0.0; arch.n_loci()],
            |expression, (i, row)| {
                develop_individual(alleles, &coefficients, noise_seed, i, expression, row);
            },
        );

    #[cfg(not(feature = "parallel"))]
    {
        let mut expression = vec![0.0; arch.n_loci()];
        for (i, row) in values.chunks_mut(n_traits).enumerate() {
            develop_individual(alleles, &coefficients, noise_seed, i, &mut expression, row);
        }
    }

    TraitMatrix::from_values(n_individuals, n_traits, values)
        .ok_or_else(|| CoreError::dimension("trait matrix size mismatch"))
}

fn develop_individual(
    alleles: &AlleleMatrix,
    coefficients: &Coefficients,
    noise_seed: u64,
    individual: usize,
    expression: &mut [f64],
    row: &mut [f64],
) {
    for (l, expr) in expression.iter_mut().enumerate() {
        *expr = f64::from(alleles.genotype(individual, l)) * coefficients.expression[l];
        row[coefficients.trait_of[l]] += *expr * coefficients.additive[l];
    }

    for &(from, to, factor) in &coefficients.interactions {
        row[coefficients.trait_of[from]] += expression[from] * expression[to] * factor;
    }

    let mut noise_rng = rng::substream(noise_seed, individual as u64);
    for (value, &scale) in row.iter_mut().zip(&coefficients.noise) {
        let deviation: f64 = noise_rng.sample(StandardNormal);
        *value += deviation * scale;
    }
}

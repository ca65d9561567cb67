//! Mutation engine: flips bits of an allele matrix in place.
//!
//! Four sampling regimes pick the mutated positions. They differ in cost and
//! in what is random (each position, the total count, or nothing but the
//! rounding), not in the expected mutation density. Dense mutation is handled
//! by flipping everything and then flipping the sparse complement back.

use crate::config::{MutationConfig, SamplingMode};
use crate::error::{CoreError, Result};
use archgen_data::AlleleMatrix;
use rand::distributions::{Bernoulli, Distribution};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Binomial, Geometric};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of one mutation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    pub mode: SamplingMode,
    /// Number of positions whose state changed.
    pub flipped: usize,
    /// Whether the pass flipped everything and then sampled the complement.
    pub inverted: bool,
}

/// Trait defining the mutation interface of allele matrices.
pub trait AlleleLogic {
    fn mutate_with_rng<R: Rng>(
        &mut self,
        rate: f64,
        mode: SamplingMode,
        ratio: f64,
        rng: &mut R,
    ) -> Result<MutationReport>;

    fn mutate_with_config<R: Rng>(
        &mut self,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Result<MutationReport> {
        self.mutate_with_rng(config.rate, config.sampling, config.ratio, rng)
    }
}

impl AlleleLogic for AlleleMatrix {
    fn mutate_with_rng<R: Rng>(
        &mut self,
        rate: f64,
        mode: SamplingMode,
        ratio: f64,
        rng: &mut R,
    ) -> Result<MutationReport> {
        mutate(self, rate, mode, ratio, rng)
    }
}

pub fn mutate<R: Rng>(
    alleles: &mut AlleleMatrix,
    rate: f64,
    mode: SamplingMode,
    ratio: f64,
    rng: &mut R,
) -> Result<MutationReport> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(CoreError::InvalidRate(rate));
    }
    if !(0.0..=1.0).contains(&ratio) {
        return Err(CoreError::invariant(format!(
            "partial shuffle ratio {ratio} is not in [0, 1]"
        )));
    }

    let n = alleles.len();
    let report = if rate == 0.0 || n == 0 {
        MutationReport {
            mode,
            flipped: 0,
            inverted: false,
        }
    } else if rate == 1.0 {
        alleles.flip_all();
        MutationReport {
            mode,
            flipped: n,
            inverted: false,
        }
    } else {
        match mode {
            SamplingMode::Bernoulli => mutate_bernoulli(alleles, rate, rng)?,
            SamplingMode::Geometric => mutate_geometric(alleles, rate, rng)?,
            SamplingMode::Binomial => {
                let dist = Binomial::new(n as u64, rate)
                    .map_err(|e| CoreError::invariant(format!("binomial sampler: {e}")))?;
                let k = usize::try_from(dist.sample(rng)).unwrap_or(n).min(n);
                flip_distinct(alleles, k, mode, ratio, rng)
            }
            SamplingMode::Given => {
                let k = given_count(n, rate, rng);
                flip_distinct(alleles, k, mode, ratio, rng)
            }
        }
    };

    tracing::debug!(
        mode = %report.mode,
        alleles = n,
        flipped = report.flipped,
        inverted = report.inverted,
        "Mutations applied"
    );
    Ok(report)
}

/// Deterministic mutation count `rate * n`, rounded down or up on a fair coin
/// so that repeated runs are unbiased.
pub fn given_count<R: Rng>(n: usize, rate: f64, rng: &mut R) -> usize {
    let floor = (rate * n as f64).floor() as usize;
    (floor + usize::from(rng.gen_bool(0.5))).min(n)
}

fn mutate_bernoulli<R: Rng>(
    alleles: &mut AlleleMatrix,
    rate: f64,
    rng: &mut R,
) -> Result<MutationReport> {
    let coin = Bernoulli::new(rate)
        .map_err(|e| CoreError::invariant(format!("bernoulli sampler: {e}")))?;
    let mut flipped = 0;
    for i in 0..alleles.len() {
        if coin.sample(rng) {
            alleles.flip(i);
            flipped += 1;
        }
    }
    Ok(MutationReport {
        mode: SamplingMode::Bernoulli,
        flipped,
        inverted: false,
    })
}

/// Treats mutated positions as a renewal process with geometric gaps. Above
/// one half, the unmutated positions are the sparse ones and get sampled
/// instead.
fn mutate_geometric<R: Rng>(
    alleles: &mut AlleleMatrix,
    rate: f64,
    rng: &mut R,
) -> Result<MutationReport> {
    let n = alleles.len();
    let inverted = rate > 0.5;
    let p = if inverted {
        alleles.flip_all();
        1.0 - rate
    } else {
        rate
    };

    let gaps =
        Geometric::new(p).map_err(|e| CoreError::invariant(format!("geometric sampler: {e}")))?;
    let mut sampled = 0;
    let mut i = usize::try_from(gaps.sample(rng)).unwrap_or(usize::MAX);
    while i < n {
        alleles.flip(i);
        sampled += 1;
        let gap = usize::try_from(gaps.sample(rng)).unwrap_or(usize::MAX);
        i = i.saturating_add(gap).saturating_add(1);
    }

    Ok(MutationReport {
        mode: SamplingMode::Geometric,
        flipped: if inverted { n - sampled } else { sampled },
        inverted,
    })
}

/// Flips exactly `k` distinct positions, reporting them under `mode`.
fn flip_distinct<R: Rng>(
    alleles: &mut AlleleMatrix,
    k: usize,
    mode: SamplingMode,
    ratio: f64,
    rng: &mut R,
) -> MutationReport {
    let n = alleles.len();
    let inverted = k > n / 2;
    let target = if inverted {
        alleles.flip_all();
        n - k
    } else {
        k
    };

    for i in sample_distinct(n, target, ratio, rng) {
        alleles.flip(i);
    }

    MutationReport {
        mode,
        flipped: k,
        inverted,
    }
}

/// Picks `k` distinct indices of `0..n` uniformly at random.
///
/// Above a density of `ratio` all indices are shuffled, which costs O(n).
/// Otherwise only the first `k` slots of a Fisher-Yates shuffle are drawn,
/// tracking displaced slots in a map, which costs O(k).
pub fn sample_distinct<R: Rng>(n: usize, k: usize, ratio: f64, rng: &mut R) -> Vec<usize> {
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }

    if k as f64 / n as f64 > ratio {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        indices.truncate(k);
        return indices;
    }

    let mut displaced: HashMap<usize, usize> = HashMap::with_capacity(k);
    let mut picked = Vec::with_capacity(k);
    for i in 0..k {
        let j = rng.gen_range(i..n);
        let at_i = displaced.get(&i).copied().unwrap_or(i);
        let at_j = displaced.get(&j).copied().unwrap_or(j);
        displaced.insert(j, at_i);
        picked.push(at_j);
    }
    picked
}

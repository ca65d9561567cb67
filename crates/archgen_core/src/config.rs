//! Configuration management for population generation.
//!
//! This module provides strongly-typed configuration structures that map to a
//! TOML file. Every hyperparameter of a run lives here, and `validate` is the
//! single place where their bounds are enforced.
//!
//! ## Example
//!
//! ```toml
//! [population]
//! size = 100
//! seed = 42
//!
//! [genetics]
//! effect_sd = 0.5
//! weight_sd = 0.2
//!
//! [mutation]
//! rate = 0.3
//! sampling = "geometric"
//! ratio = 0.25
//!
//! [[traits]]
//! loci = 50
//! edges = 60
//! skew = 1.5
//! epistasis = 0.5
//! dominance = 1.0
//! env_noise = 0.1
//! ```

use crate::error::CoreError;
use archgen_data::Architecture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How mutated positions are drawn from the allele matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Exactly `floor(rate * N)` or one more, decided by a fair coin.
    #[default]
    Given,
    /// Every position tested independently.
    Bernoulli,
    /// Mutation count drawn from `Binomial(N, rate)`.
    Binomial,
    /// Gaps between mutated positions drawn from a geometric distribution.
    Geometric,
}

impl SamplingMode {
    pub const ALL: [SamplingMode; 4] = [
        SamplingMode::Given,
        SamplingMode::Bernoulli,
        SamplingMode::Binomial,
        SamplingMode::Geometric,
    ];

    /// Decodes the numeric mode (given=0, bernoulli=1, binomial=2, geometric=3).
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            0 => Ok(Self::Given),
            1 => Ok(Self::Bernoulli),
            2 => Ok(Self::Binomial),
            3 => Ok(Self::Geometric),
            other => Err(CoreError::UnknownSamplingMode(other)),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Given => 0,
            Self::Bernoulli => 1,
            Self::Binomial => 2,
            Self::Geometric => 3,
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Given => "given",
            Self::Bernoulli => "bernoulli",
            Self::Binomial => "binomial",
            Self::Geometric => "geometric",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    /// Seed of the random stream. Drawn at startup when absent.
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 10,
            seed: None,
        }
    }
}

/// Scales of the randomly drawn architecture parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Standard deviation of additive effect sizes.
    pub effect_sd: f64,
    /// Standard deviation of interaction weights.
    pub weight_sd: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MutationConfig {
    /// Probability that an allele is in state 1 after seeding.
    pub rate: f64,
    pub sampling: SamplingMode,
    /// Mutation density above which positions come from a full shuffle.
    pub ratio: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.0,
            sampling: SamplingMode::Given,
            ratio: 0.25,
        }
    }
}

/// Per-trait architecture and development parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TraitConfig {
    pub loci: usize,
    pub edges: usize,
    /// Exponent on vertex degree during preferential attachment.
    pub skew: f64,
    /// Share of the trait value coming from interactions, in [0, 1].
    pub epistasis: f64,
    pub dominance: f64,
    pub env_noise: f64,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            loci: 10,
            edges: 0,
            skew: 1.0,
            epistasis: 0.0,
            dominance: 0.0,
            env_noise: 0.0,
        }
    }
}

impl TraitConfig {
    /// Largest edge count a trait network of this size can hold.
    #[must_use]
    pub fn max_edges(&self) -> usize {
        self.loci * self.loci.saturating_sub(1) / 2
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub save_architecture: bool,
    pub save_config: bool,
    /// Write the allele matrix as raw words instead of CSV.
    pub binary: bool,
    /// Read the architecture from this file instead of generating one.
    pub load_architecture: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_architecture: true,
            save_config: true,
            binary: false,
            load_architecture: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub population: PopulationConfig,
    pub genetics: GeneticsConfig,
    pub mutation: MutationConfig,
    pub traits: Vec<TraitConfig>,
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            genetics: GeneticsConfig::default(),
            mutation: MutationConfig::default(),
            traits: vec![TraitConfig::default()],
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn n_traits(&self) -> usize {
        self.traits.len()
    }

    #[must_use]
    pub fn n_loci(&self) -> usize {
        self.traits.iter().map(|t| t.loci).sum()
    }

    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.traits.iter().map(|t| t.edges).sum()
    }

    /// Total number of allele bits in the population.
    #[must_use]
    pub fn n_alleles(&self) -> usize {
        2 * self.population.size * self.n_loci()
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.population.size > 0, "Population size must be positive");
        anyhow::ensure!(!self.traits.is_empty(), "At least one trait is required");

        anyhow::ensure!(
            self.genetics.effect_sd >= 0.0 && self.genetics.effect_sd.is_finite(),
            "Effect size standard deviation must be non-negative"
        );
        anyhow::ensure!(
            self.genetics.weight_sd >= 0.0 && self.genetics.weight_sd.is_finite(),
            "Interaction weight standard deviation must be non-negative"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.mutation.rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.mutation.ratio),
            "Partial shuffle ratio must be in [0.0, 1.0]"
        );

        for (i, t) in self.traits.iter().enumerate() {
            let n = i + 1;
            anyhow::ensure!(t.loci > 0, "Trait {n} must have at least one locus");
            anyhow::ensure!(
                t.edges <= t.max_edges(),
                "Too many edges for the number of loci for trait {n}"
            );
            anyhow::ensure!(
                t.skew >= 0.0 && t.skew.is_finite(),
                "Skew of trait {n} must be non-negative"
            );
            anyhow::ensure!(
                (0.0..=1.0).contains(&t.epistasis),
                "Epistasis of trait {n} must be in [0.0, 1.0]"
            );
            anyhow::ensure!(
                t.dominance >= 0.0 && t.dominance.is_finite(),
                "Dominance of trait {n} must be non-negative"
            );
            anyhow::ensure!(
                t.env_noise >= 0.0 && t.env_noise.is_finite(),
                "Environmental noise of trait {n} must be non-negative"
            );
        }

        Ok(())
    }

    /// Loads and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the effective configuration, e.g. as a parameter log.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Takes per-trait locus and edge counts from an existing architecture.
    ///
    /// The trait-level scales stay those of the configuration, so the trait
    /// counts must agree.
    pub fn override_with(&mut self, arch: &Architecture) -> anyhow::Result<()> {
        anyhow::ensure!(
            arch.n_traits == self.n_traits(),
            "Architecture encodes {} traits but the configuration describes {}",
            arch.n_traits,
            self.n_traits()
        );
        let loci = arch.loci_per_trait();
        let edges = arch.edges_per_trait();
        for (t, trait_config) in self.traits.iter_mut().enumerate() {
            trait_config.loci = loci[t];
            trait_config.edges = edges[t];
        }
        self.validate()
    }

    /// SHA-256 of the parameters that shape the generated population.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.population).as_bytes());
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.mutation).as_bytes());
        hasher.update(format!("{:?}", self.traits).as_bytes());
        hex::encode(hasher.finalize())
    }
}

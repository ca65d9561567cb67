//! # Archgen Core
//!
//! Generation engine for synthetic quantitative-genetics populations.
//!
//! This crate contains:
//! - Genetic architecture generation with skewed preferential attachment
//! - Structural validation of architectures against their configuration
//! - A mutation engine over packed allele matrices with four sampling modes
//! - The genotype-to-phenotype development engine
//! - Configuration, error taxonomy and structured logging
//!
//! ## Pipeline
//!
//! An architecture is built once, the allele matrix is seeded by a single
//! mutation pass, and trait values are developed from both. Every stochastic
//! step draws from one explicitly passed generator, so a seed fixes the run.
//!
//! ## Example
//!
//! ```
//! use archgen_core::population::Population;
//! use archgen_core::AppConfig;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut config = AppConfig::default();
//! config.mutation.rate = 0.2;
//! config.traits[0].edges = 12;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let population = Population::generate(&config, &mut rng).unwrap();
//! assert_eq!(population.traits.n_individuals(), 10);
//! assert_eq!(population.architecture.n_edges(), 12);
//! ```

/// Architecture generation and invariant checks
pub mod architecture;
/// Hyperparameters loaded from TOML
pub mod config;
/// Genotype-to-phenotype mapping
pub mod development;
/// Error types for the generation engine
pub mod error;
/// Phase timing and logging setup
pub mod metrics;
/// Allele matrix mutation under the four sampling modes
pub mod mutation;
/// Graph analysis of per-trait interaction networks
pub mod network;
/// End-to-end in-memory population generation
pub mod population;
/// Seeding helpers for reproducible random streams
pub mod rng;

pub use architecture::ArchitectureLogic;
pub use config::{AppConfig, SamplingMode};
pub use error::{CoreError, Result};
pub use metrics::{init_logging, PhaseTimer};
pub use mutation::{AlleleLogic, MutationReport};
pub use archgen_data::{AlleleMatrix, Architecture, Edge, Locus, TraitMatrix};

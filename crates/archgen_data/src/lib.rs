//! # Archgen Data
//!
//! Plain data types shared by the archgen crates: the genetic architecture,
//! the packed allele matrix and the trait-value matrix. Algorithms that build
//! or transform them live in `archgen_core`.

pub mod data;

pub use data::alleles::{AlleleMatrix, WORD_BITS};
pub use data::architecture::{Architecture, Edge, Locus};
pub use data::traits::TraitMatrix;

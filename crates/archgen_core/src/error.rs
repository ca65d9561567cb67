//! Error types for archgen_core.
//!
//! Construction errors (a trait network that cannot reach its edge count) and
//! invariant violations are both terminal for a run. Nothing here is retried.

use thiserror::Error;

/// Main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The preferential attachment process could not place every requested edge.
    #[error(
        "Not all requested edges could be made for trait {} ({} of {})",
        .trait_id + 1,
        .placed,
        .requested
    )]
    EdgeShortfall {
        trait_id: usize,
        placed: usize,
        requested: usize,
    },

    /// Declared and realized structure disagree, or an edge is malformed.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Sampling mode codes are 0 (given), 1 (bernoulli), 2 (binomial) and 3 (geometric).
    #[error("Unknown sampling mode code {0}")]
    UnknownSamplingMode(u8),

    /// Matrix, architecture and configuration shapes are inconsistent.
    #[error("Dimension mismatch: {0}")]
    Dimension(String),

    /// Mutation rate outside [0, 1].
    #[error("Mutation rate {0} is not a probability")]
    InvalidRate(f64),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Creates a new invariant error.
    #[must_use]
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::Invariant(msg.into())
    }

    /// Creates a new dimension error.
    #[must_use]
    pub fn dimension<S: Into<String>>(msg: S) -> Self {
        Self::Dimension(msg.into())
    }
}

use serde::{Deserialize, Serialize};

/// Trait values of a population, individual-major: the values of one
/// individual are contiguous.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraitMatrix {
    n_individuals: usize,
    n_traits: usize,
    values: Vec<f64>,
}

impl TraitMatrix {
    #[must_use]
    pub fn zeros(n_individuals: usize, n_traits: usize) -> Self {
        Self {
            n_individuals,
            n_traits,
            values: vec![0.0; n_individuals * n_traits],
        }
    }

    /// Wraps a flat individual-major buffer. Returns `None` if its length does
    /// not match the dimensions.
    #[must_use]
    pub fn from_values(n_individuals: usize, n_traits: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == n_individuals * n_traits).then_some(Self {
            n_individuals,
            n_traits,
            values,
        })
    }

    #[must_use]
    pub fn n_individuals(&self) -> usize {
        self.n_individuals
    }

    #[must_use]
    pub fn n_traits(&self) -> usize {
        self.n_traits
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, individual: usize, trait_id: usize) -> f64 {
        self.values[individual * self.n_traits + trait_id]
    }

    /// Values of one individual.
    #[must_use]
    pub fn row(&self, individual: usize) -> &[f64] {
        let start = individual * self.n_traits;
        &self.values[start..start + self.n_traits]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on a zero chunk size
        self.values.chunks(self.n_traits.max(1))
    }

    /// Population mean of one trait.
    #[must_use]
    pub fn mean(&self, trait_id: usize) -> f64 {
        if self.n_individuals == 0 {
            return 0.0;
        }
        self.rows().map(|r| r[trait_id]).sum::<f64>() / self.n_individuals as f64
    }

    /// Population (biased) variance of one trait.
    #[must_use]
    pub fn variance(&self, trait_id: usize) -> f64 {
        if self.n_individuals == 0 {
            return 0.0;
        }
        let mean = self.mean(trait_id);
        self.rows()
            .map(|r| (r[trait_id] - mean).powi(2))
            .sum::<f64>()
            / self.n_individuals as f64
    }
}

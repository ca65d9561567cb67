use serde::{Deserialize, Serialize};

/// A single genetic position.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Locus {
    /// Trait encoded by the locus (zero-based).
    pub trait_id: usize,
    /// Additive effect size.
    pub effect: f64,
    /// Dominance deviation.
    pub dominance: f64,
}

/// A directed epistatic interaction between two loci of the same trait.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    /// Index of the source locus.
    pub from: usize,
    /// Index of the target locus.
    pub to: usize,
    /// Interaction weight.
    pub weight: f64,
}

/// The genetic architecture of all traits: which loci encode which trait and
/// how loci of the same trait interact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Architecture {
    /// Number of traits.
    pub n_traits: usize,
    /// All loci, in genome order.
    pub loci: Vec<Locus>,
    /// All interaction edges.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Architecture {
    #[must_use]
    pub fn new(n_traits: usize, loci: Vec<Locus>, edges: Vec<Edge>) -> Self {
        Self {
            n_traits,
            loci,
            edges,
        }
    }

    #[must_use]
    pub fn n_loci(&self) -> usize {
        self.loci.len()
    }

    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of loci encoding each trait. Out-of-range trait ids are ignored.
    #[must_use]
    pub fn loci_per_trait(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_traits];
        for locus in &self.loci {
            if let Some(c) = counts.get_mut(locus.trait_id) {
                *c += 1;
            }
        }
        counts
    }

    /// Number of edges affecting each trait, attributed through the source locus.
    #[must_use]
    pub fn edges_per_trait(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_traits];
        for edge in &self.edges {
            let trait_id = self.loci.get(edge.from).map(|l| l.trait_id);
            if let Some(c) = trait_id.and_then(|t| counts.get_mut(t)) {
                *c += 1;
            }
        }
        counts
    }

    /// Indices of the loci encoding `trait_id`, in ascending order.
    #[must_use]
    pub fn loci_of_trait(&self, trait_id: usize) -> Vec<usize> {
        self.loci
            .iter()
            .enumerate()
            .filter(|(_, l)| l.trait_id == trait_id)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for Architecture {
    /// Ten loci with null effects on a single trait and no edges.
    fn default() -> Self {
        let loci = (0..10)
            .map(|_| Locus {
                trait_id: 0,
                effect: 0.0,
                dominance: 0.0,
            })
            .collect();
        Self::new(1, loci, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locus(trait_id: usize) -> Locus {
        Locus {
            trait_id,
            effect: 1.0,
            dominance: 1.0,
        }
    }

    #[test]
    fn test_counts_per_trait() {
        let arch = Architecture::new(
            2,
            vec![locus(0), locus(1), locus(0), locus(1), locus(1)],
            vec![
                Edge {
                    from: 0,
                    to: 2,
                    weight: 0.5,
                },
                Edge {
                    from: 4,
                    to: 1,
                    weight: -0.5,
                },
                Edge {
                    from: 3,
                    to: 4,
                    weight: 0.1,
                },
            ],
        );

        assert_eq!(arch.loci_per_trait(), vec![2, 3]);
        assert_eq!(arch.edges_per_trait(), vec![1, 2]);
        assert_eq!(arch.loci_of_trait(1), vec![1, 3, 4]);
    }

    #[test]
    fn test_edges_default_to_empty_when_absent() {
        let json = r#"{"n_traits":1,"loci":[{"trait_id":0,"effect":0.5,"dominance":1.0}]}"#;
        let arch: Architecture = serde_json::from_str(json).expect("valid architecture json");
        assert_eq!(arch.n_loci(), 1);
        assert!(arch.edges.is_empty());
    }

    #[test]
    fn test_default_has_single_trait() {
        let arch = Architecture::default();
        assert_eq!(arch.n_traits, 1);
        assert_eq!(arch.n_loci(), 10);
        assert_eq!(arch.n_edges(), 0);
    }
}

use archgen_core::config::{SamplingMode, TraitConfig};
use archgen_core::AppConfig;
use archgen_data::{AlleleMatrix, Architecture, Edge, Locus};

#[allow(dead_code)]
pub struct ConfigBuilder {
    config: AppConfig,
    traits: Vec<TraitConfig>,
}

#[allow(dead_code)]
impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.population.seed = Some(42);
        Self {
            config,
            traits: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.population.seed = Some(seed);
        self
    }

    pub fn with_population(mut self, size: usize) -> Self {
        self.config.population.size = size;
        self
    }

    pub fn with_mutation(mut self, rate: f64, sampling: SamplingMode) -> Self {
        self.config.mutation.rate = rate;
        self.config.mutation.sampling = sampling;
        self
    }

    pub fn with_scales(mut self, effect_sd: f64, weight_sd: f64) -> Self {
        self.config.genetics.effect_sd = effect_sd;
        self.config.genetics.weight_sd = weight_sd;
        self
    }

    pub fn with_trait(mut self, loci: usize, edges: usize, skew: f64) -> Self {
        self.traits.push(TraitConfig {
            loci,
            edges,
            skew,
            dominance: 1.0,
            ..Default::default()
        });
        self
    }

    /// Sets the scales of the most recently added trait.
    pub fn with_trait_scales(mut self, epistasis: f64, dominance: f64, env_noise: f64) -> Self {
        if let Some(t) = self.traits.last_mut() {
            t.epistasis = epistasis;
            t.dominance = dominance;
            t.env_noise = env_noise;
        }
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn build(mut self) -> AppConfig {
        if !self.traits.is_empty() {
            self.config.traits = self.traits;
        }
        self.config
    }
}

/// Locus of trait 0 with unit dominance.
#[allow(dead_code)]
pub fn locus(effect: f64) -> Locus {
    Locus {
        trait_id: 0,
        effect,
        dominance: 1.0,
    }
}

#[allow(dead_code)]
pub fn edge(from: usize, to: usize, weight: f64) -> Edge {
    Edge { from, to, weight }
}

/// Relabels loci so that old locus `l` becomes `perm[l]`, carrying edges and
/// alleles along.
#[allow(dead_code)]
pub fn relabel(
    arch: &Architecture,
    alleles: &AlleleMatrix,
    perm: &[usize],
) -> (Architecture, AlleleMatrix) {
    let mut loci = arch.loci.clone();
    for (l, locus) in arch.loci.iter().enumerate() {
        loci[perm[l]] = locus.clone();
    }
    let edges = arch
        .edges
        .iter()
        .map(|e| edge(perm[e.from], perm[e.to], e.weight))
        .collect();

    let mut moved = AlleleMatrix::new(alleles.n_individuals(), alleles.n_loci());
    for h in 0..2 {
        for i in 0..alleles.n_individuals() {
            for (l, &p) in perm.iter().enumerate() {
                moved.set(moved.index(h, i, p), alleles.get(alleles.index(h, i, l)));
            }
        }
    }
    (Architecture::new(arch.n_traits, loci, edges), moved)
}

mod common;

use archgen_core::config::TraitConfig;
use archgen_core::mutation::{mutate, sample_distinct};
use archgen_core::{AppConfig, ArchitectureLogic, SamplingMode};
use archgen_data::{AlleleMatrix, Architecture};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

prop_compose! {
    fn arb_trait()(loci in 1usize..30)(
        loci in Just(loci),
        edges in 0..=loci * (loci - 1) / 2,
        skew in 0.0f64..3.0,
    ) -> TraitConfig {
        TraitConfig { loci, edges, skew, ..Default::default() }
    }
}

prop_compose! {
    fn arb_config()(
        traits in prop::collection::vec(arb_trait(), 1..5),
        effect_sd in 0.0f64..2.0,
        weight_sd in 0.0f64..2.0,
    ) -> AppConfig {
        let mut config = AppConfig { traits, ..Default::default() };
        config.genetics.effect_sd = effect_sd;
        config.genetics.weight_sd = weight_sd;
        config
    }
}

fn arb_mode() -> impl Strategy<Value = SamplingMode> {
    prop::sample::select(SamplingMode::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn generation_realizes_requested_counts(config in arb_config(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let arch = Architecture::generate_with_rng(&config, &mut rng).unwrap();

        let loci: Vec<usize> = config.traits.iter().map(|t| t.loci).collect();
        let edges: Vec<usize> = config.traits.iter().map(|t| t.edges).collect();
        prop_assert_eq!(arch.loci_per_trait(), loci);
        prop_assert_eq!(arch.edges_per_trait(), edges);

        let mut pairs = HashSet::new();
        for e in &arch.edges {
            prop_assert_ne!(e.from, e.to);
            prop_assert_eq!(arch.loci[e.from].trait_id, arch.loci[e.to].trait_id);
            prop_assert!(pairs.insert((e.from.min(e.to), e.from.max(e.to))));
        }
    }

    #[test]
    fn sample_distinct_is_distinct(
        n in 1usize..2000,
        k_frac in 0.0f64..=1.0,
        ratio in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let k = ((n as f64) * k_frac) as usize;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picked = sample_distinct(n, k, ratio, &mut rng);
        let unique: HashSet<_> = picked.iter().copied().collect();
        prop_assert_eq!(picked.len(), k);
        prop_assert_eq!(unique.len(), k);
        prop_assert!(picked.iter().all(|&i| i < n));
    }

    #[test]
    fn mutation_report_counts_changed_bits(
        individuals in 1usize..40,
        loci in 1usize..40,
        rate in 0.0f64..=1.0,
        mode in arb_mode(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let original = AlleleMatrix::new(individuals, loci);
        let mut alleles = original.clone();
        let report = mutate(&mut alleles, rate, mode, 0.25, &mut rng).unwrap();
        prop_assert_eq!(alleles.count_differences(&original), report.flipped);
        prop_assert!(alleles.trailing_bits_clear());
    }
}

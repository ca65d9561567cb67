use crate::config::AppConfig;
use crate::error::{CoreError, Result};
use crate::network;
use archgen_data::{Architecture, Edge, Locus};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Binomial, StandardNormal};

use super::ArchitectureLogic;

pub fn generate_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Result<Architecture> {
    let mut trait_ids: Vec<usize> = config
        .traits
        .iter()
        .enumerate()
        .flat_map(|(t, tc)| std::iter::repeat(t).take(tc.loci))
        .collect();
    trait_ids.shuffle(rng);

    let loci: Vec<Locus> = trait_ids
        .into_iter()
        .map(|trait_id| {
            let effect: f64 = rng.sample(StandardNormal);
            let dominance: f64 = rng.sample(StandardNormal);
            Locus {
                trait_id,
                effect: effect * config.genetics.effect_sd,
                dominance,
            }
        })
        .collect();

    let mut members = vec![Vec::new(); config.n_traits()];
    for (i, locus) in loci.iter().enumerate() {
        members[locus.trait_id].push(i);
    }

    let mut edges = Vec::with_capacity(config.n_edges());
    for (t, tc) in config.traits.iter().enumerate() {
        if tc.edges == 0 {
            continue;
        }

        let local = preferential_attachment(tc.loci, tc.edges, tc.skew, rng).map_err(|placed| {
            CoreError::EdgeShortfall {
                trait_id: t,
                placed,
                requested: tc.edges,
            }
        })?;

        let first = edges.len();
        for (from, to) in local {
            let weight: f64 = rng.sample(StandardNormal);
            edges.push(Edge {
                from: members[t][from],
                to: members[t][to],
                weight: weight * config.genetics.weight_sd,
            });
        }

        tracing::debug!(
            trait_id = t,
            loci = tc.loci,
            edges = edges.len() - first,
            skew = tc.skew,
            max_degree = network::max_degree(&edges[first..]),
            "Trait network attached"
        );
    }

    let arch = Architecture::new(config.n_traits(), loci, edges);
    arch.check_against(config)?;
    Ok(arch)
}

/// Grows a network of `n` vertices carrying exactly `n_edges` edges by
/// preferential attachment, returning `(older, newer)` local vertex pairs.
///
/// Vertices 0 and 1 are joined first. Every later vertex `i` links to a
/// varying number of distinct earlier vertices picked with probability
/// proportional to `degree^skew`. When there are at least as many edges left
/// as vertices, each vertex gets one edge plus a binomial share of the spare
/// edges, which keeps the network connected; the last vertex takes whatever
/// remains. The count is clamped so that the later vertices can still absorb
/// the rest, and so that it never exceeds the number of earlier vertices.
///
/// On failure, returns the number of edges that could be placed.
pub fn preferential_attachment<R: Rng>(
    n: usize,
    n_edges: usize,
    skew: f64,
    rng: &mut R,
) -> std::result::Result<Vec<(usize, usize)>, usize> {
    if n_edges == 0 {
        return Ok(Vec::new());
    }
    if n < 2 {
        return Err(0);
    }

    let mut edges = Vec::with_capacity(n_edges);
    let mut degrees = vec![0usize; n];
    edges.push((0, 1));
    degrees[0] = 1;
    degrees[1] = 1;
    let mut remaining = n_edges - 1;

    for i in 2..n {
        let left = n - i;
        // Most edges vertices i+1..n can still make, one per earlier vertex
        let future_capacity = n * (n - 1) / 2 - i * (i + 1) / 2;

        let drawn = draw_edge_count(remaining, left, rng);
        let lower = remaining.saturating_sub(future_capacity);
        let upper = i.min(remaining);
        let count = drawn.max(lower).min(upper);

        for v in sample_partners(&degrees[..i], count, skew, rng) {
            edges.push((v, i));
            degrees[v] += 1;
            degrees[i] += 1;
        }
        remaining -= count;
    }

    if remaining > 0 {
        return Err(edges.len());
    }
    Ok(edges)
}

/// Attachment weight of a vertex relative to the best connected candidate,
/// `(degree / top)^skew`, which stays in `[0, 1]` for any finite skew.
fn attachment_weight(degree: usize, top: usize, skew: f64) -> f64 {
    // Isolated vertices only exist in networks sparser than a tree
    let ratio = degree.max(1) as f64 / top as f64;
    // powf is slow and unbiased attachment is the common case
    if skew == 1.0 {
        ratio
    } else {
        ratio.powf(skew)
    }
}

/// Number of edges the current vertex makes, with `left` vertices still to
/// attach including this one.
fn draw_edge_count<R: Rng>(remaining: usize, left: usize, rng: &mut R) -> usize {
    if left <= 1 {
        return remaining;
    }
    let p = 1.0 / left as f64;
    if remaining >= left {
        1 + binomial(remaining - left, p, rng)
    } else {
        binomial(remaining, p, rng)
    }
}

fn binomial<R: Rng>(n: usize, p: f64, rng: &mut R) -> usize {
    if n == 0 {
        return 0;
    }
    // p = 1/left lies in (0, 0.5], always a valid probability
    match Binomial::new(n as u64, p) {
        Ok(dist) => dist.sample(rng) as usize,
        Err(_) => 0,
    }
}

/// Draws `count` distinct vertices with probability proportional to
/// `degree^skew`, removing each one from the pool once picked.
fn sample_partners<R: Rng>(degrees: &[usize], count: usize, skew: f64, rng: &mut R) -> Vec<usize> {
    let mut eligible = vec![true; degrees.len()];
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(top) = degrees
            .iter()
            .zip(&eligible)
            .filter(|&(_, &ok)| ok)
            .map(|(&d, _)| d.max(1))
            .max()
        else {
            break;
        };

        let weights: Vec<f64> = degrees
            .iter()
            .zip(&eligible)
            .map(|(&d, &ok)| if ok { attachment_weight(d, top, skew) } else { 0.0 })
            .collect();

        let v = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // The best connected candidates carry weight 1, so this only
            // happens if the weights are not finite
            Err(_) => {
                let best: Vec<usize> = (0..degrees.len())
                    .filter(|&v| eligible[v] && degrees[v].max(1) == top)
                    .collect();
                match best.choose(rng) {
                    Some(&v) => v,
                    None => break,
                }
            }
        };
        eligible[v] = false;
        chosen.push(v);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn assert_simple(edges: &[(usize, usize)], n: usize) {
        let mut seen = HashSet::new();
        for &(a, b) in edges {
            assert!(a < b, "older vertex {a} should precede {b}");
            assert!(b < n);
            assert!(seen.insert((a, b)), "duplicate edge ({a}, {b})");
        }
    }

    #[test]
    fn test_exact_edge_count_for_sparse_network() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let edges = preferential_attachment(100, 150, 1.0, &mut rng).expect("feasible");
        assert_eq!(edges.len(), 150);
        assert_simple(&edges, 100);
    }

    #[test]
    fn test_tree_gives_every_vertex_one_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let edges = preferential_attachment(20, 19, 1.0, &mut rng).expect("feasible");
        let mut attached: Vec<usize> = edges.iter().map(|&(_, b)| b).collect();
        attached.sort_unstable();
        assert_eq!(attached, (1..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_complete_graph_is_reachable() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let edges = preferential_attachment(6, 15, 1.3, &mut rng).expect("complete graph");
            assert_eq!(edges.len(), 15);
            assert_simple(&edges, 6);
        }
    }

    #[test]
    fn test_too_many_edges_reports_shortfall() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(preferential_attachment(3, 4, 1.0, &mut rng), Err(3));
        assert_eq!(preferential_attachment(1, 1, 1.0, &mut rng), Err(0));
    }

    #[test]
    fn test_fewer_edges_than_vertices() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for skew in [0.0, 1.0, 2.0] {
            let edges = preferential_attachment(30, 5, skew, &mut rng).expect("feasible");
            assert_eq!(edges.len(), 5);
            assert_simple(&edges, 30);
        }
    }

    #[test]
    fn test_zero_edges_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(preferential_attachment(1, 0, 1.0, &mut rng), Ok(Vec::new()));
    }

    #[test]
    fn test_sample_partners_never_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let picked = sample_partners(&[1, 50, 0, 2], 3, 1.0, &mut rng);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(picked.len(), 3);
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_sample_partners_stops_when_pool_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        assert_eq!(sample_partners(&[3, 1], 5, 1.0, &mut rng).len(), 2);
    }

    #[test]
    fn test_attachment_weight_bounded_for_extreme_skew() {
        assert_eq!(attachment_weight(40, 40, 1100.0), 1.0);
        let w = attachment_weight(39, 40, 1100.0);
        assert!((0.0..1.0).contains(&w));
        assert_eq!(attachment_weight(0, 1, 150.0), 1.0);
    }

    #[test]
    fn test_extreme_skew_still_places_every_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for (n, n_edges, skew) in [(10, 30, 1100.0), (200, 2000, 150.0), (50, 49, 1e6)] {
            let edges = preferential_attachment(n, n_edges, skew, &mut rng).expect("feasible");
            assert_eq!(edges.len(), n_edges);
            assert_simple(&edges, n);
        }
    }

    #[test]
    fn test_extreme_skew_builds_hub() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let edges = preferential_attachment(30, 29, 500.0, &mut rng).expect("feasible");
        let mut degrees = [0usize; 30];
        for &(a, b) in &edges {
            degrees[a] += 1;
            degrees[b] += 1;
        }
        let hub_degree = degrees.iter().copied().max().unwrap_or(0);
        assert!(hub_degree >= 25, "hub degree {hub_degree}");
    }
}

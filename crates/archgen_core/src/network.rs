//! Graph views of trait interaction networks.

use archgen_data::{Architecture, Edge};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

/// The interaction network of one trait, edge direction ignored.
pub struct TraitNetwork {
    /// Nodes carry the global locus index, edges the interaction weight.
    pub graph: UnGraph<usize, f64>,
    index: HashMap<usize, NodeIndex>,
}

impl TraitNetwork {
    /// Builds the network of the loci encoding `trait_id`.
    #[must_use]
    pub fn build(arch: &Architecture, trait_id: usize) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index = HashMap::new();
        for locus in arch.loci_of_trait(trait_id) {
            index.insert(locus, graph.add_node(locus));
        }
        for edge in &arch.edges {
            if let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) {
                graph.add_edge(a, b, edge.weight);
            }
        }
        Self { graph, index }
    }

    #[must_use]
    pub fn n_vertices(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Degree of a locus, or `None` if it does not encode this trait.
    #[must_use]
    pub fn degree(&self, locus: usize) -> Option<usize> {
        self.index
            .get(&locus)
            .map(|&n| self.graph.neighbors(n).count())
    }

    /// Degrees sorted in decreasing order.
    #[must_use]
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors(n).count())
            .collect();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        degrees
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) <= 1
    }

    /// Whether some pair of loci is joined more than once, in either direction.
    #[must_use]
    pub fn has_parallel_edges(&self) -> bool {
        let mut seen = HashSet::new();
        self.graph.edge_indices().any(|e| {
            self.graph
                .edge_endpoints(e)
                .is_some_and(|(a, b)| !seen.insert((a.min(b), a.max(b))))
        })
    }
}

/// Highest number of edges touching a single locus.
#[must_use]
pub fn max_degree(edges: &[Edge]) -> usize {
    let mut degrees: HashMap<usize, usize> = HashMap::new();
    for edge in edges {
        *degrees.entry(edge.from).or_default() += 1;
        *degrees.entry(edge.to).or_default() += 1;
    }
    degrees.into_values().max().unwrap_or(0)
}

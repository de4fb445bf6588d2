//! Synthetic graph generation
//!
//! Generators produce `(source, target)` index pairs over `0..node_count`.
//! Turning those pairs into real nodes and relationships is left to a
//! materializer on the host side.

use crate::error::{AlgoError, AlgoResult};
use rand::{Rng, RngCore};
use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, info};

/// Produces the edge set of a synthetic graph
pub trait RelationshipGenerator {
    fn node_count(&self) -> usize;

    fn generate_edges_with(&self, rng: &mut dyn RngCore) -> Vec<(usize, usize)>;

    fn generate_edges(&self) -> Vec<(usize, usize)> {
        self.generate_edges_with(&mut rand::thread_rng())
    }
}

/// Watts-Strogatz small-world parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WattsStrogatzConfig {
    pub node_count: usize,
    /// Mean degree k: each node starts linked to k/2 neighbors on each side
    pub mean_degree: usize,
    /// Rewiring probability
    pub beta: f64,
}

impl Default for WattsStrogatzConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            mean_degree: 4,
            beta: 0.5,
        }
    }
}

impl WattsStrogatzConfig {
    pub fn new(node_count: usize, mean_degree: usize, beta: f64) -> Self {
        Self {
            node_count,
            mean_degree,
            beta,
        }
    }

    pub fn validate(&self) -> AlgoResult<()> {
        let invalid = |msg: String| Err(AlgoError::InvalidConfig(msg));

        if self.node_count == 0 {
            return invalid("node count must be positive".to_string());
        }
        if self.mean_degree < 2 || self.mean_degree % 2 != 0 {
            return invalid(format!(
                "mean degree must be an even number >= 2, got {}",
                self.mean_degree
            ));
        }
        if self.mean_degree >= self.node_count {
            return invalid(format!(
                "mean degree {} must be below node count {}",
                self.mean_degree, self.node_count
            ));
        }
        if !self.beta.is_finite() || !(0.0..=1.0).contains(&self.beta) {
            return invalid(format!("beta must be within [0, 1], got {}", self.beta));
        }
        Ok(())
    }

    /// Number of edges every valid configuration yields
    pub fn edge_count(&self) -> usize {
        self.node_count * self.mean_degree / 2
    }
}

/// Ring lattice with random rewiring.
///
/// Always yields exactly `N * k / 2` edges with no self-loops and no two
/// edges joining the same pair of nodes, in either direction.
#[derive(Debug, Clone)]
pub struct WattsStrogatzGenerator {
    config: WattsStrogatzConfig,
}

impl WattsStrogatzGenerator {
    pub fn new(config: WattsStrogatzConfig) -> AlgoResult<Self> {
        config.validate()?;
        Ok(WattsStrogatzGenerator { config })
    }

    pub fn config(&self) -> &WattsStrogatzConfig {
        &self.config
    }

    /// Generate with a caller-supplied RNG, e.g. a seeded `StdRng` for reproducible graphs
    pub fn generate_edges_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(usize, usize)> {
        let started = Instant::now();
        let n = self.config.node_count;
        let half = self.config.mean_degree / 2;

        // 1. Ring lattice
        let mut edges = Vec::with_capacity(n * half);
        let mut neighbors: Vec<FxHashSet<usize>> = (0..n)
            .map(|_| FxHashSet::with_capacity_and_hasher(self.config.mean_degree, Default::default()))
            .collect();
        for source in 0..n {
            for offset in 1..=half {
                let target = (source + offset) % n;
                edges.push((source, target));
                neighbors[source].insert(target);
                neighbors[target].insert(source);
            }
        }

        // 2. Rewire
        let mut rewired = 0usize;
        if self.config.beta > 0.0 {
            for edge in edges.iter_mut() {
                if !rng.gen_bool(self.config.beta) {
                    continue;
                }
                let (source, target) = *edge;
                let Some(new_target) = pick_unconnected(&neighbors[source], source, n, rng) else {
                    continue;
                };

                neighbors[source].remove(&target);
                neighbors[target].remove(&source);
                neighbors[source].insert(new_target);
                neighbors[new_target].insert(source);
                *edge = (source, new_target);
                rewired += 1;
            }
        }

        debug!("Rewired {} of {} lattice edges", rewired, edges.len());
        info!(
            "Generated Watts-Strogatz graph: {} nodes, {} edges in {:?}",
            n,
            edges.len(),
            started.elapsed()
        );
        edges
    }
}

impl RelationshipGenerator for WattsStrogatzGenerator {
    fn node_count(&self) -> usize {
        self.config.node_count
    }

    fn generate_edges_with(&self, rng: &mut dyn RngCore) -> Vec<(usize, usize)> {
        self.generate_edges_with_rng(rng)
    }
}

/// Uniformly pick a node that is neither `source` nor one of its neighbors.
/// `None` when the source is already linked to every other node.
fn pick_unconnected<R: Rng + ?Sized>(
    connected: &FxHashSet<usize>,
    source: usize,
    n: usize,
    rng: &mut R,
) -> Option<usize> {
    let candidates = n - 1 - connected.len();
    if candidates == 0 {
        return None;
    }

    if candidates * 4 >= n {
        // Dense enough for rejection sampling
        loop {
            let c = rng.gen_range(0..n);
            if c != source && !connected.contains(&c) {
                return Some(c);
            }
        }
    }

    let pool: Vec<usize> = (0..n)
        .filter(|&c| c != source && !connected.contains(&c))
        .collect();
    Some(pool[rng.gen_range(0..pool.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_simple(edges: &[(usize, usize)]) {
        let mut pairs = FxHashSet::default();
        for &(s, t) in edges {
            assert_ne!(s, t, "self-loop on {}", s);
            assert!(pairs.insert((s.min(t), s.max(t))), "duplicate pair {:?}", (s, t));
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        for (n, k, beta) in [
            (10, 3, 0.5),
            (10, 0, 0.5),
            (10, 10, 0.5),
            (4, 6, 0.5),
            (0, 2, 0.5),
            (10, 4, 1.5),
            (10, 4, -0.1),
            (10, 4, f64::NAN),
        ] {
            let result = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(n, k, beta));
            assert!(
                matches!(result, Err(AlgoError::InvalidConfig(_))),
                "accepted n={} k={} beta={}",
                n,
                k,
                beta
            );
        }
    }

    #[test]
    fn test_zero_beta_is_ring_lattice() {
        let generator = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(6, 4, 0.0)).unwrap();
        let edges = generator.generate_edges();
        assert_eq!(
            edges,
            vec![
                (0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (2, 4),
                (3, 4), (3, 5), (4, 5), (4, 0), (5, 0), (5, 1),
            ]
        );
    }

    #[test]
    fn test_edge_count_matches_original_matrix() {
        let mut rng = StdRng::seed_from_u64(7);
        for (n, k, beta) in [(100, 4, 0.1), (100, 6, 0.85), (100, 8, 0.5), (100, 10, 0.5), (1000, 50, 0.5)] {
            let config = WattsStrogatzConfig::new(n, k, beta);
            let generator = WattsStrogatzGenerator::new(config.clone()).unwrap();
            let edges = generator.generate_edges_with_rng(&mut rng);
            assert_eq!(edges.len(), config.edge_count());
            assert_eq!(edges.len(), n * k / 2);
            assert_simple(&edges);
        }
    }

    #[test]
    fn test_complete_lattice_cannot_rewire() {
        // Every node already touches all others, so nothing can move
        let generator = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(5, 4, 1.0)).unwrap();
        let lattice = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(5, 4, 0.0))
            .unwrap()
            .generate_edges();
        assert_eq!(generator.generate_edges(), lattice);
    }

    #[test]
    fn test_full_rewiring_spreads_targets() {
        let n = 200;
        let generator = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(n, 4, 1.0)).unwrap();
        let edges = generator.generate_edges_with_rng(&mut StdRng::seed_from_u64(42));
        assert_eq!(edges.len(), 400);
        assert_simple(&edges);

        let on_ring = edges
            .iter()
            .filter(|&&(s, t)| {
                let gap = (t + n - s) % n;
                gap == 1 || gap == 2
            })
            .count();
        assert!(on_ring < 80, "{} edges still on the ring", on_ring);

        let mut quarters = [0usize; 4];
        for &(_, t) in &edges {
            quarters[t * 4 / n] += 1;
        }
        assert!(quarters.iter().all(|&q| (60..=140).contains(&q)), "{:?}", quarters);

        let degree_sum: usize = {
            let mut degree = vec![0usize; n];
            for &(s, t) in &edges {
                degree[s] += 1;
                degree[t] += 1;
            }
            degree.iter().sum()
        };
        assert_eq!(degree_sum, n * 4);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = WattsStrogatzGenerator::new(WattsStrogatzConfig::new(50, 6, 0.3)).unwrap();
        let a = generator.generate_edges_with_rng(&mut StdRng::seed_from_u64(1));
        let b = generator.generate_edges_with_rng(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(generator.node_count(), 50);
    }

    #[test]
    #[ignore]
    fn test_large_graph_generation() {
        let generator =
            WattsStrogatzGenerator::new(WattsStrogatzConfig::new(1_000_000, 10, 0.5)).unwrap();
        assert_eq!(generator.generate_edges().len(), 5_000_000);
    }
}

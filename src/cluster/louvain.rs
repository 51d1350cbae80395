//! Louvain modularity optimization
//!
//! Two phases repeat until a local phase moves no node:
//!
//! 1. **Local moving**: every node starts in its own community and is moved
//!    to the neighboring community with the highest positive modularity
//!    gain. Passes over all nodes continue until none moves.
//! 2. **Aggregation**: each community is contracted into a super-node whose
//!    self-loop carries the internal weight; parallel edges between
//!    communities are summed.
//!
//! The gain of inserting an isolated node `i` into community `C` is
//! `k_i,in / m - γ · Σ_tot · k_i / (2m²)`, where `k_i,in` is the weight from
//! `i` into `C`, `Σ_tot` the total degree of `C`, and `m` the total edge weight.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::cluster::Communities;
use crate::error::{SplitError, SplitResult};
use crate::graph::CompressedGraph;

/// Gains below this are treated as ties with the current community
const GAIN_EPSILON: f64 = 1e-12;

/// Louvain community detector
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma)
    resolution: f64,

    /// A local phase improving modularity by less than this ends its passes
    min_modularity_gain: f64,

    /// Seed for shuffling the node-visit order; `None` visits in id order
    seed: Option<u64>,
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl Louvain {
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            min_modularity_gain: 1e-7,
            seed: None,
        }
    }

    /// Set resolution parameter. Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_min_modularity_gain(mut self, min_gain: f64) -> Self {
        self.min_modularity_gain = min_gain;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Assign a community label to every node of `graph`
    pub fn detect(&self, graph: &CompressedGraph) -> SplitResult<Communities> {
        let n = graph.node_count;
        if n == 0 {
            return Err(SplitError::EmptyGraph);
        }

        let mut rng = self.seed.map(StdRng::seed_from_u64);
        let mut level = LevelGraph::from_compressed(graph);
        // Super-node holding each original node at the current level
        let mut membership: Vec<usize> = (0..n).collect();
        let mut depth = 0;

        loop {
            let mut order: Vec<usize> = (0..level.node_count()).collect();
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }

            let (communities, moved) = self.local_phase(&level, &order);
            if !moved {
                break;
            }

            let (next, renumber) = level.aggregate(&communities);
            for super_node in membership.iter_mut() {
                *super_node = renumber[communities[*super_node]];
            }

            depth += 1;
            log::debug!(
                "Louvain level {}: {} nodes contracted into {} communities",
                depth,
                level.node_count(),
                next.node_count()
            );
            level = next;
        }

        let labels: Vec<u32> = membership.into_iter().map(|c| c as u32).collect();
        let communities = Communities::new(labels);

        log::info!(
            "Louvain found {} communities after {} aggregation levels",
            communities.community_count(),
            depth
        );

        Ok(communities)
    }

    /// Phase 1 on one level. Returns (community per node, whether any node moved).
    fn local_phase(&self, level: &LevelGraph, order: &[usize]) -> (Vec<usize>, bool) {
        let n = level.node_count();
        let mut communities: Vec<usize> = (0..n).collect();

        let m = level.total_weight;
        if m == 0.0 {
            return (communities, false);
        }

        let mut community_degrees = level.degrees.clone();
        let mut any_moved = false;
        let mut modularity = level.modularity(&communities, self.resolution);

        loop {
            let mut moved = false;

            for &node in order {
                let current = communities[node];
                let ki = level.degrees[node];

                // Weight from node into each neighboring community, by ascending id
                let mut community_weights: BTreeMap<usize, f64> = BTreeMap::new();
                for &(neighbor, w) in &level.adjacency[node] {
                    *community_weights.entry(communities[neighbor]).or_insert(0.0) += w;
                }

                // Take node out of its community
                community_degrees[current] -= ki;

                let gain = |community: usize, ki_in: f64| {
                    ki_in - self.resolution * community_degrees[community] * ki / (2.0 * m)
                };

                let mut best_community = current;
                let mut best_gain = gain(
                    current,
                    community_weights.get(&current).copied().unwrap_or(0.0),
                );

                for (&candidate, &ki_in) in &community_weights {
                    let candidate_gain = gain(candidate, ki_in);
                    if candidate_gain > best_gain + GAIN_EPSILON {
                        best_gain = candidate_gain;
                        best_community = candidate;
                    }
                }

                community_degrees[best_community] += ki;
                if best_community != current {
                    communities[node] = best_community;
                    moved = true;
                    any_moved = true;
                }
            }

            if !moved {
                break;
            }

            let updated = level.modularity(&communities, self.resolution);
            if updated - modularity < self.min_modularity_gain {
                break;
            }
            modularity = updated;
        }

        (communities, any_moved)
    }
}

/// Weighted undirected graph at one aggregation level
struct LevelGraph {
    /// Neighbors and edge weights, self-loops excluded
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Self-loop weight per node
    self_loops: Vec<f64>,

    /// Weighted degree; a self-loop counts twice
    degrees: Vec<f64>,

    /// Total edge weight `m`
    total_weight: f64,
}

impl LevelGraph {
    fn from_parts(adjacency: Vec<Vec<(usize, f64)>>, self_loops: Vec<f64>) -> Self {
        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&self_loops)
            .map(|(neighbors, &sl)| neighbors.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * sl)
            .collect();
        let total_weight = degrees.iter().sum::<f64>() / 2.0;

        Self {
            adjacency,
            self_loops,
            degrees,
            total_weight,
        }
    }

    /// Unit-weight level built from the adapted graph
    fn from_compressed(graph: &CompressedGraph) -> Self {
        let n = graph.node_count;
        let mut adjacency = vec![Vec::new(); n];
        let mut self_loops = vec![0.0; n];

        for (node, neighbors) in adjacency.iter_mut().enumerate() {
            for &neighbor in graph.neighbors(node) {
                let neighbor = neighbor as usize;
                if neighbor == node {
                    self_loops[node] += 1.0;
                } else {
                    neighbors.push((neighbor, 1.0));
                }
            }
        }

        Self::from_parts(adjacency, self_loops)
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// `Q = Σ_c [ in_c / m - γ (tot_c / 2m)² ]`
    fn modularity(&self, communities: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight;
        if m == 0.0 {
            return 0.0;
        }

        let n = self.node_count();
        let mut internal = vec![0.0; n];
        let mut totals = vec![0.0; n];

        for node in 0..n {
            let c = communities[node];
            totals[c] += self.degrees[node];
            internal[c] += self.self_loops[node];
            for &(neighbor, w) in &self.adjacency[node] {
                // Each internal edge is seen from both ends
                if communities[neighbor] == c {
                    internal[c] += w / 2.0;
                }
            }
        }

        internal
            .iter()
            .zip(&totals)
            .map(|(&inc, &tot)| inc / m - resolution * (tot / (2.0 * m)).powi(2))
            .sum()
    }

    /// Phase 2: contract communities into super-nodes.
    /// Returns the next level and the map from community id to super-node id.
    fn aggregate(&self, communities: &[usize]) -> (LevelGraph, Vec<usize>) {
        let n = self.node_count();

        // Super-nodes are numbered by first appearance in node order
        let mut renumber = vec![usize::MAX; n];
        let mut next_id = 0;
        for &c in communities {
            if renumber[c] == usize::MAX {
                renumber[c] = next_id;
                next_id += 1;
            }
        }

        let mut self_loops = vec![0.0; next_id];
        let mut weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();

        for node in 0..n {
            let cu = renumber[communities[node]];
            self_loops[cu] += self.self_loops[node];

            for &(neighbor, w) in &self.adjacency[node] {
                // Visit each undirected edge once
                if neighbor < node {
                    continue;
                }
                let cv = renumber[communities[neighbor]];
                if cu == cv {
                    self_loops[cu] += w;
                } else {
                    let key = if cu < cv { (cu, cv) } else { (cv, cu) };
                    *weights.entry(key).or_insert(0.0) += w;
                }
            }
        }

        let mut adjacency = vec![Vec::new(); next_id];
        for ((a, b), w) in weights {
            adjacency[a].push((b, w));
            adjacency[b].push((a, w));
        }

        (LevelGraph::from_parts(adjacency, self_loops), renumber)
    }
}

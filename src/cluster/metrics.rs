//! Partition quality metrics

use std::collections::{HashMap, HashSet};

use crate::graph::CompressedGraph;

/// Modularity of a labelling of `graph` (unit edge weights)
pub fn modularity(graph: &CompressedGraph, labels: &[u32], resolution: f64) -> f64 {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let mut internal: HashMap<u32, f64> = HashMap::new();
    let mut totals: HashMap<u32, f64> = HashMap::new();

    for (u, v) in graph.undirected_edges() {
        let (cu, cv) = (labels[u as usize], labels[v as usize]);
        if u == v {
            *totals.entry(cu).or_insert(0.0) += 2.0;
        } else {
            *totals.entry(cu).or_insert(0.0) += 1.0;
            *totals.entry(cv).or_insert(0.0) += 1.0;
        }
        if cu == cv {
            *internal.entry(cu).or_insert(0.0) += 1.0;
        }
    }

    totals
        .iter()
        .map(|(label, &tot)| {
            let inc = internal.get(label).copied().unwrap_or(0.0);
            inc / m - resolution * (tot / (2.0 * m)).powi(2)
        })
        .sum()
}

/// Density (actual edges / potential edges) among `members`, self-loops ignored
pub fn intra_density(graph: &CompressedGraph, members: &[u32]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;
    let member_set: HashSet<u32> = members.iter().copied().collect();

    let mut actual_edges = 0;
    for &src in members {
        for &dst in graph.neighbors(src as usize) {
            // Count each undirected edge from its smaller endpoint
            if dst > src && member_set.contains(&dst) {
                actual_edges += 1;
            }
        }
    }

    actual_edges as f32 / potential_edges as f32
}

/// Number of edges with both endpoints in `members`, self-loops included
pub fn intra_edges(graph: &CompressedGraph, members: &[u32]) -> usize {
    let member_set: HashSet<u32> = members.iter().copied().collect();
    members
        .iter()
        .map(|&src| {
            graph
                .neighbors(src as usize)
                .iter()
                .filter(|&&dst| dst >= src && member_set.contains(&dst))
                .count()
        })
        .sum()
}

/// Number of edges whose endpoints have different owners
pub fn cut_edges(graph: &CompressedGraph, owner: &[u32]) -> usize {
    graph
        .undirected_edges()
        .filter(|&(u, v)| owner[u as usize] != owner[v as usize])
        .count()
}

//! Compressed sparse adjacency for undirected graphs

use serde::{Deserialize, Serialize};

/// Compressed sparse representation of an undirected graph.
///
/// Every non-loop edge `{u, v}` is stored twice (in `u`'s and in `v`'s list);
/// a self-loop is stored once. Adjacency lists are sorted and duplicate-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated, sorted neighbor lists
    pub edges: Vec<u32>,

    /// Position of each node in the source graph
    pub index_orig: Vec<u32>,
}

impl CompressedGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
            index_orig: Vec::with_capacity(node_count),
        }
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if `u` and `v` are adjacent
    pub fn has_edge(&self, u: usize, v: u32) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Number of distinct neighbors, a self-loop counting once
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    pub fn has_self_loop(&self, node: usize) -> bool {
        self.has_edge(node, node as u32)
    }

    /// Number of undirected edges, self-loops included
    pub fn edge_count(&self) -> usize {
        let self_loops = (0..self.node_count)
            .filter(|&node| self.has_self_loop(node))
            .count();
        (self.edges.len() + self_loops) / 2
    }

    /// Iterate each undirected edge once as `(u, v)` with `u <= v`
    pub fn undirected_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.node_count).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .filter(move |&&v| v as usize >= u)
                .map(move |&v| (u as u32, v))
        })
    }
}

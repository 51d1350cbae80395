//! Graph construction module

use crate::error::SplitResult;
use crate::graph::{AttributedGraph, CompressedGraph};

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a builder for nodes `0..node_count`
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Add an undirected edge; both directions are recorded
    pub fn add_edge(&mut self, u: u32, v: u32) {
        self.adjacency_lists[u as usize].push(v);
        if u != v {
            self.adjacency_lists[v as usize].push(u);
        }
    }

    /// Build the compressed graph, collapsing duplicate edges
    pub fn build(mut self) -> CompressedGraph {
        for list in &mut self.adjacency_lists {
            // Sort for binary search efficiency
            list.sort_unstable();
            list.dedup();
        }

        let edge_count: usize = self.adjacency_lists.iter().map(|list| list.len()).sum();
        let mut graph = CompressedGraph::with_capacity(self.node_count, edge_count);

        graph.offsets.push(0);
        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            graph.offsets.push(offset);
            graph.edges.extend_from_slice(list);
        }

        graph.index_orig = (0..self.node_count as u32).collect();

        graph
    }
}

/// Convert an attributed graph into its undirected adjacency form.
///
/// Each node is tagged with its position in `graph` as original index.
pub fn adapt(graph: &AttributedGraph) -> SplitResult<CompressedGraph> {
    graph.validate()?;

    let mut builder = GraphBuilder::with_capacity(graph.node_count());
    for &(u, v) in &graph.edges {
        builder.add_edge(u, v);
    }
    let compressed = builder.build();

    log::info!(
        "Adapted graph with {} nodes and {} undirected edges ({} input edges)",
        compressed.node_count,
        compressed.edge_count(),
        graph.edges.len()
    );

    Ok(compressed)
}

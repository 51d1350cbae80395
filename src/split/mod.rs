//! Partition-and-assign pipeline
//!
//! adapt -> Louvain -> normalize -> assign -> induced subgraphs

pub mod assign;
pub mod report;
pub mod subgraph;

use std::fmt;

use crate::cluster::{metrics, normalize, normalize::size_threshold, Communities, Louvain};
use crate::config::SplitterConfig;
use crate::error::{SplitError, SplitResult};
use crate::graph::{adapt, AttributedGraph, CompressedGraph};

pub use assign::{assign, client_capacity, ParticipantAssignment};
pub use report::{ClientStats, SplitReport};
pub use subgraph::{Subgraph, Subgraphs};

/// Splits one graph into per-client shards along Louvain communities
#[derive(Debug, Clone)]
pub struct LouvainSplitter {
    config: SplitterConfig,
}

/// Everything computed before subgraph extraction
#[derive(Debug, Clone)]
pub struct Partition {
    pub adjacency: CompressedGraph,
    pub communities: Communities,
    pub cluster_count: usize,
    pub assignment: ParticipantAssignment,
}

impl Partition {
    /// Modularity of the detected communities
    pub fn modularity(&self, resolution: f64) -> f64 {
        metrics::modularity(&self.adjacency, self.communities.labels(), resolution)
    }

    /// Edges dropped because their endpoints went to different clients
    pub fn cut_edges(&self) -> usize {
        let owners = self.assignment.owners(self.adjacency.node_count);
        metrics::cut_edges(&self.adjacency, &owners)
    }

    /// Extract each client's induced subgraph, lazily and in client order
    pub fn into_subgraphs(self, graph: &AttributedGraph) -> Subgraphs<'_> {
        Subgraphs::new(graph, self.adjacency, self.assignment)
    }
}

impl LouvainSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    fn detector(&self) -> Louvain {
        Louvain::new()
            .with_resolution(self.config.resolution)
            .with_min_modularity_gain(self.config.min_modularity_gain)
            .with_seed(self.config.seed)
    }

    /// Run every stage up to client assignment
    pub fn partition(&self, graph: &AttributedGraph) -> SplitResult<Partition> {
        let num_clients = self.config.num_clients;
        let delta = self.config.delta;

        let adjacency = adapt(graph)?;
        if adjacency.node_count == 0 {
            return Err(SplitError::EmptyGraph);
        }
        // Reject bad balance parameters before the expensive detection
        size_threshold(adjacency.node_count, num_clients, delta)?;

        let communities = self.detector().detect(&adjacency)?;
        let clusters = normalize(&communities, num_clients, delta)?;
        let cluster_count = clusters.len();
        let assignment = assign(clusters, num_clients, delta)?;

        Ok(Partition {
            adjacency,
            communities,
            cluster_count,
            assignment,
        })
    }

    /// Split `graph` into one induced subgraph per client
    pub fn split<'g>(&self, graph: &'g AttributedGraph) -> SplitResult<Subgraphs<'g>> {
        Ok(self.partition(graph)?.into_subgraphs(graph))
    }
}

impl fmt::Display for LouvainSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LouvainSplitter({})", self.config.num_clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Label, NodeAttributes};

    fn unit_nodes(n: usize) -> Vec<NodeAttributes> {
        (0..n)
            .map(|i| NodeAttributes::new(vec![i as f32], Label::Class(0)))
            .collect()
    }

    #[test]
    fn test_display() {
        let splitter = LouvainSplitter::new(SplitterConfig::new(4, 2));
        assert_eq!(splitter.to_string(), "LouvainSplitter(4)");
    }

    #[test]
    fn test_empty_graph_rejected() {
        let graph = AttributedGraph::default();
        let splitter = LouvainSplitter::new(SplitterConfig::new(2, 0));
        assert!(matches!(splitter.split(&graph), Err(SplitError::EmptyGraph)));
    }

    #[test]
    fn test_balance_checked_before_detection() {
        let graph = AttributedGraph::new(unit_nodes(6), vec![(0, 1)]);
        let splitter = LouvainSplitter::new(SplitterConfig::new(3, 2));
        assert!(matches!(
            splitter.partition(&graph),
            Err(SplitError::InvalidBalanceParameters { .. })
        ));
    }

    #[test]
    fn test_partition_reports_cut_edges() {
        // Two triangles joined by one bridge
        let edges = vec![(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)];
        let graph = AttributedGraph::new(unit_nodes(6), edges);
        let splitter = LouvainSplitter::new(SplitterConfig::new(2, 0));

        let partition = splitter.partition(&graph).unwrap();

        assert_eq!(partition.communities.community_count(), 2);
        assert_eq!(partition.cluster_count, 2);
        assert_eq!(partition.cut_edges(), 1);
        assert!(partition.modularity(1.0) > 0.3);
    }

    #[test]
    fn test_config_knobs_reach_detector() {
        let config = SplitterConfig::new(2, 0)
            .with_resolution(50.0)
            .with_min_modularity_gain(0.5)
            .with_seed(Some(3));
        let detector = LouvainSplitter::new(config).detector();

        assert_eq!(
            format!("{:?}", detector),
            "Louvain { resolution: 50.0, min_modularity_gain: 0.5, seed: Some(3) }"
        );
    }

    #[test]
    fn test_resolution_changes_partition() {
        // Two 5-cliques joined by one bridge
        let mut edges = Vec::new();
        for base in [0u32, 5] {
            for u in base..base + 5 {
                for v in (u + 1)..base + 5 {
                    edges.push((u, v));
                }
            }
        }
        edges.push((4, 5));
        let graph = AttributedGraph::new(unit_nodes(10), edges);

        let standard = LouvainSplitter::new(SplitterConfig::new(2, 0))
            .partition(&graph)
            .unwrap();
        let fine = LouvainSplitter::new(SplitterConfig::new(2, 0).with_resolution(50.0))
            .partition(&graph)
            .unwrap();

        assert_eq!(standard.communities.community_count(), 2);
        // No node gains by joining a neighbor at this resolution
        assert_eq!(fine.communities.community_count(), 10);
        assert_eq!(fine.cluster_count, 10);
    }
}

//! Summary statistics of a finished split

use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::cluster::metrics;
use crate::config::SplitterConfig;
use crate::graph::{AttributedGraph, CompressedGraph, NodeAttributes};
use crate::split::{LouvainSplitter, Partition};

/// Per-client shard statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientStats {
    pub client: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub train_count: usize,
    pub val_count: usize,
    pub test_count: usize,

    /// Non-loop edges / potential edges
    pub density: f32,
}

impl ClientStats {
    /// Statistics of the subgraph induced by `members`
    pub fn from_members(
        client: usize,
        graph: &AttributedGraph,
        adjacency: &CompressedGraph,
        members: &[u32],
    ) -> Self {
        let count = |flag: fn(&NodeAttributes) -> bool| {
            members
                .iter()
                .filter(|&&node| flag(&graph.nodes[node as usize]))
                .count()
        };

        Self {
            client,
            node_count: members.len(),
            edge_count: metrics::intra_edges(adjacency, members),
            train_count: count(|node| node.train_mask),
            val_count: count(|node| node.val_mask),
            test_count: count(|node| node.test_mask),
            density: metrics::intra_density(adjacency, members),
        }
    }
}

/// Whole-split summary written next to the shards
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub splitter: String,
    pub config: SplitterConfig,
    pub node_count: usize,
    pub edge_count: usize,
    pub community_count: usize,
    pub cluster_count: usize,
    pub modularity: f64,
    pub capacity: usize,
    pub overflow_client: Option<usize>,

    /// Nodes the overflow client holds beyond capacity
    pub overflow_excess: usize,

    /// Edges lost because their endpoints went to different clients
    pub cut_edges: usize,

    pub size_mean: f64,
    pub size_std_dev: f64,
    pub clients: Vec<ClientStats>,
}

impl SplitReport {
    /// Summarize a partition of `graph`. Must be called before the partition is consumed.
    pub fn new(splitter: &LouvainSplitter, partition: &Partition, graph: &AttributedGraph) -> Self {
        let config = splitter.config().clone();
        let assignment = &partition.assignment;
        let sizes: Vec<f64> = assignment
            .sizes()
            .into_iter()
            .map(|size| size as f64)
            .collect();

        let clients: Vec<ClientStats> = assignment
            .clients()
            .par_iter()
            .enumerate()
            .map(|(client, members)| {
                ClientStats::from_members(client, graph, &partition.adjacency, members)
            })
            .collect();

        Self {
            splitter: splitter.to_string(),
            modularity: partition.modularity(config.resolution),
            config,
            node_count: partition.adjacency.node_count,
            edge_count: partition.adjacency.edge_count(),
            community_count: partition.communities.community_count(),
            cluster_count: partition.cluster_count,
            capacity: assignment.capacity(),
            overflow_client: assignment.overflow_client(),
            overflow_excess: assignment.overflow_excess(),
            cut_edges: partition.cut_edges(),
            size_mean: sizes.iter().mean(),
            size_std_dev: sizes.iter().population_std_dev(),
            clients,
        }
    }
}

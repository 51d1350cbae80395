//! Induced subgraph extraction per client

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::graph::{AttributedGraph, CompressedGraph, NodeAttributes};
use crate::split::assign::ParticipantAssignment;

/// Marks a node outside the client currently being extracted
const NOT_LOCAL: u32 = u32::MAX;

/// One client's shard: the subgraph induced by its assigned nodes.
///
/// Local node `i` carries `nodes[i]` and came from source node `index_orig[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    /// Client index this shard belongs to
    pub client: usize,

    pub nodes: Vec<NodeAttributes>,

    /// Position of each local node in the source graph
    pub index_orig: Vec<u32>,

    /// Undirected edges over local ids, each once as `(u, v)` with `u <= v`
    pub edges: Vec<(u32, u32)>,
}

impl Subgraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges listed in both directions (self-loops once), as message passing expects
    pub fn edge_index(&self) -> Vec<(u32, u32)> {
        let mut index = Vec::with_capacity(self.edges.len() * 2);
        for &(u, v) in &self.edges {
            index.push((u, v));
            if u != v {
                index.push((v, u));
            }
        }
        index.sort_unstable();
        index
    }

    pub fn features(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.nodes.iter().map(|node| node.x.as_slice())
    }

    pub fn train_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.train_mask).count()
    }

    pub fn val_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.val_mask).count()
    }

    pub fn test_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.test_mask).count()
    }
}

/// Lazily builds one [`Subgraph`] per client, in client order
pub struct Subgraphs<'g> {
    nodes: &'g [NodeAttributes],
    adjacency: CompressedGraph,
    clients: std::iter::Enumerate<std::vec::IntoIter<Vec<u32>>>,
    /// Source node id -> local id for the client in progress
    local: Vec<u32>,
}

impl<'g> Subgraphs<'g> {
    pub fn new(
        graph: &'g AttributedGraph,
        adjacency: CompressedGraph,
        assignment: ParticipantAssignment,
    ) -> Self {
        let local = vec![NOT_LOCAL; adjacency.node_count];
        Self {
            nodes: &graph.nodes,
            adjacency,
            clients: assignment.into_clients().into_iter().enumerate(),
            local,
        }
    }

    fn extract(&mut self, client: usize, mut members: Vec<u32>) -> Subgraph {
        // Local ids follow source order
        members.sort_unstable();
        for (local_id, &node) in members.iter().enumerate() {
            self.local[node as usize] = local_id as u32;
        }

        let mut edges = Vec::new();
        for (local_u, &u) in members.iter().enumerate() {
            for &v in self.adjacency.neighbors(u as usize) {
                // Only include edges where both endpoints are in the shard
                if v < u {
                    continue;
                }
                let local_v = self.local[v as usize];
                if local_v != NOT_LOCAL {
                    edges.push((local_u as u32, local_v));
                }
            }
        }

        let nodes = members
            .iter()
            .map(|&node| self.nodes[node as usize].clone())
            .collect();
        let index_orig = members
            .iter()
            .map(|&node| self.adjacency.index_orig[node as usize])
            .collect();

        for &node in &members {
            self.local[node as usize] = NOT_LOCAL;
        }

        Subgraph {
            client,
            nodes,
            index_orig,
            edges,
        }
    }
}

impl Iterator for Subgraphs<'_> {
    type Item = Subgraph;

    fn next(&mut self) -> Option<Subgraph> {
        let (client, members) = self.clients.next()?;
        let subgraph = self.extract(client, members);

        log::debug!(
            "Client {}: {} nodes, {} edges",
            client,
            subgraph.node_count(),
            subgraph.edge_count()
        );

        Some(subgraph)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.clients.size_hint()
    }
}

impl ExactSizeIterator for Subgraphs<'_> {}

impl FusedIterator for Subgraphs<'_> {}

//! Seeded planted-partition graphs for experiments without a dataset

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::graph::{AttributedGraph, Label, NodeAttributes};

/// Stochastic block model with equally sized blocks
#[derive(Debug, Clone)]
pub struct PlantedPartition {
    pub blocks: usize,
    pub block_size: usize,

    /// Edge probability inside a block
    pub p_in: f64,

    /// Edge probability between blocks
    pub p_out: f64,

    pub feature_dim: usize,
    pub seed: u64,
}

impl Default for PlantedPartition {
    fn default() -> Self {
        Self {
            blocks: 10,
            block_size: 50,
            p_in: 0.3,
            p_out: 0.01,
            feature_dim: 16,
            seed: 0,
        }
    }
}

impl PlantedPartition {
    /// Generate the graph. Node `i` belongs to block `i / block_size`, which is
    /// also its class label; masks split nodes 60/20/20 into train/val/test.
    pub fn generate(&self) -> Result<AttributedGraph> {
        ensure!(
            (0.0..=1.0).contains(&self.p_in) && (0.0..=1.0).contains(&self.p_out),
            "edge probabilities must lie in [0, 1], got p_in={} p_out={}",
            self.p_in,
            self.p_out
        );

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.blocks * self.block_size;
        let block_of = |node: usize| node / self.block_size.max(1);

        let mut nodes: Vec<NodeAttributes> = (0..n)
            .map(|node| {
                let block = block_of(node);
                // Uniform noise plus a bump on the block's own feature column
                let x = (0..self.feature_dim)
                    .map(|j| {
                        let bump = if j % self.blocks == block { 1.0 } else { 0.0 };
                        rng.gen::<f32>() + bump
                    })
                    .collect();
                NodeAttributes::new(x, Label::Class(block as i64))
            })
            .collect();

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rng);
        let train_end = n * 6 / 10;
        let val_end = n * 8 / 10;
        for (rank, &node) in order.iter().enumerate() {
            let attrs = &mut nodes[node];
            attrs.train_mask = rank < train_end;
            attrs.val_mask = (train_end..val_end).contains(&rank);
            attrs.test_mask = rank >= val_end;
        }

        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                let p = if block_of(u) == block_of(v) {
                    self.p_in
                } else {
                    self.p_out
                };
                if rng.gen_bool(p) {
                    edges.push((u as u32, v as u32));
                }
            }
        }

        log::info!(
            "Generated planted partition: {} blocks of {} nodes, {} edges",
            self.blocks,
            self.block_size,
            edges.len()
        );

        Ok(AttributedGraph::new(nodes, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_seeded() {
        let model = PlantedPartition {
            blocks: 3,
            block_size: 10,
            seed: 7,
            ..Default::default()
        };
        let a = model.generate().unwrap();
        let b = model.generate().unwrap();

        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.node_count(), 30);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_masks_partition_nodes() {
        let graph = PlantedPartition::default().generate().unwrap();
        let n = graph.node_count();

        for node in &graph.nodes {
            let flags = [node.train_mask, node.val_mask, node.test_mask];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
        }
        let train = graph.nodes.iter().filter(|node| node.train_mask).count();
        assert_eq!(train, n * 6 / 10);
    }

    #[test]
    fn test_disconnected_blocks_when_p_out_zero() {
        let model = PlantedPartition {
            blocks: 2,
            block_size: 5,
            p_in: 1.0,
            p_out: 0.0,
            ..Default::default()
        };
        let graph = model.generate().unwrap();

        assert_eq!(graph.edges.len(), 20);
        assert!(graph.edges.iter().all(|&(u, v)| u / 5 == v / 5));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let model = PlantedPartition {
            p_in: 1.5,
            ..Default::default()
        };
        assert!(model.generate().is_err());
    }
}

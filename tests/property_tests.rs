//! Property-based tests for the partition invariants
//!
//! For any graph and balance parameters:
//! - every node lands in exactly one shard
//! - shards keep original indices and attributes
//! - a shard holds exactly the source edges between its own nodes
//! - at most one client exceeds `floor(N / K) + delta`

use proptest::prelude::*;
use std::collections::BTreeSet;

use louvain_splitter::graph::{adapt, AttributedGraph, Label, NodeAttributes};
use louvain_splitter::split::client_capacity;
use louvain_splitter::{LouvainSplitter, SplitError, SplitterConfig, Subgraph};

fn arb_graph() -> impl Strategy<Value = AttributedGraph> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec((0..n as u32, 0..n as u32), 0..120).prop_map(move |edges| {
            let nodes = (0..n)
                .map(|i| NodeAttributes::new(vec![i as f32], Label::Class(i as i64)))
                .collect();
            AttributedGraph::new(nodes, edges)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn split_invariants_hold(
        graph in arb_graph(),
        num_clients in 1usize..6,
        delta in 0usize..3,
        seed in prop::option::of(0u64..1000),
    ) {
        let n = graph.node_count();
        let config = SplitterConfig::new(num_clients, delta).with_seed(seed);
        let splitter = LouvainSplitter::new(config);

        if n / num_clients <= delta {
            let is_balance_error = matches!(
                splitter.split(&graph),
                Err(SplitError::InvalidBalanceParameters { .. })
            );
            prop_assert!(is_balance_error);
            return Ok(());
        }

        let shards: Vec<Subgraph> = splitter.split(&graph).unwrap().collect();
        prop_assert_eq!(shards.len(), num_clients);

        // Completeness: every node exactly once
        let mut seen: Vec<u32> = shards.iter().flat_map(|s| s.index_orig.iter().copied()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..n as u32).collect::<Vec<_>>());

        // Original indices and attributes
        for shard in &shards {
            for (local, &orig) in shard.index_orig.iter().enumerate() {
                prop_assert_eq!(&shard.nodes[local], &graph.nodes[orig as usize]);
            }
        }

        // Edge fidelity
        let adjacency = adapt(&graph).unwrap();
        for shard in &shards {
            let members: BTreeSet<u32> = shard.index_orig.iter().copied().collect();
            let expected: BTreeSet<(u32, u32)> = adjacency
                .undirected_edges()
                .filter(|(u, v)| members.contains(u) && members.contains(v))
                .collect();
            let actual: BTreeSet<(u32, u32)> = shard
                .edges
                .iter()
                .map(|&(u, v)| (shard.index_orig[u as usize], shard.index_orig[v as usize]))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        // Soft balance bound
        let capacity = client_capacity(n, num_clients, delta);
        let over = shards.iter().filter(|s| s.node_count() > capacity).count();
        prop_assert!(over <= 1);
    }

    #[test]
    fn split_is_deterministic(
        graph in arb_graph(),
        seed in prop::option::of(0u64..1000),
    ) {
        prop_assume!(graph.node_count() >= 2);
        let config = SplitterConfig::new(2, 0).with_seed(seed);
        let splitter = LouvainSplitter::new(config);

        let first: Vec<Subgraph> = splitter.split(&graph).unwrap().collect();
        let second: Vec<Subgraph> = splitter.split(&graph).unwrap().collect();
        prop_assert_eq!(first, second);
    }
}

//! Community-aware graph splitting for simulated federated learning
//!
//! One attributed graph is cut into one induced subgraph per client along
//! Louvain communities, with oversized communities chopped and clusters
//! packed round-robin under a soft size budget.

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod split;
pub mod storage;

pub use config::SplitterConfig;
pub use error::{SplitError, SplitResult};
pub use graph::{AttributedGraph, Label, NodeAttributes};
pub use split::{LouvainSplitter, Partition, SplitReport, Subgraph, Subgraphs};

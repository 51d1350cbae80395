//! Error types for the splitting pipeline

use thiserror::Error;

/// Result alias used by the partition-and-assign pipeline
pub type SplitResult<T> = std::result::Result<T, SplitError>;

/// Failures raised by the pipeline stage that detects them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// An edge references a node id outside `0..node_count`
    #[error("edge {edge:?} references a node outside 0..{node_count}")]
    InvalidGraph {
        /// Offending edge as given in the input
        edge: (u32, u32),
        /// Number of nodes in the input graph
        node_count: usize,
    },

    /// A node's feature vector length differs from the first node's
    #[error("node {node} has {found} features, expected {expected}")]
    FeatureDimension {
        node: usize,
        expected: usize,
        found: usize,
    },

    /// The input graph has no nodes
    #[error("graph has no nodes")]
    EmptyGraph,

    /// `floor(N / K) - delta` is not positive, or `K` is zero
    #[error(
        "cannot split {node_count} nodes across {num_clients} clients with delta {delta}: \
         cluster size threshold would be non-positive"
    )]
    InvalidBalanceParameters {
        node_count: usize,
        num_clients: usize,
        delta: usize,
    },
}

//! Configuration management for the splitter

use serde::{Deserialize, Serialize};

/// Parameters of a Louvain split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Number of clients to split the graph across
    pub num_clients: usize,

    /// Allowed gap between client sizes and the even share `N / K`
    pub delta: usize,

    /// Louvain resolution (1.0 is standard modularity)
    pub resolution: f64,

    /// Seed for the Louvain node-visit order; `None` visits nodes in id order
    pub seed: Option<u64>,

    /// Minimum modularity improvement for a Louvain local phase to keep iterating
    pub min_modularity_gain: f64,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            num_clients: 5,
            delta: 20,
            resolution: 1.0,
            seed: None,
            min_modularity_gain: 1e-7,
        }
    }
}

impl SplitterConfig {
    /// Create a configuration for `num_clients` clients with gap `delta`
    pub fn new(num_clients: usize, delta: usize) -> Self {
        Self {
            num_clients,
            delta,
            ..Default::default()
        }
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_modularity_gain(mut self, min_gain: f64) -> Self {
        self.min_modularity_gain = min_gain;
        self
    }
}

//! Community detection and cluster normalization module

pub mod louvain;
pub mod metrics;
pub mod normalize;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use louvain::Louvain;
pub use normalize::normalize;

/// A group of nodes sharing a (possibly synthetic) community label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique identifier for this cluster
    pub id: u32,

    /// Members of this cluster (node indices), in detection order
    pub members: Vec<u32>,
}

impl Cluster {
    pub fn new(id: u32, members: Vec<u32>) -> Self {
        Self { id, members }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Community label of every node, indexed by node id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Communities {
    labels: Vec<u32>,
}

impl Communities {
    pub fn new(labels: Vec<u32>) -> Self {
        Self { labels }
    }

    pub fn label(&self, node: usize) -> u32 {
        self.labels[node]
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Number of labelled nodes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct labels
    pub fn community_count(&self) -> usize {
        self.groups().len()
    }

    /// Members of each community in ascending node order, keyed by label
    pub fn groups(&self) -> BTreeMap<u32, Vec<u32>> {
        let mut groups: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for (node, &label) in self.labels.iter().enumerate() {
            groups.entry(label).or_default().push(node as u32);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_follow_node_order() {
        let communities = Communities::new(vec![7, 2, 7, 2, 9]);
        let groups = communities.groups();

        assert_eq!(communities.community_count(), 3);
        assert_eq!(groups[&2], vec![1, 3]);
        assert_eq!(groups[&7], vec![0, 2]);
        assert_eq!(groups[&9], vec![4]);
    }
}

//! Attributed input graph: per-node features, label and split masks

use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};

/// Node label: a class index or a target vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Class(i64),
    Vector(Vec<f32>),
}

impl Default for Label {
    fn default() -> Self {
        Label::Class(0)
    }
}

/// Attributes carried by every node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Feature vector (same length for every node of a graph)
    pub x: Vec<f32>,

    /// Label
    pub y: Label,

    #[serde(default)]
    pub train_mask: bool,

    #[serde(default)]
    pub val_mask: bool,

    #[serde(default)]
    pub test_mask: bool,
}

impl NodeAttributes {
    pub fn new(x: Vec<f32>, y: Label) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Set the train/val/test membership flags
    pub fn with_masks(mut self, train: bool, val: bool, test: bool) -> Self {
        self.train_mask = train;
        self.val_mask = val;
        self.test_mask = test;
        self
    }
}

/// Read-only input graph. Node `i` is `nodes[i]`; edges are treated as undirected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributedGraph {
    pub nodes: Vec<NodeAttributes>,
    pub edges: Vec<(u32, u32)>,
}

impl AttributedGraph {
    pub fn new(nodes: Vec<NodeAttributes>, edges: Vec<(u32, u32)>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Feature dimension, taken from the first node
    pub fn feature_dim(&self) -> usize {
        self.nodes.first().map_or(0, |n| n.x.len())
    }

    /// Check that every edge endpoint exists and feature lengths agree
    pub fn validate(&self) -> SplitResult<()> {
        let node_count = self.nodes.len();

        for &(u, v) in &self.edges {
            if u as usize >= node_count || v as usize >= node_count {
                return Err(SplitError::InvalidGraph {
                    edge: (u, v),
                    node_count,
                });
            }
        }

        let expected = self.feature_dim();
        if let Some((node, attrs)) = self
            .nodes
            .iter()
            .enumerate()
            .find(|(_, attrs)| attrs.x.len() != expected)
        {
            return Err(SplitError::FeatureDimension {
                node,
                expected,
                found: attrs.x.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(dim: usize) -> NodeAttributes {
        NodeAttributes::new(vec![0.5; dim], Label::Class(1))
    }

    #[test]
    fn test_validate_accepts_well_formed_graph() {
        let graph = AttributedGraph::new(vec![node(3), node(3)], vec![(0, 1), (1, 1)]);
        assert!(graph.validate().is_ok());
        assert_eq!(graph.feature_dim(), 3);
    }

    #[test]
    fn test_validate_rejects_dangling_edge() {
        let graph = AttributedGraph::new(vec![node(2), node(2)], vec![(0, 1), (1, 7)]);
        assert_eq!(
            graph.validate(),
            Err(SplitError::InvalidGraph {
                edge: (1, 7),
                node_count: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_ragged_features() {
        let graph = AttributedGraph::new(vec![node(2), node(2), node(4)], vec![]);
        assert_eq!(
            graph.validate(),
            Err(SplitError::FeatureDimension {
                node: 2,
                expected: 2,
                found: 4
            })
        );
    }

    #[test]
    fn test_label_json_forms() {
        let class: NodeAttributes =
            serde_json::from_str(r#"{"x":[1.0],"y":3,"train_mask":true}"#).unwrap();
        assert_eq!(class.y, Label::Class(3));
        assert!(class.train_mask);
        assert!(!class.val_mask);

        let vector: NodeAttributes = serde_json::from_str(r#"{"x":[],"y":[0.0,1.0]}"#).unwrap();
        assert_eq!(vector.y, Label::Vector(vec![0.0, 1.0]));
    }
}

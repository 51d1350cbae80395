//! Graph representation and adaptation module

pub mod attributed;
pub mod compressed;
pub mod builder;

pub use attributed::{AttributedGraph, Label, NodeAttributes};
pub use builder::{adapt, GraphBuilder};
pub use compressed::CompressedGraph;

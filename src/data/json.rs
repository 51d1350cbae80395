//! JSON file handling for attributed graphs

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::graph::AttributedGraph;

/// Load an attributed graph from a JSON file.
///
/// Expected shape: `{"nodes": [{"x": [..], "y": .., "train_mask": .., ..}], "edges": [[u, v], ..]}`
pub fn load_graph(path: &Path) -> Result<AttributedGraph> {
    log::info!("Reading graph file: {}", path.display());

    // Check if the file exists
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let graph: AttributedGraph = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing graph {}", path.display()))?;

    log::info!(
        "Loaded {} nodes, {} edges, feature dimension {}",
        graph.node_count(),
        graph.edges.len(),
        graph.feature_dim()
    );

    Ok(graph)
}

/// Write an attributed graph in the format read by [`load_graph`]
pub fn save_graph(graph: &AttributedGraph, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, graph)?;
    writer.flush()?;

    log::info!("Wrote {} nodes to {}", graph.node_count(), path.display());
    Ok(())
}

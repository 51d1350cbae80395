//! Results persistence module

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::to_string_pretty;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::split::{SplitReport, Subgraph};

/// Save the split summary and every client shard under `output_dir`
pub fn save_results(report: &SplitReport, shards: &[Subgraph], output_dir: &Path) -> Result<()> {
    log::info!("Saving {} client shards to {}", shards.len(), output_dir.display());

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    write_json(&output_dir.join("summary.json"), report)?;
    save_shards(shards, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save one JSON file per client shard in `<output_dir>/clients`
fn save_shards(shards: &[Subgraph], output_dir: &Path) -> Result<()> {
    let clients_dir = output_dir.join("clients");
    fs::create_dir_all(&clients_dir)
        .with_context(|| format!("creating {}", clients_dir.display()))?;

    for shard in shards {
        let path = clients_dir.join(format!("client_{}.json", shard.client));
        write_json(&path, shard)?;
    }

    Ok(())
}

/// Load a shard written by [`save_results`]
pub fn load_shard(path: &Path) -> Result<Subgraph> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let shard = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing shard {}", path.display()))?;
    Ok(shard)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

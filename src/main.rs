use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use louvain_splitter::data::{json, synthetic::PlantedPartition};
use louvain_splitter::{storage, LouvainSplitter, SplitReport, SplitterConfig, Subgraph};

#[derive(Parser, Debug)]
#[clap(
    name = "louvain-splitter",
    about = "Split an attributed graph into per-client shards along Louvain communities"
)]
struct Cli {
    /// Path to input graph JSON (a planted-partition graph is generated if absent)
    #[clap(long)]
    input: Option<PathBuf>,

    /// Output directory for shards and summary
    #[clap(long, default_value = "split_results")]
    output_dir: PathBuf,

    /// Number of clients
    #[clap(long, default_value = "5")]
    clients: usize,

    /// Allowed gap between client sizes and the even share
    #[clap(long, default_value = "20")]
    delta: usize,

    /// Louvain resolution
    #[clap(long, default_value = "1.0")]
    resolution: f64,

    /// Seed for the Louvain node-visit order (ascending ids if omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Blocks in the generated graph
    #[clap(long, default_value = "10")]
    toy_blocks: usize,

    /// Nodes per generated block
    #[clap(long, default_value = "50")]
    toy_block_size: usize,

    /// Intra-block edge probability
    #[clap(long, default_value = "0.3")]
    toy_p_in: f64,

    /// Inter-block edge probability
    #[clap(long, default_value = "0.01")]
    toy_p_out: f64,

    /// Feature dimension of generated nodes
    #[clap(long, default_value = "16")]
    toy_features: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    // 1. Load or generate the graph
    let graph = match &args.input {
        Some(path) => json::load_graph(path)?,
        None => PlantedPartition {
            blocks: args.toy_blocks,
            block_size: args.toy_block_size,
            p_in: args.toy_p_in,
            p_out: args.toy_p_out,
            feature_dim: args.toy_features,
            seed: args.seed.unwrap_or(0),
        }
        .generate()?,
    };

    let config = SplitterConfig::new(args.clients, args.delta)
        .with_resolution(args.resolution)
        .with_seed(args.seed);
    let splitter = LouvainSplitter::new(config);
    log::info!("Running {}", splitter);

    // 2. Detect, normalize and assign
    let partition = splitter.partition(&graph)?;
    let report = SplitReport::new(&splitter, &partition, &graph);
    log::info!(
        "Modularity {:.4}, {} cross-client edges dropped",
        report.modularity,
        report.cut_edges
    );

    // 3. Extract per-client subgraphs
    let shards: Vec<Subgraph> = partition.into_subgraphs(&graph).collect();

    // 4. Save results
    storage::save_results(&report, &shards, &args.output_dir)?;

    log::info!("Split complete. Results saved to {}", args.output_dir.display());

    Ok(())
}

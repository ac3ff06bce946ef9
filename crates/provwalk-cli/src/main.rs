//! provwalk CLI - activity corpus generation from provenance edge lists.
//!
//! # Usage
//!
//! ```bash
//! # Graph and component statistics
//! provwalk stats edges.jsonl
//! provwalk components edges.jsonl --verbose
//!
//! # Corpus for given start nodes (or one random start if none given)
//! provwalk corpus edges.jsonl --start bash --start sshd -o corpus.txt
//!
//! # Sample 0.1% of all nodes as starts, with replacement, on 8 threads
//! provwalk corpus edges.jsonl --start-fraction 0.001 --threads 8 --json
//! provwalk corpus edges.jsonl --nodes starts.txt --max-length 10 --random-prob 0.2 --seed 42
//!
//! # Only the walk
//! provwalk walk edges.jsonl --start bash
//! ```
//!
//! Set `RUST_LOG=debug` for progress and skipped-record diagnostics on stderr.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use provwalk_core::formats::{read_edges_file, read_nodes_file};
use provwalk_core::{CorpusGenerator, DepthFirstWalker, ProvEdge, ProvenanceGraph, WalkConfig};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "provwalk")]
#[command(about = "Provenance graph activity corpus generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics about a provenance graph
    Stats {
        /// Edge file (JSON lines, or CSV with a .csv extension)
        input: PathBuf,
    },

    /// Analyze connected components
    Components {
        /// Edge file
        input: PathBuf,

        /// List every component's size
        #[arg(long)]
        verbose: bool,
    },

    /// Generate activity corpora, one per start node
    Corpus {
        /// Edge file
        input: PathBuf,

        /// Start node (repeatable)
        #[arg(short, long = "start")]
        starts: Vec<String>,

        /// File with one start node per line
        #[arg(long)]
        nodes: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Without explicit starts, sample floor(nodes * fraction) starts
        /// with replacement instead of a single random one
        #[arg(long)]
        start_fraction: Option<f64>,

        /// Worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,

        /// Emit one JSON object per corpus instead of plain text.
        /// Plain text omits empty corpora; use this to keep one record per start.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Print the walk from a start node
    Walk {
        /// Edge file
        input: PathBuf,

        /// Start node
        #[arg(short, long)]
        start: String,

        #[command(flatten)]
        walk: WalkArgs,
    },
}

#[derive(Args)]
struct WalkArgs {
    /// Maximum walk length
    #[arg(long, default_value = "10")]
    max_length: usize,

    /// Probability of a uniform hop instead of a prioritized one
    #[arg(long, default_value = "0.2")]
    random_prob: f64,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

impl WalkArgs {
    fn config(&self) -> Result<WalkConfig> {
        let config = WalkConfig {
            max_length: self.max_length,
            random_prob: self.random_prob,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input } => cmd_stats(&input),
        Commands::Components { input, verbose } => cmd_components(&input, verbose),
        Commands::Corpus {
            input,
            starts,
            nodes,
            output,
            start_fraction,
            threads,
            json,
            walk,
        } => cmd_corpus(
            &input,
            starts,
            nodes.as_deref(),
            output.as_deref(),
            &Sampling {
                start_fraction,
                threads,
            },
            json,
            &walk,
        ),
        Commands::Walk { input, start, walk } => cmd_walk(&input, &start, &walk),
    }
}

fn load(path: &Path) -> Result<(Vec<ProvEdge>, ProvenanceGraph)> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading {}...", path.display()));

    let edges =
        read_edges_file(path).with_context(|| format!("Failed to read edges from {}", path.display()))?;
    let graph = ProvenanceGraph::from_edges(&edges);

    pb.finish_and_clear();
    info!(
        path = %path.display(),
        edges = edges.len(),
        nodes = graph.node_count(),
        elapsed = ?start.elapsed(),
        "loaded provenance graph"
    );
    Ok((edges, graph))
}

fn cmd_stats(input: &Path) -> Result<()> {
    let (edges, graph) = load(input)?;
    let stats = graph.stats();

    println!("Provenance Graph Statistics");
    println!("===========================");
    println!("Edge records:   {}", edges.len());
    println!("Nodes:          {}", stats.node_count);
    println!("Adjacencies:    {}", stats.edge_count);
    println!("Components:     {}", stats.component_count);
    println!("Max component:  {}", stats.max_component_size);

    Ok(())
}

fn cmd_components(input: &Path, verbose: bool) -> Result<()> {
    let (_, graph) = load(input)?;
    let stats = graph.stats();

    println!("Component Statistics");
    println!("====================");
    println!("Number of components: {}", stats.component_count);
    println!("Max component size:   {}", stats.max_component_size);
    println!("Min component size:   {}", stats.min_component_size);
    println!("Avg component size:   {:.2}", stats.avg_component_size);
    println!(
        "Largest fraction:     {:.2}",
        stats.largest_component_fraction
    );

    if verbose {
        println!("\nComponents:");
        for (i, c) in graph.components().iter().enumerate() {
            println!("  Component {}: {} nodes", i + 1, c.len());
            if c.len() < 10 {
                println!("    {:?}", c);
            } else {
                println!("    (too large to list)");
            }
        }
    }

    Ok(())
}

struct Sampling {
    start_fraction: Option<f64>,
    threads: Option<usize>,
}

fn cmd_corpus(
    input: &Path,
    mut starts: Vec<String>,
    nodes: Option<&Path>,
    output: Option<&Path>,
    sampling: &Sampling,
    json: bool,
    args: &WalkArgs,
) -> Result<()> {
    let config = args.config()?;
    if let Some(threads) = sampling.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let (edges, graph) = load(input)?;
    let generator = CorpusGenerator::new(&graph, &edges, config);

    if let Some(path) = nodes {
        let listed = read_nodes_file(path)
            .with_context(|| format!("Failed to read nodes from {}", path.display()))?;
        starts.extend(listed);
    }

    if starts.is_empty() {
        if graph.is_empty() {
            bail!("{} contains no edges to start from", input.display());
        }
        let mut rng = XorShiftRng::seed_from_u64(args.seed);
        match sampling.start_fraction {
            Some(fraction) => {
                let sampled = generator.sample_starts(fraction, &mut rng)?;
                starts.extend(sampled.into_iter().map(str::to_owned));
                if starts.is_empty() {
                    bail!(
                        "start fraction {} selects no nodes out of {}",
                        fraction,
                        graph.node_count()
                    );
                }
            }
            None => starts.extend(generator.pick_start(&mut rng).map(str::to_owned)),
        }
    }

    let start = Instant::now();
    let pb = ProgressBar::new(starts.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} corpora ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let corpora = generator.generate_batch_with(&starts, args.seed, |_| pb.inc(1));
    pb.finish_and_clear();
    info!(corpora = corpora.len(), elapsed = ?start.elapsed(), "generated corpora");

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut written = 0usize;
    for corpus in &corpora {
        if json {
            serde_json::to_writer(&mut out, corpus)?;
            writeln!(out)?;
        } else if corpus.text.is_empty() {
            warn!(start = %corpus.start, "no edges around start node, corpus omitted");
        } else {
            if written > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", corpus.text)?;
            written += 1;
        }
    }
    out.flush()?;

    Ok(())
}

fn cmd_walk(input: &Path, start: &str, args: &WalkArgs) -> Result<()> {
    let config = args.config()?;
    let (_, graph) = load(input)?;

    let mut rng = XorShiftRng::seed_from_u64(args.seed);
    let walk = DepthFirstWalker::new(&graph, config).walk(start, &mut rng);

    println!("{}", walk.nodes().join(" "));
    Ok(())
}

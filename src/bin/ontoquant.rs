//! ontoquant CLI: GO term quantification and slim mapping.
//!
//! Usage:
//!   ontoquant quantify --config run.yaml [--graph ..] [--slim ..] [--observations ..]
//!                      [--output ..] [--threads N]
//!   ontoquant slim --graph go.json --slim goslim.json TERM...

use clap::{Parser, Subcommand};
use ontoquant::{
    io, pipeline, OntologyGraph, OntologyResult, QuantConfig, SlimIndex, SlimMapper,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ontoquant",
    version,
    about = "Ontology-aware annotation abundance quantification"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate peptide intensities up the ontology and write a report
    Quantify {
        /// Path to the YAML or JSON run configuration
        #[arg(short, long)]
        config: PathBuf,
        /// Ontology graph document (overrides the config file)
        #[arg(long)]
        graph: Option<PathBuf>,
        /// Slim vocabulary (overrides the config file)
        #[arg(long)]
        slim: Option<PathBuf>,
        /// Peptide observations (overrides the config file)
        #[arg(long)]
        observations: Option<PathBuf>,
        /// Report path (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Worker threads (overrides the config file)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Print the closest slim term for each given term
    Slim {
        /// Ontology graph document
        #[arg(long)]
        graph: PathBuf,
        /// Slim vocabulary
        #[arg(long)]
        slim: PathBuf,
        /// Upper bound on slim search generations
        #[arg(long)]
        max_depth: Option<usize>,
        /// Terms to map
        #[arg(required = true)]
        terms: Vec<String>,
    },
}

struct Overrides {
    graph: Option<PathBuf>,
    slim: Option<PathBuf>,
    observations: Option<PathBuf>,
    output: Option<PathBuf>,
    threads: Option<usize>,
}

fn cmd_quantify(config: PathBuf, overrides: Overrides) -> i32 {
    let mut config = match QuantConfig::load(&config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", config.display(), e);
            return 1;
        }
    };

    if let Some(graph) = overrides.graph {
        config.graph = graph;
    }
    if let Some(slim) = overrides.slim {
        config.slim = Some(slim);
    }
    if let Some(observations) = overrides.observations {
        config.observations = observations;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }

    match pipeline::run(&config) {
        Ok(report) => {
            info!(
                terms = report.terms.len(),
                output = %config.output.display(),
                "quantification finished"
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn load_mapper_inputs(graph: &Path, slim: &Path) -> OntologyResult<(OntologyGraph, SlimIndex)> {
    Ok((io::load_graph(graph)?, io::load_slim(slim)?))
}

fn cmd_slim(graph: &Path, slim: &Path, max_depth: Option<usize>, terms: &[String]) -> i32 {
    let (graph, slim) = match load_mapper_inputs(graph, slim) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut mapper = SlimMapper::new(&graph, &slim);
    if let Some(depth) = max_depth {
        mapper = mapper.with_max_depth(depth);
    }

    for term in terms {
        match mapper.map_to_slim(term) {
            Ok(mapped) => println!("{}\t{}", term, mapped),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Quantify {
            config,
            graph,
            slim,
            observations,
            output,
            threads,
        } => cmd_quantify(
            config,
            Overrides {
                graph,
                slim,
                observations,
                output,
                threads,
            },
        ),
        Commands::Slim {
            graph,
            slim,
            max_depth,
            terms,
        } => cmd_slim(&graph, &slim, max_depth, &terms),
    };

    std::process::exit(code);
}

//! Command-line interface for tsbench
//!
//! # Usage Examples
//!
//! ```bash
//! # Devops data for 10 hosts, written as MongoDB BSON documents
//! tsbench generate-data --format mongo --use-case devops --scale-var 10 --seed 42
//!
//! # Grow from 10 to 1000 hosts over the window, with a memory profile
//! tsbench generate-data --format influx --use-case cpu-only \
//!   --initial-scale-var 10 --scale-var 1000 --profile-file mem.json
//!
//! # Cassandra query plans
//! tsbench generate-queries --format cassandra --query-type single-groupby-5-8-1 --scale-var 100
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tsbench::generate_data::{run_generate_data, GenerateDataArgs};
use tsbench::generate_queries::{run_generate_queries, GenerateQueriesArgs};

#[derive(Parser)]
#[command(name = "tsbench")]
#[command(about = "Generate time-series benchmark data and queries for several databases")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit synthetic data points in an engine's bulk-load format
    GenerateData(GenerateDataArgs),

    /// Emit benchmark queries as JSON lines
    GenerateQueries(GenerateQueriesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // stdout carries data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateData(args) => run_generate_data(args).await,
        Commands::GenerateQueries(args) => run_generate_queries(args).await,
    }
}

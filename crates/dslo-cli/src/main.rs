use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    extract::{self, ExtractArgs},
    stats::{self, StatsArgs},
    unique::{self, UniqueArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dslo", about = "Dense subgraphs with limited overlap in weighted hypergraphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a ranked family of dense subgraphs and write the result file.
    Extract(ExtractArgs),
    /// Check whether the maximum-density subgraph is unique.
    Unique(UniqueArgs),
    /// Print size, density and degree distribution of a hypergraph.
    Stats(StatsArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Extract(args) => extract::run(&args),
        Command::Unique(args) => unique::run(&args),
        Command::Stats(args) => stats::run(&args),
    }
}

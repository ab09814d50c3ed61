use std::path::{Path, PathBuf};

use clap::Args;
use dslo_core::errors::DsloError;
use dslo_graph::{load_hypergraph, LoadOptions, WeightedHypergraph};
use log::info;

pub mod extract;
pub mod stats;
pub mod unique;

/// Node and edge files shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Node list: one `<id> <weight>` line per node.
    #[arg(long)]
    pub nodes: PathBuf,
    /// Edge list: one `<id,id,...> <weight>` line per edge.
    #[arg(long)]
    pub edges: PathBuf,
    /// Treat every node and edge weight as one.
    #[arg(long)]
    pub unweighted: bool,
}

impl GraphArgs {
    pub fn load(&self, options: LoadOptions) -> Result<WeightedHypergraph, DsloError> {
        info!("reading hypergraph from {} and {}", self.nodes.display(), self.edges.display());
        let graph = load_hypergraph(&self.nodes, &self.edges, options)?;
        info!(
            "loaded {} nodes and {} edges, density = {:.6}",
            graph.node_count(),
            graph.edge_count(),
            graph.density()
        );
        Ok(graph)
    }

    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            unweighted: self.unweighted,
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        vec![display(&self.nodes), display(&self.edges)]
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

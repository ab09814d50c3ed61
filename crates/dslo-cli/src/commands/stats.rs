use std::error::Error;

use clap::Args;
use dslo_graph::{
    clique_expansion, render_distribution, unweighted_degree_distribution, WeightedHypergraph,
};

use super::GraphArgs;

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn run(args: &StatsArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.graph.load(args.graph.options())?;
    print!("{}", describe(&graph));
    Ok(())
}

fn describe(graph: &WeightedHypergraph) -> String {
    let pairs: usize = clique_expansion(graph).iter().map(|adj| adj.len()).sum::<usize>() / 2;
    format!(
        "nodes: {}\nedges: {}\nincidences: {}\nclique-expansion pairs: {}\ndensity: {:.6}\ndegrees: {}\n",
        graph.node_count(),
        graph.edge_count(),
        graph.incidence_count(),
        pairs,
        graph.density(),
        render_distribution(&unweighted_degree_distribution(graph)).trim_end()
    )
}

use dslo_core::errors::DsloError;
use dslo_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::hypergraph::WeightedHypergraph;

/// Derivation used by the overlap-limiting removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivationMode {
    /// Every edge of the superset restricted to the subgraph's nodes.
    #[default]
    Induced,
    /// One singleton edge per subgraph endpoint of every edge the subgraph lacks.
    Complement,
}

impl DerivationMode {
    /// Numeric label used in result file names (`removalway=`).
    pub fn label(&self) -> u8 {
        match self {
            DerivationMode::Induced => 1,
            DerivationMode::Complement => 2,
        }
    }

    /// Builds the derived graph of `subgraph` against `graph`.
    pub fn derive(
        &self,
        subgraph: &WeightedHypergraph,
        graph: &WeightedHypergraph,
    ) -> Result<WeightedHypergraph, DsloError> {
        match self {
            DerivationMode::Induced => induced(subgraph, graph),
            DerivationMode::Complement => complement(subgraph, graph),
        }
    }
}

/// Restricts every edge of `graph` to the node set of `subgraph`.
///
/// The result carries `subgraph`'s nodes and one edge for each edge of
/// `graph` with at least one surviving endpoint, keeping all surviving
/// endpoints and the full edge weight.
pub fn induced(
    subgraph: &WeightedHypergraph,
    graph: &WeightedHypergraph,
) -> Result<WeightedHypergraph, DsloError> {
    let mut derived = subgraph.node_skeleton();
    for (_, members, weight) in graph.edges() {
        let surviving: Vec<NodeId> = members
            .iter()
            .copied()
            .filter(|node| subgraph.has_node(*node))
            .collect();
        if !surviving.is_empty() {
            derived.push_edge(&surviving, weight)?;
        }
    }
    Ok(derived)
}

/// Charges each of `subgraph`'s nodes with the weight of every outside edge
/// reaching it.
///
/// For every edge of `graph` that `subgraph` does not contain, each endpoint
/// inside `subgraph` receives its own singleton edge with the edge's full
/// weight; the weight is applied per endpoint, not split across them.
pub fn complement(
    subgraph: &WeightedHypergraph,
    graph: &WeightedHypergraph,
) -> Result<WeightedHypergraph, DsloError> {
    let mut derived = subgraph.node_skeleton();
    for (edge, members, weight) in graph.edges() {
        if subgraph.has_edge(edge) {
            continue;
        }
        for node in members.iter().copied().filter(|node| subgraph.has_node(*node)) {
            derived.push_edge(&[node], weight)?;
        }
    }
    Ok(derived)
}

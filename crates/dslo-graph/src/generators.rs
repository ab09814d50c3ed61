use std::ops::Range;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::rng::RngHandle;
use dslo_core::NodeId;
use rand::seq::index::sample;
use rand::Rng;

use crate::hypergraph::WeightedHypergraph;

/// Generates a random weighted hypergraph with deterministic randomness.
///
/// Node weights are drawn from `[0.5, 2.0)`, edge weights from `[0.1, 4.0)`
/// and each edge has between one and `max_arity` distinct members.
pub fn gen_random_weighted(
    n_nodes: usize,
    n_edges: usize,
    max_arity: usize,
    rng: &mut RngHandle,
) -> Result<WeightedHypergraph, DsloError> {
    gen_random_weighted_in(n_nodes, n_edges, max_arity, 0.5..2.0, rng)
}

/// Like [`gen_random_weighted`], with node weights drawn from `node_weights`.
pub fn gen_random_weighted_in(
    n_nodes: usize,
    n_edges: usize,
    max_arity: usize,
    node_weights: Range<f64>,
    rng: &mut RngHandle,
) -> Result<WeightedHypergraph, DsloError> {
    if n_nodes == 0 {
        return Err(DsloError::Graph(ErrorInfo::new(
            "empty-graph",
            "random generator requires at least one node",
        )));
    }
    if node_weights.is_empty() || !(node_weights.start >= 0.0) {
        return Err(DsloError::Graph(
            ErrorInfo::new(
                "invalid-weight-range",
                "node weights need a non-empty non-negative range",
            )
            .with_context("start", node_weights.start)
            .with_context("end", node_weights.end),
        ));
    }
    let mut graph = WeightedHypergraph::new();
    for raw in 0..n_nodes as u64 {
        let weight = rng.gen_range(node_weights.clone());
        graph.add_node(NodeId::from_raw(raw), weight)?;
    }
    let max_arity = max_arity.clamp(1, n_nodes);
    for _ in 0..n_edges {
        let arity = rng.gen_range(1..=max_arity);
        let members: Vec<NodeId> = sample(rng.inner_mut(), n_nodes, arity)
            .into_iter()
            .map(|idx| NodeId::from_raw(idx as u64))
            .collect();
        let weight = rng.gen_range(0.1..4.0);
        graph.push_edge(&members, weight)?;
    }
    Ok(graph)
}

/// Generates a sparse random background with a heavy block planted on the
/// first `block` nodes.
///
/// Every pair inside the block is joined by an edge of weight `block_weight`,
/// so the block's density is `block_weight * (block - 1) / 2` with unit node
/// weights.
pub fn gen_planted_block(
    n_nodes: usize,
    block: usize,
    block_weight: f64,
    rng: &mut RngHandle,
) -> Result<WeightedHypergraph, DsloError> {
    if block > n_nodes || block < 2 {
        return Err(DsloError::Graph(
            ErrorInfo::new("invalid-block", "block must hold between 2 and n_nodes nodes")
                .with_context("block", block)
                .with_context("n_nodes", n_nodes),
        ));
    }
    let mut graph = WeightedHypergraph::new();
    for raw in 0..n_nodes as u64 {
        graph.add_node(NodeId::from_raw(raw), 1.0)?;
    }
    for left in 0..block as u64 {
        for right in left + 1..block as u64 {
            graph.push_edge(&[NodeId::from_raw(left), NodeId::from_raw(right)], block_weight)?;
        }
    }
    for raw in block as u64..n_nodes as u64 {
        let partner = rng.gen_range(0..n_nodes as u64);
        graph.push_edge(&[NodeId::from_raw(raw), NodeId::from_raw(partner)], 0.1)?;
    }
    Ok(graph)
}

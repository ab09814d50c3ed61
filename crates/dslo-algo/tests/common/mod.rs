#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeSet;

use dslo_core::{compare, NodeId};
use dslo_graph::WeightedHypergraph;

/// Density of the subgraph induced by `nodes`: edges wholly inside the set
/// over the set's node weight.
pub fn subset_density(graph: &WeightedHypergraph, nodes: &BTreeSet<NodeId>) -> f64 {
    let node_weight: f64 = nodes
        .iter()
        .map(|node| graph.node_weight(*node).unwrap())
        .sum();
    if node_weight.abs() < 1e-12 {
        return 0.0;
    }
    let edge_weight: f64 = graph
        .edges()
        .filter(|(_, members, _)| members.is_subset(nodes))
        .map(|(_, _, weight)| weight)
        .sum();
    edge_weight / node_weight
}

/// Densities of every non-empty node subset.
fn subset_densities(graph: &WeightedHypergraph) -> Vec<f64> {
    let nodes: Vec<NodeId> = graph.node_ids().into_iter().collect();
    assert!(nodes.len() <= 12, "exhaustive search is limited to 12 nodes");
    (1u32..(1u32 << nodes.len()))
        .map(|mask| {
            let subset: BTreeSet<NodeId> = nodes
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, node)| *node)
                .collect();
            subset_density(graph, &subset)
        })
        .collect()
}

/// Maximum density over every non-empty node subset.
pub fn brute_force_max_density(graph: &WeightedHypergraph) -> f64 {
    subset_densities(graph).into_iter().fold(0.0, f64::max)
}

/// Number of node subsets attaining the maximum density.
pub fn count_maximizers(graph: &WeightedHypergraph) -> usize {
    let densities = subset_densities(graph);
    let best = densities.iter().copied().fold(0.0, f64::max);
    densities
        .into_iter()
        .filter(|density| compare(*density, best) == Ordering::Equal)
        .count()
}

/// Disjoint union of `graph` with a copy of itself whose ids are shifted by `offset`.
pub fn with_twin(graph: &WeightedHypergraph, offset: u64) -> WeightedHypergraph {
    let mut doubled = graph.clone();
    for (node, weight) in graph.nodes() {
        doubled.add_node(n(node.as_raw() + offset), weight).unwrap();
    }
    for (_, members, weight) in graph.edges() {
        let shifted: Vec<NodeId> = members.iter().map(|node| n(node.as_raw() + offset)).collect();
        doubled.push_edge(&shifted, weight).unwrap();
    }
    doubled
}

pub fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

/// Four unit nodes; the triangle-like core {1, 2, 3} has density 2.
pub fn triangle_with_tail() -> WeightedHypergraph {
    let mut graph = WeightedHypergraph::new();
    for id in 1..=4 {
        graph.add_node(n(id), 1.0).unwrap();
    }
    graph.push_edge(&[n(1), n(2)], 3.0).unwrap();
    graph.push_edge(&[n(2), n(3)], 3.0).unwrap();
    graph.push_edge(&[n(1), n(2), n(3), n(4)], 0.1).unwrap();
    graph
}

/// Two disjoint blocks of density 0.5 with node weights 2 and 3.
pub fn equal_density_pair() -> WeightedHypergraph {
    let mut graph = WeightedHypergraph::new();
    for id in 1..=5 {
        graph.add_node(n(id), 1.0).unwrap();
    }
    graph.push_edge(&[n(1), n(2)], 1.0).unwrap();
    graph.push_edge(&[n(3), n(4), n(5)], 1.5).unwrap();
    graph
}

/// Four nodes of weight `scale / 10`; {1, 2} is densest at `2.5 / scale`.
pub fn light_pairs(scale: f64) -> WeightedHypergraph {
    let mut graph = WeightedHypergraph::new();
    for id in 1..=4 {
        graph.add_node(n(id), 0.1 * scale).unwrap();
    }
    graph.push_edge(&[n(1), n(2)], 0.5).unwrap();
    graph.push_edge(&[n(3), n(4)], 0.4).unwrap();
    graph
}

use std::collections::{BTreeMap, BTreeSet};

use dslo_core::NodeId;

use crate::hypergraph::WeightedHypergraph;

/// Maps incidence count to the number of nodes with that count.
pub fn unweighted_degree_distribution(graph: &WeightedHypergraph) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for (node, _) in graph.nodes() {
        *counts.entry(graph.unweighted_degree(node)).or_insert(0) += 1;
    }
    counts
}

/// Renders a degree distribution as `(d x c) ` groups.
pub fn render_distribution(distribution: &BTreeMap<usize, usize>) -> String {
    distribution
        .iter()
        .map(|(degree, count)| format!("({degree} x {count}) "))
        .collect()
}

/// Adjacency lists of the ordinary graph connecting every pair of nodes that
/// share an edge.
///
/// Nodes are re-indexed densely from zero in the order they are first met
/// while scanning edges; nodes without edges do not appear.
pub fn clique_expansion(graph: &WeightedHypergraph) -> Vec<BTreeSet<usize>> {
    let mut index: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut adjacency: Vec<BTreeSet<usize>> = Vec::new();
    for (_, members, _) in graph.edges() {
        let local: Vec<usize> = members
            .iter()
            .map(|node| {
                *index.entry(*node).or_insert_with(|| {
                    adjacency.push(BTreeSet::new());
                    adjacency.len() - 1
                })
            })
            .collect();
        for (pos, &left) in local.iter().enumerate() {
            for &right in &local[pos + 1..] {
                adjacency[left].insert(right);
                adjacency[right].insert(left);
            }
        }
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeightedHypergraph {
        let mut graph = WeightedHypergraph::new();
        for id in [5, 7, 9, 11] {
            graph.add_node(NodeId::from_raw(id), 1.0).unwrap();
        }
        graph
            .push_edge(&[NodeId::from_raw(7), NodeId::from_raw(9), NodeId::from_raw(5)], 1.0)
            .unwrap();
        graph.push_edge(&[NodeId::from_raw(9)], 1.0).unwrap();
        graph
    }

    #[test]
    fn distribution_counts_isolated_nodes() {
        let distribution = unweighted_degree_distribution(&sample());
        assert_eq!(render_distribution(&distribution), "(0 x 1) (1 x 2) (2 x 1) ");
    }

    #[test]
    fn clique_expansion_connects_co_members() {
        let adjacency = clique_expansion(&sample());
        assert_eq!(adjacency.len(), 3);
        for (idx, neighbours) in adjacency.iter().enumerate() {
            assert_eq!(neighbours.len(), 2);
            assert!(!neighbours.contains(&idx));
        }
    }
}

use sha2::{Digest, Sha256};

use crate::hypergraph::WeightedHypergraph;

/// Computes the canonical structural hash for the provided graph.
///
/// Nodes and edges are visited in ascending id order; edge ids themselves are
/// not hashed, only their member lists and weights.
pub fn canonical_hash(graph: &WeightedHypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"nodes");
    hasher.update((graph.node_count() as u64).to_le_bytes());
    for (id, weight) in graph.nodes() {
        hasher.update(id.as_raw().to_le_bytes());
        hasher.update(weight.to_bits().to_le_bytes());
    }

    let mut signatures: Vec<(Vec<u64>, u64)> = graph
        .edges()
        .map(|(_, members, weight)| {
            (
                members.iter().map(|node| node.as_raw()).collect(),
                weight.to_bits(),
            )
        })
        .collect();
    signatures.sort();
    hasher.update(b"edges");
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (members, weight) in signatures {
        update_slice(&members, &mut hasher);
        hasher.update(weight.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn update_slice(values: &[u64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dslo_core::{EdgeId, NodeId};

    #[test]
    fn hash_ignores_edge_ids() {
        let mut left = WeightedHypergraph::new();
        let mut right = WeightedHypergraph::new();
        for graph in [&mut left, &mut right] {
            graph.add_node(NodeId::from_raw(1), 1.0).unwrap();
            graph.add_node(NodeId::from_raw(2), 2.0).unwrap();
        }
        left.add_edge(&[NodeId::from_raw(1)], 1.0, EdgeId::from_raw(0)).unwrap();
        left.add_edge(&[NodeId::from_raw(1), NodeId::from_raw(2)], 3.0, EdgeId::from_raw(1))
            .unwrap();
        right.add_edge(&[NodeId::from_raw(2), NodeId::from_raw(1)], 3.0, EdgeId::from_raw(4))
            .unwrap();
        right.add_edge(&[NodeId::from_raw(1)], 1.0, EdgeId::from_raw(9)).unwrap();
        assert_eq!(canonical_hash(&left), canonical_hash(&right));

        right.add_node(NodeId::from_raw(3), 0.0).unwrap();
        assert_ne!(canonical_hash(&left), canonical_hash(&right));
    }
}

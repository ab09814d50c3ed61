use dslo_core::errors::DsloError;
use dslo_core::{EdgeId, NodeId};

use crate::heap::DegeneracyHeap;
use crate::hypergraph::WeightedHypergraph;
use crate::ids::unknown_edge;
use crate::policy::RemovalPolicy;

/// Strict-policy hypergraph whose weighted degrees are mirrored in a
/// [`DegeneracyHeap`] across every removal.
#[derive(Debug, Clone)]
pub struct DegeneracyOrderedHypergraph {
    graph: WeightedHypergraph,
    heap: DegeneracyHeap,
}

impl DegeneracyOrderedHypergraph {
    /// Copies `source` and seeds the heap with every node's weighted degree.
    pub fn new(source: &WeightedHypergraph) -> Self {
        let graph = source.copy_with_policy(RemovalPolicy::Strict);
        let mut heap = DegeneracyHeap::new();
        for (node, _) in graph.nodes() {
            if let Ok(degree) = graph.weighted_degree(node) {
                heap.push(node, degree);
            }
        }
        Self { graph, heap }
    }

    /// Returns the node of minimum weighted degree.
    pub fn peek_min_id(&mut self) -> Option<NodeId> {
        self.heap.peek_min().map(|(node, _)| node)
    }

    /// Returns the minimum weighted degree currently in the graph.
    pub fn min_degree(&mut self) -> Option<f64> {
        self.heap.peek_min().map(|(_, degree)| degree)
    }

    /// Removes the node of minimum weighted degree and returns its id.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        let node = self.peek_min_id()?;
        self.remove_node(node);
        Some(node)
    }

    /// Removes a node, deleting its incident edges and re-keying the affected
    /// neighbours. Returns `false` when the node was absent.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(touched) = self.graph.erase_node(node) else {
            return false;
        };
        self.heap.erase(node);
        for neighbour in touched {
            self.refresh(neighbour);
        }
        true
    }

    /// Removes an edge and re-keys its former members.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), DsloError> {
        let record = self.graph.erase_edge(edge).ok_or_else(|| unknown_edge(edge))?;
        for member in record.members().iter().copied() {
            self.refresh(member);
        }
        Ok(())
    }

    fn refresh(&mut self, node: NodeId) {
        if let Ok(degree) = self.graph.weighted_degree(node) {
            self.heap.update(node, degree);
        }
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &WeightedHypergraph {
        &self.graph
    }

    /// Releases the underlying graph.
    pub fn into_graph(self) -> WeightedHypergraph {
        self.graph
    }

    /// Density of the remaining graph.
    pub fn density(&self) -> f64 {
        self.graph.density()
    }

    /// Total node weight of the remaining graph.
    pub fn node_weight_total(&self) -> f64 {
        self.graph.node_weight_total()
    }

    /// Returns whether the graph has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn sample() -> WeightedHypergraph {
        let mut graph = WeightedHypergraph::new();
        for id in 1..=4 {
            graph.add_node(n(id), 1.0).unwrap();
        }
        graph.push_edge(&[n(1), n(2)], 3.0).unwrap();
        graph.push_edge(&[n(2), n(3)], 3.0).unwrap();
        graph.push_edge(&[n(1), n(2), n(3), n(4)], 0.1).unwrap();
        graph
    }

    #[test]
    fn pop_order_follows_current_degrees() {
        let source = sample();
        let mut ordered = DegeneracyOrderedHypergraph::new(&source);
        let mut order = Vec::new();
        while let Some(node) = ordered.pop_min() {
            order.push(node);
        }
        assert_eq!(order, vec![n(4), n(1), n(2), n(3)]);
        assert!(ordered.is_empty());
        assert_eq!(source.node_count(), 4);
    }

    #[test]
    fn heap_keys_match_degrees_after_removal() {
        let mut ordered = DegeneracyOrderedHypergraph::new(&sample());
        assert!(ordered.remove_node(n(2)));
        for (node, _) in ordered.graph().nodes() {
            let degree = ordered.graph().weighted_degree(node).unwrap();
            assert_eq!(ordered.heap.key(node), Some(degree));
        }
        assert_eq!(ordered.min_degree(), Some(0.0));
        assert!(!ordered.remove_node(n(2)));
    }

    #[test]
    fn edge_removal_rekeys_members() {
        let mut ordered = DegeneracyOrderedHypergraph::new(&sample());
        ordered.remove_edge(EdgeId::from_raw(0)).unwrap();
        assert_eq!(ordered.heap.key(n(1)), Some(ordered.graph().weighted_degree(n(1)).unwrap()));
        assert!(ordered.remove_edge(EdgeId::from_raw(0)).is_err());
    }
}

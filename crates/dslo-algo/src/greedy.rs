use std::cmp::Ordering;

use dslo_core::report::{Event, Reporter};
use dslo_core::{compare, NodeId};
use dslo_graph::{DegeneracyOrderedHypergraph, RemovalPolicy, WeightedHypergraph};

/// Result of a greedy peeling pass.
#[derive(Debug, Clone)]
pub struct PeelingOutcome {
    /// Densest prefix-removed subgraph observed during peeling.
    pub subgraph: WeightedHypergraph,
    /// Order in which nodes were popped.
    pub order: Vec<NodeId>,
    /// Density of the remaining graph before each pop.
    pub trace: Vec<f64>,
    /// Number of leading nodes of `order` removed to obtain `subgraph`.
    pub removed: usize,
}

impl PeelingOutcome {
    /// Density of the chosen subgraph.
    pub fn density(&self) -> f64 {
        self.subgraph.density()
    }
}

/// Repeatedly removes the node of minimum weighted degree and keeps the
/// densest intermediate graph.
///
/// Ties in the density trace resolve to the earliest index. The returned
/// subgraph is a strict-policy copy of `graph` with the first `removed`
/// popped nodes deleted.
pub fn greedy_peeling(graph: &WeightedHypergraph, reporter: &dyn Reporter) -> PeelingOutcome {
    let mut ordered = DegeneracyOrderedHypergraph::new(graph);
    let mut order = Vec::with_capacity(graph.node_count());
    let mut trace = Vec::with_capacity(graph.node_count());
    while let Some(node) = ordered.peek_min_id() {
        trace.push(ordered.density());
        ordered.remove_node(node);
        order.push(node);
    }

    let mut best = 0usize;
    for (idx, density) in trace.iter().enumerate() {
        if compare(*density, trace[best]) == Ordering::Greater {
            best = idx;
        }
    }

    let mut subgraph = graph.copy_with_policy(RemovalPolicy::Strict);
    subgraph.remove_node_set(order[..best].iter().copied());
    reporter.report(&Event::Peeled {
        removed: best,
        density: subgraph.density(),
    });
    PeelingOutcome {
        subgraph,
        order,
        trace,
        removed: best,
    }
}

/// Pops minimum-degree nodes while their weighted degree is below `threshold`.
///
/// Returns an independent strict-policy copy of the survivors.
pub fn degree_sieve(
    graph: &WeightedHypergraph,
    threshold: f64,
    reporter: &dyn Reporter,
) -> WeightedHypergraph {
    let mut ordered = DegeneracyOrderedHypergraph::new(graph);
    while let Some(degree) = ordered.min_degree() {
        if compare(degree, threshold) != Ordering::Less {
            break;
        }
        ordered.pop_min();
    }
    let survivors = ordered.into_graph();
    reporter.report(&Event::Sieved {
        threshold,
        nodes: survivors.node_count(),
        edges: survivors.edge_count(),
        density: survivors.density(),
    });
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use dslo_core::report::SilentReporter;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn triangle_with_tail() -> WeightedHypergraph {
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
    fn peeling_keeps_best_prefix() {
        let outcome = greedy_peeling(&triangle_with_tail(), &SilentReporter);
        assert_eq!(outcome.order, vec![n(4), n(1), n(2), n(3)]);
        assert_eq!(outcome.trace.len(), 4);
        assert!((outcome.trace[0] - 1.525).abs() < 1e-12);
        assert!((outcome.trace[1] - 2.0).abs() < 1e-12);
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.subgraph.node_ids(), [n(1), n(2), n(3)].into_iter().collect());
        assert!((outcome.density() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn peeling_empty_graph_returns_empty_copy() {
        let outcome = greedy_peeling(&WeightedHypergraph::new(), &SilentReporter);
        assert!(outcome.subgraph.is_empty());
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.removed, 0);
    }

    #[test]
    fn sieve_drops_low_degree_nodes_only() {
        let sieved = degree_sieve(&triangle_with_tail(), 2.0, &SilentReporter);
        assert_eq!(sieved.node_ids(), [n(1), n(2), n(3)].into_iter().collect());
        assert_eq!(sieved.edge_count(), 2);

        let untouched = degree_sieve(&triangle_with_tail(), 0.0, &SilentReporter);
        assert_eq!(untouched.node_count(), 4);
    }

    #[test]
    fn sieve_may_empty_the_graph() {
        let sieved = degree_sieve(&triangle_with_tail(), 100.0, &SilentReporter);
        assert!(sieved.is_empty());
    }
}

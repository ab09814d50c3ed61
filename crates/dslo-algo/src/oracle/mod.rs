//! Boundary to the fractional densest-subgraph relaxation and the rounding
//! of its answers back into subgraphs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use dslo_core::errors::DsloError;
use dslo_core::report::OracleQuery;
use dslo_core::{compare, EdgeId, NodeId};
use dslo_graph::{RemovalPolicy, WeightedHypergraph};

mod lp;

pub use lp::LpOracle;

/// One-shot request for the density relaxation.
///
/// The program has a variable `y_v ∈ [0, 1]` per node and `x_e ∈ [0, 1]` per
/// edge with `x_e <= y_v` for every member `v` of `e` and
/// `Σ w_v · y_v <= 1`. A basic request maximises `Σ w_e · x_e`; a modified
/// request maximises `y_target` subject to `Σ w_e · x_e >= floor - EPSILON`.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    /// Node weights keyed by id.
    pub node_weights: BTreeMap<NodeId, f64>,
    /// Edge members and weight keyed by id.
    pub edges: BTreeMap<EdgeId, (BTreeSet<NodeId>, f64)>,
    /// Node whose fraction is maximised, for modified requests.
    pub target: Option<NodeId>,
    /// Lower bound on the weighted edge fraction, for modified requests.
    pub floor: Option<f64>,
}

impl OracleRequest {
    /// Builds the plain relaxation of `graph`.
    pub fn basic(graph: &WeightedHypergraph) -> Self {
        Self {
            node_weights: graph.nodes().collect(),
            edges: graph
                .edges()
                .map(|(id, members, weight)| (id, (members.clone(), weight)))
                .collect(),
            target: None,
            floor: None,
        }
    }

    /// Builds the relaxation maximising `target`'s fraction at density `floor`.
    pub fn modified(graph: &WeightedHypergraph, target: NodeId, floor: f64) -> Self {
        Self {
            target: Some(target),
            floor: Some(floor),
            ..Self::basic(graph)
        }
    }

    /// Request shape.
    pub fn query(&self) -> OracleQuery {
        match self.target {
            Some(_) => OracleQuery::Modified,
            None => OracleQuery::Basic,
        }
    }

    /// Number of `(node, edge)` incidence constraints.
    pub fn pair_count(&self) -> usize {
        self.edges.values().map(|(members, _)| members.len()).sum()
    }
}

/// Feasibility status reported by an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleStatus {
    /// An optimal assignment was found.
    Optimal,
    /// The constraints admit no assignment.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
}

/// Fractional node assignment returned by an oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleResponse {
    /// Feasibility status.
    pub status: OracleStatus,
    /// Fraction per node; empty unless `status` is [`OracleStatus::Optimal`].
    pub node_values: BTreeMap<NodeId, f64>,
}

impl OracleResponse {
    /// Response without an assignment.
    pub fn without_solution(status: OracleStatus) -> Self {
        Self {
            status,
            node_values: BTreeMap::new(),
        }
    }

    /// Fraction assigned to `node`, or zero when absent.
    pub fn value(&self, node: NodeId) -> f64 {
        self.node_values.get(&node).copied().unwrap_or(0.0)
    }

    fn max_value(&self) -> f64 {
        self.node_values.values().copied().fold(0.0, f64::max)
    }
}

/// Exact solver for the density relaxation.
///
/// Infeasible and unbounded programs are reported through
/// [`OracleResponse::status`]; `Err` is reserved for solver malfunctions.
pub trait DensityOracle {
    /// Solves one request.
    fn solve(&self, request: &OracleRequest) -> Result<OracleResponse, DsloError>;
}

impl<O: DensityOracle + ?Sized> DensityOracle for &O {
    fn solve(&self, request: &OracleRequest) -> Result<OracleResponse, DsloError> {
        (**self).solve(request)
    }
}

/// Outcome of rounding an oracle answer into a subgraph.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// A rounded subgraph, independent of the graph it came from.
    Found(WeightedHypergraph),
    /// A dropped node carried a fractional value, so the optimum is not a
    /// unique integral one.
    NotUnique,
    /// The oracle reported no usable optimum.
    Infeasible,
}

impl Extraction {
    /// Returns the subgraph, if one was found.
    pub fn found(self) -> Option<WeightedHypergraph> {
        match self {
            Extraction::Found(graph) => Some(graph),
            Extraction::NotUnique | Extraction::Infeasible => None,
        }
    }
}

/// Keeps the nodes whose fraction ties the maximum fraction, relative to it.
pub fn round_basic(graph: &WeightedHypergraph, response: &OracleResponse) -> Extraction {
    round_top_level(graph, response, false)
}

/// Like [`round_basic`], but reports [`Extraction::NotUnique`] when a dropped
/// node has a fraction strictly between zero and the maximum.
pub fn round_basic_checked(graph: &WeightedHypergraph, response: &OracleResponse) -> Extraction {
    round_top_level(graph, response, true)
}

fn round_top_level(
    graph: &WeightedHypergraph,
    response: &OracleResponse,
    require_integral: bool,
) -> Extraction {
    if response.status != OracleStatus::Optimal {
        return Extraction::Infeasible;
    }
    let top = response.max_value();
    // levels are compared relative to the top fraction
    let level = |node: NodeId| {
        let value = response.value(node);
        if top > 0.0 {
            value / top
        } else {
            value
        }
    };
    let full = if top > 0.0 { 1.0 } else { 0.0 };
    let mut dropped = Vec::new();
    for (node, _) in graph.nodes() {
        let value = level(node);
        if compare(value, full) == Ordering::Less {
            if require_integral && compare(value, 0.0) != Ordering::Equal {
                return Extraction::NotUnique;
            }
            dropped.push(node);
        }
    }
    let mut rounded = graph.copy_with_policy(RemovalPolicy::Strict);
    rounded.remove_node_set(dropped);
    Extraction::Found(rounded)
}

/// Rounds a modified-request answer.
///
/// Yields [`Extraction::Infeasible`] when the program had no optimum or the
/// target's fraction is zero. Otherwise keeps the nodes with a positive
/// fraction, falling back to a copy of `graph` when that rounding loses
/// density below `floor`.
pub fn round_modified(
    graph: &WeightedHypergraph,
    target: NodeId,
    floor: f64,
    response: &OracleResponse,
) -> Extraction {
    if response.status != OracleStatus::Optimal
        || compare(response.value(target), 0.0) == Ordering::Equal
    {
        return Extraction::Infeasible;
    }
    let mut rounded = graph.copy_with_policy(RemovalPolicy::Strict);
    let dropped: Vec<NodeId> = graph
        .nodes()
        .map(|(node, _)| node)
        .filter(|node| compare(response.value(*node), 0.0) == Ordering::Equal)
        .collect();
    rounded.remove_node_set(dropped);
    if compare(rounded.density(), floor) == Ordering::Less {
        return Extraction::Found(graph.copy_with_policy(RemovalPolicy::Strict));
    }
    Extraction::Found(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn path() -> WeightedHypergraph {
        let mut graph = WeightedHypergraph::new();
        for id in 0..3 {
            graph.add_node(n(id), 1.0).unwrap();
        }
        graph.push_edge(&[n(0), n(1)], 2.0).unwrap();
        graph.push_edge(&[n(1), n(2)], 1.0).unwrap();
        graph
    }

    fn response(values: &[(u64, f64)]) -> OracleResponse {
        OracleResponse {
            status: OracleStatus::Optimal,
            node_values: values.iter().map(|(id, value)| (n(*id), *value)).collect(),
        }
    }

    #[test]
    fn basic_rounding_keeps_top_level_within_tolerance() {
        let graph = path();
        let answer = response(&[(0, 0.5), (1, 0.5 - 1e-9), (2, 0.25)]);
        let rounded = round_basic(&graph, &answer).found().unwrap();
        assert_eq!(rounded.node_ids(), [n(0), n(1)].into_iter().collect());
        assert!(matches!(round_basic_checked(&graph, &answer), Extraction::NotUnique));

        let integral = response(&[(0, 0.5), (1, 0.5), (2, 0.0)]);
        assert!(matches!(round_basic_checked(&graph, &integral), Extraction::Found(_)));
    }

    #[test]
    fn basic_rounding_separates_small_levels() {
        let graph = path();
        let answer = response(&[(0, 1e-4), (1, 1e-4), (2, 1e-4 - 1e-8)]);
        let rounded = round_basic(&graph, &answer).found().unwrap();
        assert_eq!(rounded.node_ids(), [n(0), n(1)].into_iter().collect());
    }

    #[test]
    fn modified_rounding_handles_zero_target_and_lost_density() {
        let graph = path();
        let zero = response(&[(0, 0.5), (1, 0.5), (2, 0.0)]);
        assert!(matches!(round_modified(&graph, n(2), 1.0, &zero), Extraction::Infeasible));

        let kept = round_modified(&graph, n(0), 1.0, &zero).found().unwrap();
        assert_eq!(kept.node_count(), 2);

        // {1, 2} has density 0.5 < 1.0, so the whole graph comes back
        let lossy = response(&[(0, 0.0), (1, 0.4), (2, 0.4)]);
        let fallback = round_modified(&graph, n(2), 1.0, &lossy).found().unwrap();
        assert_eq!(fallback.node_count(), 3);

        let infeasible = OracleResponse::without_solution(OracleStatus::Infeasible);
        assert!(matches!(round_modified(&graph, n(0), 1.0, &infeasible), Extraction::Infeasible));
    }

    #[test]
    fn requests_describe_the_program() {
        let graph = path();
        let request = OracleRequest::modified(&graph, n(1), 1.0);
        assert_eq!(request.query(), OracleQuery::Modified);
        assert_eq!(request.pair_count(), 4);
        assert_eq!(OracleRequest::basic(&graph).query(), OracleQuery::Basic);
    }
}

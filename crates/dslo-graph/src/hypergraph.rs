use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use dslo_core::errors::DsloError;
use dslo_core::rng::RngHandle;
use dslo_core::{compare, EdgeId, NodeId};

use crate::ids::{canonicalize_nodes, graph_error, unknown_edge, unknown_node};
use crate::policy::RemovalPolicy;

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    weight: f64,
    edge_weight: f64,
    edges: BTreeSet<EdgeId>,
}

impl NodeRecord {
    fn new(weight: f64) -> Self {
        Self {
            weight,
            edge_weight: 0.0,
            edges: BTreeSet::new(),
        }
    }

    fn connect(&mut self, edge: EdgeId, weight: f64) {
        if self.edges.insert(edge) {
            self.edge_weight += weight;
        }
    }

    fn cut(&mut self, edge: EdgeId, weight: f64) {
        if self.edges.remove(&edge) {
            self.edge_weight -= weight;
        }
    }

    fn degree(&self) -> f64 {
        if compare(self.weight, 0.0) == Ordering::Equal {
            return 0.0;
        }
        self.edge_weight / self.weight
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    weight: f64,
    nodes: BTreeSet<NodeId>,
}

impl EdgeRecord {
    pub(crate) fn members(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }
}

/// Mutable weighted hypergraph owning all of its node and edge records.
///
/// Records are addressed by id only; every copy is a deep clone of the arena.
/// Running totals for node and edge weight are kept in step with every
/// mutation so that [`density`](Self::density) is `O(1)`.
#[derive(Debug)]
pub struct WeightedHypergraph {
    policy: RemovalPolicy,
    nodes: BTreeMap<NodeId, NodeRecord>,
    edges: BTreeMap<EdgeId, EdgeRecord>,
    node_weight: f64,
    edge_weight: f64,
    next_edge: u64,
}

impl WeightedHypergraph {
    /// Creates an empty graph using the strict removal policy.
    pub fn new() -> Self {
        Self::with_policy(RemovalPolicy::Strict)
    }

    /// Creates an empty graph with the provided removal policy.
    pub fn with_policy(policy: RemovalPolicy) -> Self {
        Self {
            policy,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            node_weight: 0.0,
            edge_weight: 0.0,
            next_edge: 0,
        }
    }

    /// Returns a deep copy of this graph that removes nodes under `policy`.
    pub fn copy_with_policy(&self, policy: RemovalPolicy) -> Self {
        let mut copy = self.clone();
        copy.policy = policy;
        copy
    }

    /// Returns the removal policy selected at construction.
    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    /// Adds a node with the given weight.
    pub fn add_node(&mut self, id: NodeId, weight: f64) -> Result<(), DsloError> {
        if self.nodes.contains_key(&id) {
            return Err(graph_error("duplicate-node", "node already exists").with_node(id));
        }
        if !(weight >= 0.0) {
            return Err(graph_error("negative-weight", "node weight must be non-negative")
                .with_node(id));
        }
        self.nodes.insert(id, NodeRecord::new(weight));
        self.node_weight += weight;
        Ok(())
    }

    /// Adds an edge under an explicit identifier.
    ///
    /// Fails without mutating the graph when the id is taken, the member list is
    /// empty or any member is absent.
    pub fn add_edge(&mut self, nodes: &[NodeId], weight: f64, id: EdgeId) -> Result<EdgeId, DsloError> {
        if self.edges.contains_key(&id) {
            return Err(
                graph_error("duplicate-edge", "edge id already in use").with_edge(id)
            );
        }
        if nodes.is_empty() {
            return Err(graph_error("empty-edge", "edges require at least one node").with_edge(id));
        }
        if !(weight >= 0.0) {
            return Err(graph_error("negative-weight", "edge weight must be non-negative")
                .with_edge(id));
        }
        let members = canonicalize_nodes(nodes);
        if let Some(missing) = members.iter().find(|node| !self.nodes.contains_key(node)) {
            return Err(unknown_node(*missing));
        }
        for node in &members {
            if let Some(record) = self.nodes.get_mut(node) {
                record.connect(id, weight);
            }
        }
        self.edges.insert(id, EdgeRecord { weight, nodes: members });
        self.edge_weight += weight;
        Ok(id)
    }

    /// Adds an edge under the next unused identifier.
    pub fn push_edge(&mut self, nodes: &[NodeId], weight: f64) -> Result<EdgeId, DsloError> {
        let id = self.assign_edge_id();
        self.add_edge(nodes, weight, id)
    }

    fn assign_edge_id(&mut self) -> EdgeId {
        while self.edges.contains_key(&EdgeId::from_raw(self.next_edge)) {
            self.next_edge += 1;
        }
        EdgeId::from_raw(self.next_edge)
    }

    /// Removes every listed node under the graph's removal policy.
    ///
    /// Ids that are already absent are ignored.
    pub fn remove_node_set<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for id in ids {
            self.erase_node(id);
        }
    }

    /// Removes a single node under the graph's removal policy.
    ///
    /// Returns the surviving nodes whose incident edge weight changed, or `None`
    /// when the node was absent.
    pub(crate) fn erase_node(&mut self, id: NodeId) -> Option<BTreeSet<NodeId>> {
        let record = self.nodes.get(&id)?;
        let incident: Vec<EdgeId> = record.edges.iter().copied().collect();
        let mut touched = BTreeSet::new();
        match self.policy {
            RemovalPolicy::Strict => {
                for edge in incident {
                    if let Some(removed) = self.erase_edge(edge) {
                        touched.extend(removed.nodes);
                    }
                }
            }
            RemovalPolicy::Pruning => {
                for edge in incident {
                    let now_empty = match self.edges.get_mut(&edge) {
                        Some(record) => {
                            record.nodes.remove(&id);
                            record.nodes.is_empty()
                        }
                        None => continue,
                    };
                    if now_empty {
                        self.erase_edge(edge);
                    }
                }
            }
        }
        touched.remove(&id);
        if let Some(record) = self.nodes.remove(&id) {
            self.node_weight -= record.weight;
        }
        Some(touched)
    }

    /// Removes an edge, detaching it from every member node.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), DsloError> {
        self.erase_edge(id).map(|_| ()).ok_or_else(|| unknown_edge(id))
    }

    pub(crate) fn erase_edge(&mut self, id: EdgeId) -> Option<EdgeRecord> {
        let record = self.edges.remove(&id)?;
        for node in &record.nodes {
            if let Some(member) = self.nodes.get_mut(node) {
                member.cut(id, record.weight);
            }
        }
        self.edge_weight -= record.weight;
        Some(record)
    }

    /// Returns a graph holding copies of this graph's nodes and no edges.
    pub fn node_skeleton(&self) -> Self {
        let mut skeleton = Self::with_policy(self.policy);
        for (id, record) in &self.nodes {
            skeleton.nodes.insert(*id, NodeRecord::new(record.weight));
        }
        skeleton.node_weight = self.node_weight;
        skeleton
    }

    /// Returns whether the graph has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Returns whether the node exists.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns whether the edge exists.
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of (node, edge) incidences.
    pub fn incidence_count(&self) -> usize {
        self.edges.values().map(|edge| edge.nodes.len()).sum()
    }

    /// Returns the total node weight.
    pub fn node_weight_total(&self) -> f64 {
        self.node_weight
    }

    /// Returns the total edge weight.
    pub fn edge_weight_total(&self) -> f64 {
        self.edge_weight
    }

    /// Total edge weight divided by total node weight, or zero for weightless graphs.
    pub fn density(&self) -> f64 {
        if compare(self.node_weight, 0.0) == Ordering::Equal {
            return 0.0;
        }
        self.edge_weight / self.node_weight
    }

    /// Returns the set of node identifiers.
    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Returns the edge identifiers in ascending order.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// Iterates over `(id, weight)` for every node.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.nodes.iter().map(|(id, record)| (*id, record.weight))
    }

    /// Iterates over `(id, members, weight)` for every edge.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &BTreeSet<NodeId>, f64)> + '_ {
        self.edges
            .iter()
            .map(|(id, record)| (*id, &record.nodes, record.weight))
    }

    /// Returns a uniformly random node, or `None` for a graph without nodes.
    pub fn random_node_id(&self, rng: &mut RngHandle) -> Option<NodeId> {
        let rank = rng.index(self.nodes.len())?;
        self.nodes.keys().nth(rank).copied()
    }

    /// Returns the node's incident edge weight divided by its own weight.
    pub fn weighted_degree(&self, id: NodeId) -> Result<f64, DsloError> {
        Ok(self.node(id)?.degree())
    }

    /// Returns the node's own weight.
    pub fn node_weight(&self, id: NodeId) -> Result<f64, DsloError> {
        Ok(self.node(id)?.weight)
    }

    /// Returns the edges incident to the node.
    pub fn incident_edges(&self, id: NodeId) -> Result<&BTreeSet<EdgeId>, DsloError> {
        Ok(&self.node(id)?.edges)
    }

    /// Returns the member nodes of an edge.
    pub fn edge_members(&self, id: EdgeId) -> Result<&BTreeSet<NodeId>, DsloError> {
        Ok(&self.edge(id)?.nodes)
    }

    /// Returns the weight of an edge.
    pub fn edge_weight(&self, id: EdgeId) -> Result<f64, DsloError> {
        Ok(self.edge(id)?.weight)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeRecord, DsloError> {
        self.nodes.get(&id).ok_or_else(|| unknown_node(id))
    }

    pub(crate) fn edge(&self, id: EdgeId) -> Result<&EdgeRecord, DsloError> {
        self.edges.get(&id).ok_or_else(|| unknown_edge(id))
    }

    /// Number of edges incident to the node, ignoring weights.
    pub(crate) fn unweighted_degree(&self, id: NodeId) -> usize {
        self.nodes.get(&id).map(|record| record.edges.len()).unwrap_or(0)
    }
}

impl Default for WeightedHypergraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WeightedHypergraph {
    fn clone(&self) -> Self {
        let next_edge = self
            .edges
            .keys()
            .next_back()
            .map(|id| id.as_raw() + 1)
            .unwrap_or(0);
        Self {
            policy: self.policy,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            node_weight: self.node_weight,
            edge_weight: self.edge_weight,
            next_edge,
        }
    }
}

impl fmt::Display for WeightedHypergraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hypergraph{{")?;
        for (id, record) in &self.nodes {
            write!(f, "node({id}){{ ")?;
            for edge in &record.edges {
                write!(f, "{edge} ")?;
            }
            writeln!(f, "}} - {:.6}", record.weight)?;
        }
        for (id, record) in &self.edges {
            write!(f, "edge({id}){{ ")?;
            for node in &record.nodes {
                write!(f, "{node} ")?;
            }
            writeln!(f, "}} - {:.6}", record.weight)?;
        }
        write!(f, "}}")
    }
}

trait ContextExt {
    fn with_node(self, node: NodeId) -> DsloError;
    fn with_edge(self, edge: EdgeId) -> DsloError;
}

impl ContextExt for DsloError {
    fn with_node(self, node: NodeId) -> DsloError {
        match self {
            DsloError::Graph(info) => DsloError::Graph(info.with_context("node", node)),
            other => other,
        }
    }

    fn with_edge(self, edge: EdgeId) -> DsloError {
        match self {
            DsloError::Graph(info) => DsloError::Graph(info.with_context("edge", edge)),
            other => other,
        }
    }
}

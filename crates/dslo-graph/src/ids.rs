use std::collections::BTreeSet;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::{EdgeId, NodeId};

/// Sorts and deduplicates an edge member list.
pub(crate) fn canonicalize_nodes(nodes: &[NodeId]) -> BTreeSet<NodeId> {
    nodes.iter().copied().collect()
}

pub(crate) fn graph_error(code: impl Into<String>, message: impl Into<String>) -> DsloError {
    DsloError::Graph(ErrorInfo::new(code, message))
}

pub(crate) fn unknown_node(node: NodeId) -> DsloError {
    DsloError::Graph(ErrorInfo::new("unknown-node", "node does not exist").with_context("node", node))
}

pub(crate) fn unknown_edge(edge: EdgeId) -> DsloError {
    DsloError::Graph(ErrorInfo::new("unknown-edge", "edge does not exist").with_context("edge", edge))
}

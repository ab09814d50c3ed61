use serde::{Deserialize, Serialize};

/// How a [`WeightedHypergraph`](crate::WeightedHypergraph) reacts to node removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Removing a node deletes every edge incident to it.
    #[default]
    Strict,
    /// Removing a node only strips it from incident edges; an edge is deleted
    /// once its member set becomes empty.
    Pruning,
}

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use dslo_core::NodeId;
use ordered_float::OrderedFloat;

/// Min-priority structure keyed by weighted degree with lazy invalidation.
///
/// Every push or update stamps the entry with a fresh version. Superseded
/// entries stay in the binary heap until they surface at the top, where they
/// are discarded because their stamp no longer matches the live one.
#[derive(Debug, Clone, Default)]
pub struct DegeneracyHeap {
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId, u64)>>,
    live: BTreeMap<NodeId, (f64, u64)>,
    stamp: u64,
}

impl DegeneracyHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the key for `node`.
    pub fn push(&mut self, node: NodeId, key: f64) {
        self.stamp += 1;
        self.live.insert(node, (key, self.stamp));
        self.heap.push(Reverse((OrderedFloat(key), node, self.stamp)));
    }

    /// Re-keys a node that is still present; returns `false` for erased nodes.
    pub fn update(&mut self, node: NodeId, key: f64) -> bool {
        if !self.live.contains_key(&node) {
            return false;
        }
        self.push(node, key);
        true
    }

    /// Drops the node; its physical entries are discarded lazily.
    pub fn erase(&mut self, node: NodeId) -> bool {
        self.live.remove(&node).is_some()
    }

    /// Returns the current key of a live node.
    pub fn key(&self, node: NodeId) -> Option<f64> {
        self.live.get(&node).map(|(key, _)| *key)
    }

    /// Returns the live node with the smallest key (ties broken by id).
    pub fn peek_min(&mut self) -> Option<(NodeId, f64)> {
        self.discard_stale();
        self.heap
            .peek()
            .map(|Reverse((key, node, _))| (*node, key.into_inner()))
    }

    /// Removes and returns the live node with the smallest key.
    pub fn pop_min(&mut self) -> Option<(NodeId, f64)> {
        self.discard_stale();
        let Reverse((key, node, _)) = self.heap.pop()?;
        self.live.remove(&node);
        Some((node, key.into_inner()))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns whether no live node remains.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of superseded entries still physically stored.
    pub fn stale_entries(&self) -> usize {
        self.heap.len().saturating_sub(self.live.len())
    }

    fn discard_stale(&mut self) {
        while let Some(&Reverse((_, node, stamp))) = self.heap.peek() {
            match self.live.get(&node) {
                Some(&(_, live)) if live == stamp => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

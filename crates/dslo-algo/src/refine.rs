use std::cmp::Ordering;

use dslo_core::errors::DsloError;
use dslo_core::{compare, NodeId};
use dslo_graph::{RemovalPolicy, WeightedHypergraph};

use crate::engine::Engine;
use crate::oracle::DensityOracle;

impl<'r, O: DensityOracle> Engine<'r, O> {
    /// Deletes `node` from a copy of `graph` and re-solves.
    ///
    /// Returns the re-solved subgraph only when it is non-empty and still
    /// reaches `rho_max`.
    pub fn try_remove(
        &self,
        node: NodeId,
        graph: &WeightedHypergraph,
        rho_max: f64,
    ) -> Result<Option<WeightedHypergraph>, DsloError> {
        let mut without = graph.copy_with_policy(RemovalPolicy::Strict);
        without.remove_node_set([node]);
        if without.node_count() == 0 {
            return Ok(None);
        }
        let candidate = self.basic(&without)?;
        if candidate.node_count() == 0 || compare(candidate.density(), rho_max) == Ordering::Less {
            return Ok(None);
        }
        Ok(Some(candidate))
    }

    /// Pushes `node`'s fraction as high as the density floor `rho_max`
    /// allows and rounds the answer.
    ///
    /// `None` means `node` cannot take part in a subgraph of that density.
    pub fn try_enhance(
        &self,
        node: NodeId,
        graph: &WeightedHypergraph,
        rho_max: f64,
    ) -> Result<Option<WeightedHypergraph>, DsloError> {
        Ok(self.modified(graph, node, rho_max)?.found())
    }

    /// Returns one maximum-density subgraph of `graph`.
    pub fn densest_subgraph(&self, graph: &WeightedHypergraph) -> Result<WeightedHypergraph, DsloError> {
        let sieved = self.sieve(graph);
        self.basic(&sieved)
    }

    /// Shrinks a maximum-density subgraph of `graph` to an inclusion-minimal one.
    ///
    /// Each step picks a random node `u` of the current candidate `h`: if
    /// dropping `u` keeps the maximum density, the loop continues with the
    /// lighter of the shrunken candidate and the candidate built around `u`;
    /// otherwise `u` belongs to every optimum inside `h` and the candidate
    /// built around it is the answer.
    pub fn find_minimal(&mut self, graph: &WeightedHypergraph) -> Result<WeightedHypergraph, DsloError> {
        let mut current = self.densest_subgraph(graph)?;
        let rho_max = current.density();
        loop {
            if current.node_count() <= 1 {
                return Ok(current);
            }
            let Some(node) = self.random_node(&current) else {
                return Ok(current);
            };
            let shrunk = self.try_remove(node, &current, rho_max)?;
            let enhanced = self.try_enhance(node, &current, rho_max)?;
            let Some(shrunk) = shrunk else {
                return Ok(enhanced.unwrap_or(current));
            };
            current = match enhanced {
                Some(enhanced)
                    if compare(shrunk.node_weight_total(), enhanced.node_weight_total())
                        != Ordering::Less
                        && enhanced.node_count() < current.node_count() =>
                {
                    enhanced
                }
                _ => shrunk,
            };
        }
    }

    /// Collects disjoint minimal subgraphs attaining the maximum density.
    ///
    /// Certificates are found on a shrinking working copy, which loses each
    /// certificate's nodes under the strict policy, until the next certificate
    /// falls below the first one's density.
    pub fn find_all_minimal(
        &mut self,
        graph: &WeightedHypergraph,
    ) -> Result<Vec<WeightedHypergraph>, DsloError> {
        let mut working = graph.copy_with_policy(RemovalPolicy::Strict);
        let mut found: Vec<WeightedHypergraph> = Vec::new();
        while working.node_count() > 0 {
            let minimal = self.find_minimal(&working)?;
            if minimal.node_count() == 0 {
                break;
            }
            if let Some(first) = found.first() {
                if compare(minimal.density(), first.density()) == Ordering::Less {
                    break;
                }
            }
            working.remove_node_set(minimal.node_ids());
            found.push(minimal);
        }
        Ok(found)
    }
}

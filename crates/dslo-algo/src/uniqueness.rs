use std::cmp::Ordering;
use std::fmt;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::compare;
use dslo_graph::{RemovalPolicy, WeightedHypergraph};

use crate::engine::Engine;
use crate::oracle::{DensityOracle, Extraction};

/// Substream used for the random node choice of a uniqueness check.
const UNIQUENESS_SUBSTREAM: u64 = u64::MAX;

/// Why a maximum-density subgraph was found not to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonUniqueReason {
    /// The relaxation's optimum left a node at a fractional value.
    NonIntegralOptimum,
    /// The chosen node could be dropped without losing the maximum density.
    AlternativeOptimum,
    /// The graph left after excising the certificate reaches the same density.
    ResidualTie,
}

impl fmt::Display for NonUniqueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NonUniqueReason::NonIntegralOptimum => "the relaxation has a fractional optimum",
            NonUniqueReason::AlternativeOptimum => "a smaller subgraph attains the same density",
            NonUniqueReason::ResidualTie => "the remaining graph attains the same density",
        };
        f.write_str(text)
    }
}

/// Verdict of [`check_uniqueness`].
#[derive(Debug, Clone)]
pub enum Uniqueness {
    /// Exactly one subgraph attains the maximum density.
    Unique {
        /// The unique maximiser.
        certificate: WeightedHypergraph,
    },
    /// At least two subgraphs attain the maximum density.
    NotUnique {
        /// Which check disproved uniqueness.
        reason: NonUniqueReason,
    },
}

impl Uniqueness {
    /// Returns whether the maximiser is unique.
    pub fn is_unique(&self) -> bool {
        matches!(self, Uniqueness::Unique { .. })
    }
}

/// Decides whether `graph` has exactly one maximum-density subgraph.
///
/// A single refinement step yields a certificate `D`; `D`'s nodes are then
/// pruned from a copy of `graph` and the residual's maximum density must fall
/// strictly below `D`'s.
pub fn check_uniqueness<O: DensityOracle>(
    engine: &mut Engine<'_, O>,
    graph: &WeightedHypergraph,
) -> Result<Uniqueness, DsloError> {
    engine.reseed(UNIQUENESS_SUBSTREAM);
    let sieved = engine.sieve(graph);
    let candidate = match engine.basic_checked(&sieved)? {
        Extraction::Found(candidate) => candidate,
        Extraction::NotUnique => {
            return Ok(Uniqueness::NotUnique {
                reason: NonUniqueReason::NonIntegralOptimum,
            })
        }
        Extraction::Infeasible => {
            return Err(DsloError::Oracle(ErrorInfo::new(
                "solver-failure",
                "basic program returned no optimum",
            )))
        }
    };
    let rho_max = candidate.density();

    let certificate = match engine.random_node(&candidate) {
        Some(node) if candidate.node_count() > 1 => {
            if engine.try_remove(node, &candidate, rho_max)?.is_some() {
                return Ok(Uniqueness::NotUnique {
                    reason: NonUniqueReason::AlternativeOptimum,
                });
            }
            engine
                .try_enhance(node, &candidate, rho_max)?
                .unwrap_or(candidate)
        }
        _ => candidate,
    };

    let mut residual = graph.copy_with_policy(RemovalPolicy::Pruning);
    residual.remove_node_set(certificate.node_ids());
    if residual.edge_count() == 0 {
        return Ok(Uniqueness::Unique { certificate });
    }
    let runner_up = engine.densest_subgraph(&residual)?;
    if compare(rho_max, runner_up.density()) == Ordering::Greater {
        Ok(Uniqueness::Unique { certificate })
    } else {
        Ok(Uniqueness::NotUnique {
            reason: NonUniqueReason::ResidualTie,
        })
    }
}

#[cfg(test)]
mod tests {
    use dslo_core::report::SilentReporter;
    use dslo_core::NodeId;

    use super::*;
    use crate::oracle::LpOracle;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn single_heavy_block_is_unique() {
        let mut graph = WeightedHypergraph::new();
        for id in 1..=4 {
            graph.add_node(n(id), 1.0).unwrap();
        }
        graph.push_edge(&[n(1), n(2)], 3.0).unwrap();
        graph.push_edge(&[n(2), n(3)], 3.0).unwrap();
        graph.push_edge(&[n(1), n(2), n(3), n(4)], 0.1).unwrap();
        let mut engine = Engine::new(LpOracle, 0, &SilentReporter);
        match check_uniqueness(&mut engine, &graph).unwrap() {
            Uniqueness::Unique { certificate } => {
                assert_eq!(certificate.node_ids(), [n(1), n(2), n(3)].into_iter().collect());
            }
            other => panic!("expected a unique maximiser, got {other:?}"),
        }
    }

    #[test]
    fn isolated_node_graph_is_unique() {
        let mut graph = WeightedHypergraph::new();
        graph.add_node(n(0), 1.0).unwrap();
        graph.push_edge(&[n(0)], 2.0).unwrap();
        let mut engine = Engine::new(LpOracle, 0, &SilentReporter);
        assert!(check_uniqueness(&mut engine, &graph).unwrap().is_unique());
    }

    #[test]
    fn reasons_render_for_operators() {
        assert_eq!(
            NonUniqueReason::ResidualTie.to_string(),
            "the remaining graph attains the same density"
        );
    }
}

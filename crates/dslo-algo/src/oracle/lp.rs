use std::collections::BTreeMap;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::{NodeId, EPSILON};
use good_lp::solvers::microlp::microlp;
use good_lp::{
    variable, Expression, IntoAffineExpression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use super::{DensityOracle, OracleRequest, OracleResponse, OracleStatus};

/// Density oracle backed by the pure-Rust simplex solver shipped with `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LpOracle;

impl LpOracle {
    /// Creates the oracle.
    pub fn new() -> Self {
        Self
    }
}

fn oracle_error(code: &str, message: impl Into<String>) -> DsloError {
    DsloError::Oracle(ErrorInfo::new(code, message))
}

/// Smallest positive node weight, used as the budget of the program.
///
/// With the budget at `c` every positive-weight node stays at or below
/// `c / w_v <= 1`, so the unit caps never bind and the optimum is `c` times
/// the maximum density.
fn budget_scale(request: &OracleRequest) -> Option<f64> {
    request
        .node_weights
        .values()
        .copied()
        .filter(|weight| *weight > 0.0)
        .reduce(f64::min)
}

impl DensityOracle for LpOracle {
    fn solve(&self, request: &OracleRequest) -> Result<OracleResponse, DsloError> {
        let Some(scale) = budget_scale(request) else {
            return Ok(OracleResponse {
                status: OracleStatus::Optimal,
                node_values: request.node_weights.keys().map(|node| (*node, 0.0)).collect(),
            });
        };

        let mut vars = ProblemVariables::new();
        let mut node_vars: BTreeMap<NodeId, Variable> = BTreeMap::new();
        let mut node_sum = Expression::from(0.0);
        for (node, weight) in &request.node_weights {
            let y = vars.add(variable().min(0.0).max(1.0));
            node_sum += *weight * y;
            node_vars.insert(*node, y);
        }

        // weightless members never bind an edge; edges with only weightless
        // members stay out of the program
        let mut edge_sum = Expression::from(0.0);
        let mut edge_vars: Vec<(Variable, Vec<NodeId>)> = Vec::with_capacity(request.edges.len());
        let mut incidence = Vec::with_capacity(request.pair_count());
        for (edge, (members, weight)) in &request.edges {
            let mut binding = Vec::with_capacity(members.len());
            let mut weightless = Vec::new();
            for member in members {
                let y = node_vars.get(member).copied().ok_or_else(|| {
                    DsloError::Oracle(
                        ErrorInfo::new("unknown-node", "edge member missing from request")
                            .with_context("edge", edge)
                            .with_context("node", member),
                    )
                })?;
                if request.node_weights.get(member).copied().unwrap_or(0.0) > 0.0 {
                    binding.push(y);
                } else {
                    weightless.push(*member);
                }
            }
            if binding.is_empty() {
                continue;
            }
            let x = vars.add(variable().min(0.0).max(1.0));
            edge_sum += *weight * x;
            for y in binding {
                incidence.push((x.into_expression() - y).leq(0.0));
            }
            edge_vars.push((x, weightless));
        }

        let objective = match request.target {
            Some(target) => node_vars
                .get(&target)
                .copied()
                .ok_or_else(|| {
                    DsloError::Oracle(
                        ErrorInfo::new("unknown-node", "target node missing from request")
                            .with_context("node", target),
                    )
                })?
                .into_expression(),
            None => edge_sum.clone(),
        };

        let mut model = vars.maximise(objective).using(microlp);
        for constraint in incidence {
            model.add_constraint(constraint);
        }
        model.add_constraint(node_sum.leq(scale));
        if let Some(floor) = request.floor {
            model.add_constraint(edge_sum.geq((floor - EPSILON) * scale));
        }

        match model.solve() {
            Ok(solution) => {
                let mut node_values: BTreeMap<NodeId, f64> = node_vars
                    .iter()
                    .map(|(node, y)| {
                        let positive = request.node_weights.get(node).copied().unwrap_or(0.0) > 0.0;
                        (*node, if positive { solution.value(*y) } else { 0.0 })
                    })
                    .collect();
                // a weightless node sits at the highest level of the edges it joins
                for (x, weightless) in &edge_vars {
                    let level = solution.value(*x);
                    for node in weightless {
                        if let Some(value) = node_values.get_mut(node) {
                            *value = value.max(level);
                        }
                    }
                }
                Ok(OracleResponse {
                    status: OracleStatus::Optimal,
                    node_values,
                })
            }
            Err(ResolutionError::Infeasible) => {
                Ok(OracleResponse::without_solution(OracleStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(OracleResponse::without_solution(OracleStatus::Unbounded))
            }
            Err(err) => Err(oracle_error("solver-failure", err.to_string())),
        }
    }
}

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::report::{Event, Reporter};
use dslo_core::rng::RngHandle;
use dslo_core::NodeId;
use dslo_graph::WeightedHypergraph;

use crate::greedy::{degree_sieve, greedy_peeling};
use crate::oracle::{
    round_basic, round_basic_checked, round_modified, DensityOracle, Extraction, OracleRequest,
};

/// Oracle, randomness and reporting shared by every extraction routine.
///
/// Random choices draw from a substream of the master seed; callers switch
/// substreams with [`Engine::reseed`] so that each extraction round is
/// reproducible on its own.
pub struct Engine<'r, O> {
    oracle: O,
    seed: u64,
    rng: RngHandle,
    reporter: &'r dyn Reporter,
}

impl<'r, O: DensityOracle> Engine<'r, O> {
    /// Creates an engine drawing from substream zero of `seed`.
    pub fn new(oracle: O, seed: u64, reporter: &'r dyn Reporter) -> Self {
        Self {
            oracle,
            seed,
            rng: RngHandle::substream(seed, 0),
            reporter,
        }
    }

    /// Switches random choices to another substream of the master seed.
    pub fn reseed(&mut self, substream: u64) {
        self.rng = RngHandle::substream(self.seed, substream);
    }

    /// Master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Progress sink.
    pub fn reporter(&self) -> &'r dyn Reporter {
        self.reporter
    }

    pub(crate) fn random_node(&mut self, graph: &WeightedHypergraph) -> Option<NodeId> {
        graph.random_node_id(&mut self.rng)
    }

    /// Greedy density estimate followed by the degree sieve at that estimate.
    pub fn sieve(&self, graph: &WeightedHypergraph) -> WeightedHypergraph {
        let estimate = greedy_peeling(graph, self.reporter).density();
        degree_sieve(graph, estimate, self.reporter)
    }

    /// Solves the basic program on `graph` and keeps its top fraction level.
    pub fn basic(&self, graph: &WeightedHypergraph) -> Result<WeightedHypergraph, DsloError> {
        match self.basic_rounded(graph, false)? {
            Extraction::Found(rounded) => Ok(rounded),
            Extraction::NotUnique | Extraction::Infeasible => Err(DsloError::Oracle(
                ErrorInfo::new("solver-failure", "basic program returned no optimum")
                    .with_context("nodes", graph.node_count())
                    .with_context("edges", graph.edge_count()),
            )),
        }
    }

    /// Solves the basic program and rounds it, flagging fractional leftovers.
    pub fn basic_checked(&self, graph: &WeightedHypergraph) -> Result<Extraction, DsloError> {
        self.basic_rounded(graph, true)
    }

    fn basic_rounded(
        &self,
        graph: &WeightedHypergraph,
        require_integral: bool,
    ) -> Result<Extraction, DsloError> {
        let request = OracleRequest::basic(graph);
        let response = self.oracle.solve(&request)?;
        let extraction = if require_integral {
            round_basic_checked(graph, &response)
        } else {
            round_basic(graph, &response)
        };
        self.report_solve(&request, &extraction);
        Ok(extraction)
    }

    /// Solves the modified program for `target` at density `floor` and rounds it.
    pub fn modified(
        &self,
        graph: &WeightedHypergraph,
        target: NodeId,
        floor: f64,
    ) -> Result<Extraction, DsloError> {
        let request = OracleRequest::modified(graph, target, floor);
        let response = self.oracle.solve(&request)?;
        let extraction = round_modified(graph, target, floor, &response);
        self.report_solve(&request, &extraction);
        Ok(extraction)
    }

    fn report_solve(&self, request: &OracleRequest, extraction: &Extraction) {
        let density = match extraction {
            Extraction::Found(graph) => Some(graph.density()),
            Extraction::NotUnique | Extraction::Infeasible => None,
        };
        self.reporter.report(&Event::OracleSolved {
            query: request.query(),
            nodes: request.node_weights.len(),
            edges: request.edges.len(),
            pairs: request.pair_count(),
            density,
        });
    }
}

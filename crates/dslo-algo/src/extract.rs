use std::cmp::Ordering;
use std::fmt;

use dslo_core::errors::DsloError;
use dslo_core::report::{Event, Reporter};
use dslo_core::compare;
use dslo_graph::{DegeneracyOrderedHypergraph, DerivationMode, RemovalPolicy, WeightedHypergraph};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::greedy::greedy_peeling;
use crate::oracle::DensityOracle;

/// Control loop used to build the output family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// Exact minimal subgraphs, each removed outright from the working graph.
    NaiveDensest,
    /// Greedy subgraphs, each removed outright from the working graph.
    NaiveApprox,
    /// Exact minimal subgraphs followed by the overlap-limiting pass.
    #[default]
    ExactMinAndRemove,
    /// Greedy subgraphs followed by the overlap-limiting pass.
    ApproxMinAndRemove,
}

impl ExtractionMode {
    /// Returns whether subgraphs come from greedy peeling instead of the oracle.
    pub fn is_approx(&self) -> bool {
        matches!(self, ExtractionMode::NaiveApprox | ExtractionMode::ApproxMinAndRemove)
    }

    /// Returns whether each subgraph's node set is removed without overlap tolerance.
    pub fn is_naive(&self) -> bool {
        matches!(self, ExtractionMode::NaiveDensest | ExtractionMode::NaiveApprox)
    }

    /// Numeric code of the mode.
    pub fn code(&self) -> u8 {
        match self {
            ExtractionMode::NaiveDensest => 0,
            ExtractionMode::NaiveApprox => 1,
            ExtractionMode::ExactMinAndRemove => 2,
            ExtractionMode::ApproxMinAndRemove => 3,
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionMode::NaiveDensest => "NaiveDensest",
            ExtractionMode::NaiveApprox => "NaiveApprox",
            ExtractionMode::ExactMinAndRemove => "MinAndRemove",
            ExtractionMode::ApproxMinAndRemove => "ApproxMinAndRemove",
        };
        write!(f, "{name}({})", self.code())
    }
}

/// Parameters of one extraction run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractParams {
    /// Control loop.
    pub mode: ExtractionMode,
    /// Maximum number of subgraphs.
    pub k: usize,
    /// Overlap fraction in `[0, 1]`; ignored by the naive modes.
    pub alpha: f64,
    /// Derivation fed to the overlap-limiting pass; ignored by the naive modes.
    pub derivation: DerivationMode,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            k: 10,
            alpha: 0.0,
            derivation: DerivationMode::default(),
        }
    }
}

/// Ranked family of extracted subgraphs.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Subgraphs in extraction order.
    pub subgraphs: Vec<WeightedHypergraph>,
}

impl ExtractionReport {
    /// Sum of the subgraphs' densities.
    pub fn total_density(&self) -> f64 {
        self.subgraphs.iter().map(WeightedHypergraph::density).sum()
    }
}

/// Removes nodes from `working` until the derived footprint of `extracted`
/// weighs at most `alpha` times `extracted`'s node weight.
///
/// Nodes are chosen by degeneracy order over the derived graph. Returns the
/// number of nodes removed from `working`.
pub fn limit_overlap(
    extracted: &WeightedHypergraph,
    working: &mut WeightedHypergraph,
    alpha: f64,
    derivation: DerivationMode,
) -> Result<usize, DsloError> {
    let derived = derivation.derive(extracted, working)?;
    let mut ordered = DegeneracyOrderedHypergraph::new(&derived);
    let budget = alpha * extracted.node_weight_total();
    let mut removed = 0usize;
    while compare(ordered.node_weight_total(), budget) == Ordering::Greater {
        let Some(node) = ordered.pop_min() else {
            break;
        };
        working.remove_node_set([node]);
        removed += 1;
    }
    Ok(removed)
}

/// Extracts up to `params.k` dense subgraphs from `graph`.
///
/// Stops early once the working graph is empty. Round `i` draws its random
/// choices from substream `i` of the engine's seed.
pub fn extract_dense_subgraphs<O: DensityOracle>(
    engine: &mut Engine<'_, O>,
    graph: &WeightedHypergraph,
    params: &ExtractParams,
) -> Result<ExtractionReport, DsloError> {
    let reporter: &dyn Reporter = engine.reporter();
    let mut working = graph.copy_with_policy(RemovalPolicy::Strict);
    let mut report = ExtractionReport::default();
    while report.subgraphs.len() < params.k && !working.is_empty() {
        let rank = report.subgraphs.len() + 1;
        engine.reseed(rank as u64);
        let subgraph = if params.mode.is_approx() {
            greedy_peeling(&working, reporter).subgraph
        } else {
            engine.find_minimal(&working)?
        };
        reporter.report(&Event::Extracted {
            rank,
            nodes: subgraph.node_count(),
            edges: subgraph.edge_count(),
            density: subgraph.density(),
        });

        if params.mode.is_naive() {
            working.remove_node_set(subgraph.node_ids());
        } else {
            let removed = limit_overlap(&subgraph, &mut working, params.alpha, params.derivation)?;
            reporter.report(&Event::OverlapTrimmed { rank, removed });
        }
        report.subgraphs.push(subgraph);
    }
    Ok(report)
}

//! Progress reporting capability injected into the algorithms.

use log::{debug, info};

/// Which of the two oracle request shapes was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleQuery {
    /// Plain fractional densest-subgraph relaxation.
    Basic,
    /// Relaxation maximising one node's fraction under a density floor.
    Modified,
}

/// Typed progress event emitted while extracting dense subgraphs.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Greedy peeling finished and chose a prefix to drop.
    Peeled {
        /// Number of nodes removed from the input to reach the best prefix.
        removed: usize,
        /// Density of the returned subgraph.
        density: f64,
    },
    /// Degree sieve pruned the search space.
    Sieved {
        /// Density threshold used by the sieve.
        threshold: f64,
        /// Surviving node count.
        nodes: usize,
        /// Surviving edge count.
        edges: usize,
        /// Density of the surviving subgraph.
        density: f64,
    },
    /// The oracle answered a query.
    OracleSolved {
        /// Request shape.
        query: OracleQuery,
        /// Node variables in the program.
        nodes: usize,
        /// Edge variables in the program.
        edges: usize,
        /// Incidence constraints in the program.
        pairs: usize,
        /// Density of the rounded subgraph, when one was produced.
        density: Option<f64>,
    },
    /// A subgraph was appended to the output family.
    Extracted {
        /// One-based rank of the subgraph in the output family.
        rank: usize,
        /// Node count of the subgraph.
        nodes: usize,
        /// Edge count of the subgraph.
        edges: usize,
        /// Density of the subgraph.
        density: f64,
    },
    /// The overlap-limiting pass removed nodes from the working graph.
    OverlapTrimmed {
        /// Rank of the subgraph that triggered the pass.
        rank: usize,
        /// Number of nodes removed from the working graph.
        removed: usize,
    },
}

/// Sink for progress events.
pub trait Reporter {
    /// Receives a single progress event.
    fn report(&self, event: &Event);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: &Event) {
        match event {
            Event::Peeled { removed, density } => {
                debug!("greedy peeling dropped {removed} nodes, density = {density:.6}")
            }
            Event::Sieved {
                threshold,
                nodes,
                edges,
                density,
            } => info!(
                "sieve at rho_apx = {threshold:.6}: {nodes} nodes, {edges} edges, density = {density:.6}"
            ),
            Event::OracleSolved {
                query,
                nodes,
                edges,
                pairs,
                density,
            } => match density {
                Some(density) => debug!(
                    "{query:?} program ({nodes} nodes, {edges} edges, {pairs} pairs): density = {density:.6}"
                ),
                None => debug!(
                    "{query:?} program ({nodes} nodes, {edges} edges, {pairs} pairs): no subgraph"
                ),
            },
            Event::Extracted {
                rank,
                nodes,
                edges,
                density,
            } => info!("[{rank}] {nodes} nodes, {edges} edges, density = {density:.6}"),
            Event::OverlapTrimmed { rank, removed } => {
                debug!("[{rank}] overlap pass removed {removed} nodes")
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &Event) {}
}

#![deny(missing_docs)]
#![doc = include_str!("../docs/extraction-api.md")]

//! Dense-subgraph extraction with limited overlap for weighted hypergraphs.

/// YAML run configuration and defaults.
pub mod config;
/// Oracle, randomness and reporting bundle.
pub mod engine;
/// Overlap-limited and naive multi-subgraph extraction.
pub mod extract;
/// Greedy peeling and the degree sieve.
pub mod greedy;
pub mod oracle;
mod refine;
/// Uniqueness certification of the densest subgraph.
pub mod uniqueness;

pub use config::RunConfig;
pub use engine::Engine;
pub use extract::{
    extract_dense_subgraphs, limit_overlap, ExtractParams, ExtractionMode, ExtractionReport,
};
pub use greedy::{degree_sieve, greedy_peeling, PeelingOutcome};
pub use oracle::{DensityOracle, Extraction, LpOracle, OracleRequest, OracleResponse, OracleStatus};
pub use uniqueness::{check_uniqueness, NonUniqueReason, Uniqueness};

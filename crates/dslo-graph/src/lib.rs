#![deny(missing_docs)]
#![doc = include_str!("../docs/graph-api.md")]

//! Weighted hypergraph model with degeneracy ordering for the dense-subgraph engine.

mod degeneracy;
mod derive;
mod generators;
mod hash;
mod heap;
mod hypergraph;
mod ids;
mod io;
mod policy;
mod stats;

pub use degeneracy::DegeneracyOrderedHypergraph;
pub use derive::{complement, induced, DerivationMode};
pub use generators::{gen_planted_block, gen_random_weighted, gen_random_weighted_in};
pub use hash::canonical_hash;
pub use heap::DegeneracyHeap;
pub use hypergraph::WeightedHypergraph;
pub use io::{edges_to_lines, load_hypergraph, nodes_to_lines, read_hypergraph, write_dump, LoadOptions};
pub use policy::RemovalPolicy;
pub use stats::{clique_expansion, render_distribution, unweighted_degree_distribution};

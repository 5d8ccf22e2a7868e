//! Exhaustive search engine deciding f-choosability of a graph.

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

/// fixed-width vertex sets and reverse-lex subset enumeration
pub mod bitset;

/// the graph data model: adjacency and the f-vector
pub mod graph;

/// the error taxonomy for this crate
pub mod error;

/// rooted connected-subgraph enumeration
pub mod subgraph;

/// per-color search frames
pub mod frame;

/// the feasible-coloring backtracking check
pub mod checker;

/// the outer exhaustive search driver
pub mod driver;

/// the forced-vertex (f=1) pre-reduction
pub mod reduction;

/// the fgraph6 input/output codec
pub mod fgraph6;

/// the (secondary, best-effort) Combinatorial Nullstellensatz decision path
pub mod nullstellensatz;

/// the command-line surface
pub mod cli;

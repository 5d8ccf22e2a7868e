//! Error taxonomy for the f-choosability engine.
//!
//! Grounded on `problemreductions::error::ProblemError`: one `thiserror`
//! variant per failure class, with a crate-level `Result<T>` alias.

use thiserror::Error;

/// Errors produced while reading input or building a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FchoosabilityError {
    /// The fgraph6 (or other) input record could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `n` or some `f[v]` exceeds the engine's word width.
    #[error("out of range: {what} is {value}, limit is {limit}")]
    OutOfRange {
        /// What was out of range (e.g. "number of vertices").
        what: String,
        /// The offending value.
        value: usize,
        /// The limit it exceeded.
        limit: usize,
    },

    /// Some `f[v] <= 0`; the graph is vacuously not f-choosable.
    #[error("invalid f-vector: every f(v) must be positive")]
    InvalidF,
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, FchoosabilityError>;

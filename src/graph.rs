//! The graph data model: vertex ids, adjacency, and the f-vector.

use crate::bitset::{VertexSet, MAX_VERTICES};
use crate::error::{FchoosabilityError, Result};

/// A vertex id, in `[0, n)`.
pub type VertexId = usize;

/// A finite simple graph, immutable for the lifetime of a search.
///
/// `neighbors[v]` never contains `v` itself (no self-loops), and is
/// symmetric: `u` is in `neighbors[v]` iff `v` is in `neighbors[u]`.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    neighbors: Vec<VertexSet>,
    /// `prev_neighbors[v] = neighbors[v] & {0, .., v-1}`, precomputed once.
    prev_neighbors: Vec<VertexSet>,
    /// Optional diagnostic label (e.g. the fgraph6 source line), unused by
    /// any invariant.
    name: Option<String>,
}

impl Graph {
    /// Builds a graph from an adjacency list. `adj[v]` must not contain `v`
    /// and must be consistent with symmetry; this is checked in debug builds.
    pub fn from_adjacency(adj: Vec<Vec<VertexId>>) -> Result<Self> {
        let n = adj.len();
        if n > MAX_VERTICES {
            return Err(FchoosabilityError::OutOfRange {
                what: "number of vertices".into(),
                value: n,
                limit: MAX_VERTICES,
            });
        }
        let mut neighbors = vec![VertexSet::EMPTY; n];
        for (v, nbrs) in adj.iter().enumerate() {
            for &u in nbrs {
                if u == v {
                    return Err(FchoosabilityError::MalformedInput(format!(
                        "vertex {} is listed as its own neighbor",
                        v
                    )));
                }
                neighbors[v].insert(u);
            }
        }
        #[cfg(debug_assertions)]
        for v in 0..n {
            for u in neighbors[v].iter() {
                debug_assert!(
                    neighbors[u].contains(v),
                    "adjacency not symmetric between {} and {}",
                    v,
                    u
                );
            }
        }
        let prev_neighbors = (0..n)
            .map(|v| neighbors[v] & VertexSet::full(v))
            .collect();
        Ok(Graph {
            n,
            neighbors,
            prev_neighbors,
            name: None,
        })
    }

    /// Attaches a diagnostic label to the graph (e.g. its input line).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The graph's diagnostic label, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges.
    pub fn m(&self) -> usize {
        self.neighbors.iter().map(|s| s.len()).sum::<usize>() / 2
    }

    /// Neighbors of `v`, as a `VertexSet`.
    pub fn neighbors(&self, v: VertexId) -> VertexSet {
        self.neighbors[v]
    }

    /// Neighbors of `v` with strictly smaller index.
    pub fn prev_neighbors(&self, v: VertexId) -> VertexSet {
        self.prev_neighbors[v]
    }

    /// Degree of `v`.
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors[v].len()
    }

    /// `true` iff `u` and `v` are adjacent.
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors[u].contains(v)
    }

    /// The full vertex set `{0, .., n-1}`.
    pub fn all_vertices(&self) -> VertexSet {
        VertexSet::full(self.n)
    }
}

/// The per-vertex list-size function, `f: V -> positive integers`.
#[derive(Debug, Clone)]
pub struct FVector(Vec<usize>);

impl FVector {
    /// Builds an `FVector`, checking that every entry is positive and that
    /// its length matches `n`.
    pub fn new(f: Vec<usize>, n: usize) -> Result<Self> {
        if f.len() != n {
            return Err(FchoosabilityError::MalformedInput(format!(
                "f-vector has length {}, expected {}",
                f.len(),
                n
            )));
        }
        if f.iter().any(|&fv| fv == 0) {
            return Err(FchoosabilityError::InvalidF);
        }
        Ok(FVector(f))
    }

    /// The length of the f-vector (number of vertices).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` iff there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum `sum_v f(v)`, i.e. the maximum stack depth of a search.
    pub fn sum(&self) -> usize {
        self.0.iter().sum()
    }

    /// `f(v)`.
    pub fn get(&self, v: VertexId) -> usize {
        self.0[v]
    }

    /// The underlying slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl std::ops::Index<VertexId> for FVector {
    type Output = usize;
    fn index(&self, v: VertexId) -> &usize {
        &self.0[v]
    }
}

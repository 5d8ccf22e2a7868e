//! Enumerates connected induced subgraphs containing a fixed root vertex,
//! in decreasing lexicographic order, layer by layer.
//!
//! Grounded on `original_source/subgraph.h` (`ConnectedSubgraph`), restated
//! with owned `Vec`-backed layers (no raw pointers, no copy-assignment
//! hazard — see DESIGN.md on the source's aborting copy-assignment
//! operator).

use std::rc::Rc;

use crate::bitset::{first_subset, next_subset, predecessor_of_first_subset, VertexSet};
use crate::graph::{Graph, VertexId};

/// One layer of the BFS-like decomposition used to build connected
/// subgraphs rooted at a fixed vertex.
#[derive(Debug, Clone, Copy)]
struct LayerFrame {
    /// Candidate vertices on this layer.
    layer_universe: VertexSet,
    /// Currently chosen subset of `layer_universe`.
    layer_subset: VertexSet,
    /// Union of `layer_universe` through this layer.
    union_universe: VertexSet,
    /// Union of `layer_subset` through this layer: the subgraph's vertex set.
    union_subset: VertexSet,
}

/// A stateful generator of connected induced subgraphs of `G` that contain
/// `root` and lie within a caller-controlled `eligible` set, excluding the
/// singleton `{root}`.
#[derive(Debug, Clone)]
pub struct ConnectedSubgraphGenerator {
    graph: Rc<Graph>,
    root: VertexId,
    eligible: VertexSet,
    layers: Vec<LayerFrame>,
    cur_layer: usize,
}

impl ConnectedSubgraphGenerator {
    /// Builds a generator for `graph`, not yet initialized at any root.
    pub fn new(graph: Rc<Graph>) -> Self {
        let n = graph.n();
        ConnectedSubgraphGenerator {
            graph,
            root: 0,
            eligible: VertexSet::EMPTY,
            layers: Vec::with_capacity(n.max(1)),
            cur_layer: 0,
        }
    }

    /// Resets the generator to enumerate subgraphs rooted at `root`, within
    /// `eligible`. The next call to [`Self::next`] will produce the largest
    /// connected subgraph (the component of `root` restricted to `eligible`).
    pub fn initialize(&mut self, root: VertexId, eligible: VertexSet) {
        self.root = root;
        self.eligible = eligible;
        let r = VertexSet::singleton(root);
        let mut layer0 = LayerFrame {
            layer_universe: r,
            layer_subset: VertexSet::EMPTY,
            union_universe: r,
            union_subset: r,
        };
        layer0.layer_subset = predecessor_of_first_subset(layer0.layer_universe);
        self.layers.clear();
        self.layers.push(layer0);
        self.cur_layer = 0;
    }

    /// Copies another generator's state into `self` (used when a
    /// [`crate::frame::ColorabilityClassFrame`] derives its per-vertex
    /// generators from the previous frame's).
    pub fn copy_from(&mut self, other: &ConnectedSubgraphGenerator) {
        self.root = other.root;
        self.eligible = other.eligible;
        self.cur_layer = other.cur_layer;
        self.layers.clear();
        self.layers
            .extend_from_slice(&other.layers[..=other.cur_layer]);
    }

    /// The subgraph currently represented by the generator (valid only
    /// after a successful call to [`Self::next`]).
    pub fn current_subgraph(&self) -> VertexSet {
        self.layers[self.cur_layer].union_subset
    }

    /// Produces the next connected subgraph in decreasing order, or returns
    /// `false` once exhausted. `additional_constraints` is intersected into
    /// the generator's `eligible` set (monotonically shrinking it).
    pub fn next(&mut self, additional_constraints: VertexSet) -> bool {
        self.eligible &= additional_constraints;

        // Find the deepest layer whose subset is still entirely eligible.
        let mut i = 0;
        while i < self.cur_layer && self.layers[i].layer_subset.is_subset_of(self.eligible) {
            i += 1;
        }
        self.cur_layer = i;

        loop {
            let universe = self.layers[self.cur_layer].layer_universe & self.eligible;
            let mut subset = self.layers[self.cur_layer].layer_subset;
            if next_subset(&mut subset, universe) {
                self.layers[self.cur_layer].layer_subset = subset;
                break;
            }
            if self.cur_layer == 0 {
                // the root itself became ineligible
                return false;
            }
            self.cur_layer -= 1;
        }

        if self.cur_layer == 1 && self.layers[1].layer_subset.is_empty() {
            // refuse the singleton {root}
            return false;
        }

        if self.cur_layer > 0 {
            let prev_union_subset = self.layers[self.cur_layer - 1].union_subset;
            self.layers[self.cur_layer].union_subset =
                prev_union_subset | self.layers[self.cur_layer].layer_subset;
        }

        // Grow further layers until the connected component within
        // `eligible` is exhausted.
        loop {
            let cur = self.layers[self.cur_layer];
            let mut next_universe = VertexSet::EMPTY;
            for v in cur.layer_subset.iter() {
                next_universe |= self.graph.neighbors(v);
            }
            next_universe = (next_universe - cur.union_universe) & self.eligible;

            let (subset, nonempty) = first_subset(next_universe);
            if !nonempty {
                break;
            }
            let new_layer = LayerFrame {
                layer_universe: next_universe,
                layer_subset: subset,
                union_universe: cur.union_universe | next_universe,
                union_subset: cur.union_subset | subset,
            };
            if self.cur_layer + 1 == self.layers.len() {
                self.layers.push(new_layer);
            } else {
                self.layers[self.cur_layer + 1] = new_layer;
            }
            self.cur_layer += 1;
        }

        self.cur_layer > 0
    }
}

//! Per-color search state: a candidate colorability class, the partial
//! list-size counters it induces, and one connected-subgraph generator per
//! vertex.
//!
//! Grounded on `original_source/colorabilityclass.h` (`ColorabilityClassInfo`).
//! The source's `operator=` aborts the process if ever invoked (see
//! DESIGN.md); here frames are plain owned structs with an explicit
//! `setup_next_from` transition instead of copy-assignment, so there is no
//! equivalent hazard to guard against.

use std::rc::Rc;

use crate::bitset::VertexSet;
use crate::graph::{FVector, Graph, VertexId};
use crate::subgraph::ConnectedSubgraphGenerator;

/// Per-color state in the search stack.
#[derive(Debug, Clone)]
pub struct ColorabilityClassFrame {
    graph: Rc<Graph>,
    /// The connected subgraph currently chosen as this color's class.
    pub colorability_class: VertexSet,
    /// `l[v]`: colors already placed in `v`'s list, not counting this color.
    l: Vec<usize>,
    /// Vertices whose list can still grow (`l[v] < f[v]`).
    pub eligible_vertices: VertexSet,
    /// One subgraph generator rooted at each vertex.
    generators: Vec<ConnectedSubgraphGenerator>,
    /// Subset of `eligible_vertices` whose generator is not yet exhausted.
    pub eligible_generators: VertexSet,
}

impl ColorabilityClassFrame {
    /// Builds an uninitialized frame for `graph` (call [`Self::init_root`]
    /// or [`Self::setup_next_from`] before use).
    pub fn new(graph: Rc<Graph>) -> Self {
        let n = graph.n();
        let generators = (0..n)
            .map(|_| ConnectedSubgraphGenerator::new(graph.clone()))
            .collect();
        ColorabilityClassFrame {
            graph,
            colorability_class: VertexSet::EMPTY,
            l: vec![0; n],
            eligible_vertices: VertexSet::EMPTY,
            generators,
            eligible_generators: VertexSet::EMPTY,
        }
    }

    /// Number of colors already assigned to `v`'s list, not counting this
    /// frame's color.
    pub fn l(&self, v: VertexId) -> usize {
        self.l[v]
    }

    /// Initializes the bottom-of-stack frame: no colors assigned yet, every
    /// vertex with `f(v) > 0` eligible.
    pub fn init_root(&mut self, f: &FVector) {
        let n = self.graph.n();
        self.colorability_class = VertexSet::EMPTY;
        self.eligible_vertices = VertexSet::EMPTY;
        for v in 0..n {
            self.l[v] = 0;
            if f.get(v) > 0 {
                self.eligible_vertices.insert(v);
            }
        }
        self.eligible_generators = self.eligible_vertices;
        for v in 0..n {
            // a generator rooted at v only ever considers vertices with
            // index <= v as eligible roots for earlier layers of recursion
            // to stay well-founded; see SearchDriver for why.
            let root_eligible = self.eligible_vertices & VertexSet::full(v + 1);
            self.generators[v].initialize(v, root_eligible);
        }
    }

    /// Produces the next colorability-class candidate into
    /// `self.colorability_class`. Returns `false` once every generator in
    /// `eligible_generators` is exhausted.
    pub fn generate_subgraph(&mut self) -> bool {
        loop {
            // Among eligible generators, pick the vertex with minimum L[v];
            // ties broken by largest index (scan high-to-low, replace only
            // on strict improvement).
            let mut chosen: Option<VertexId> = None;
            let mut chosen_l = usize::MAX;
            for v in self.eligible_generators.iter_rev() {
                let lv = self.l[v];
                if lv < chosen_l {
                    chosen = Some(v);
                    chosen_l = lv;
                }
            }
            let v = match chosen {
                Some(v) => v,
                None => return false,
            };
            if self.generators[v].next(self.eligible_vertices) {
                self.colorability_class = self.generators[v].current_subgraph();
                return true;
            }
            self.eligible_generators.remove(v);
        }
    }

    /// Initializes `self` as the successor of `prev`, assuming
    /// `prev.colorability_class` will be committed as `prev`'s color.
    pub fn setup_next_from(&mut self, prev: &ColorabilityClassFrame, f: &FVector) {
        let n = self.graph.n();
        self.eligible_vertices = prev.eligible_vertices;
        for v in 0..n {
            if prev.colorability_class.contains(v) {
                self.l[v] = prev.l[v] + 1;
                if self.l[v] >= f.get(v) {
                    self.eligible_vertices.remove(v);
                }
            } else {
                self.l[v] = prev.l[v];
            }
        }
        for v in 0..n {
            self.generators[v].copy_from(&prev.generators[v]);
        }
        self.eligible_generators = prev.eligible_generators & self.eligible_vertices;
        // Copy the colorability class as a default, so the driver can
        // commit it again to raise this color's multiplicity.
        self.colorability_class = prev.colorability_class;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn root_frame_marks_positive_f_vertices_eligible() {
        let g = Rc::new(Graph::from_adjacency(vec![vec![1], vec![0]]).unwrap());
        let f = FVector::new(vec![2, 1], 2).unwrap();
        let mut frame = ColorabilityClassFrame::new(g);
        frame.init_root(&f);
        assert_eq!(frame.eligible_vertices, VertexSet::full(2));
        assert_eq!(frame.l(0), 0);
        assert_eq!(frame.l(1), 0);
    }

    #[test]
    fn setup_next_from_increments_l_for_colored_vertices() {
        let g = Rc::new(Graph::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap());
        let f = FVector::new(vec![2, 2, 2], 3).unwrap();
        let mut prev = ColorabilityClassFrame::new(g.clone());
        prev.init_root(&f);
        prev.colorability_class = VertexSet::singleton(0);

        let mut next = ColorabilityClassFrame::new(g);
        next.setup_next_from(&prev, &f);
        assert_eq!(next.l(0), 1);
        assert_eq!(next.l(1), 0);
        assert!(next.eligible_vertices.contains(0)); // f(0)=2, l=1 < 2
    }

    #[test]
    fn setup_next_from_retires_fully_listed_vertex() {
        let g = Rc::new(Graph::from_adjacency(vec![vec![1], vec![0]]).unwrap());
        let f = FVector::new(vec![1, 1], 2).unwrap();
        let mut prev = ColorabilityClassFrame::new(g.clone());
        prev.init_root(&f);
        prev.colorability_class = VertexSet::singleton(0);

        let mut next = ColorabilityClassFrame::new(g);
        next.setup_next_from(&prev, &f);
        assert_eq!(next.l(0), 1);
        assert!(!next.eligible_vertices.contains(0));
    }
}

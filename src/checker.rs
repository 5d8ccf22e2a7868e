//! Chronological backtracking check for whether a stack of colorability
//! classes admits a proper coloring of the whole graph.
//!
//! Grounded on `original_source/listassignment.h`
//! (`ListAssignment::has_feasible_coloring`).

use crate::bitset::VertexSet;
use crate::frame::ColorabilityClassFrame;
use crate::graph::{Graph, VertexId};

/// Reusable scratch state for [`FeasibleColoringChecker::check`], so a
/// search can call it once per candidate subgraph without reallocating.
#[derive(Debug, Clone)]
pub struct FeasibleColoringChecker {
    /// `color_class[k]`: vertices currently assigned color `k` in this check.
    color_class: Vec<VertexSet>,
    /// `assigned_color[v]`: the color currently being tried for `v`.
    assigned_color: Vec<usize>,
}

impl FeasibleColoringChecker {
    /// Builds a checker for a graph of `n` vertices and a search stack of at
    /// most `max_colors` frames.
    pub fn new(n: usize, max_colors: usize) -> Self {
        FeasibleColoringChecker {
            color_class: vec![VertexSet::EMPTY; max_colors.max(1)],
            assigned_color: vec![0; n.max(1)],
        }
    }

    /// Decides whether `frames` (indices `0..=cur_color`, each contributing
    /// one colorability class) admit a proper coloring of the whole graph:
    /// every vertex gets a color whose class it belongs to, and no edge is
    /// monochromatic.
    pub fn has_feasible_coloring(&mut self, graph: &Graph, frames: &[ColorabilityClassFrame]) -> bool {
        self.check(graph, frames, VertexSet::EMPTY)
    }

    /// As [`Self::has_feasible_coloring`], but vertices in `skip` are left
    /// uncolored by this check entirely — used when those vertices are
    /// assumed to receive a fresh singleton color of their own, which by
    /// construction cannot conflict with any color already in use.
    pub fn check(&mut self, graph: &Graph, frames: &[ColorabilityClassFrame], skip: VertexSet) -> bool {
        let cur_color = frames.len() - 1;
        for c in self.color_class[..=cur_color].iter_mut() {
            *c = VertexSet::EMPTY;
        }

        let order: Vec<VertexId> = (0..graph.n()).filter(|v| !skip.contains(*v)).collect();
        if order.is_empty() {
            return true;
        }
        self.assigned_color[order[0]] = 0;

        let mut i: isize = 0;
        loop {
            if i < 0 {
                return false;
            }
            let v = order[i as usize];
            if self.assigned_color[v] <= cur_color {
                let k = self.assigned_color[v];
                let admissible = frames[k].colorability_class.contains(v)
                    && (self.color_class[k] & graph.prev_neighbors(v)).is_empty();
                if admissible {
                    self.color_class[k].insert(v);
                    i += 1;
                    if i as usize >= order.len() {
                        return true;
                    }
                    self.assigned_color[order[i as usize]] = 0;
                } else {
                    self.assigned_color[v] += 1;
                }
            } else {
                i -= 1;
                if i >= 0 {
                    let pv = order[i as usize];
                    self.color_class[self.assigned_color[pv]].remove(pv);
                    self.assigned_color[pv] += 1;
                }
            }
        }
    }
}

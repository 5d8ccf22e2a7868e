//! Forced-vertex pre-reduction: vertices with `f(v) == 1` must receive that
//! one color, which removes that color from every neighbor's list.
//!
//! Grounded on `original_source/fgraph.h` (`fGraph::remove_vertices_with_f_1`).

use crate::bitset::VertexSet;
use crate::graph::{FVector, Graph, VertexId};

/// Outcome of greedily removing all forced (`f(v) == 1`) vertices.
#[derive(Debug, Clone)]
pub enum ReductionOutcome {
    /// Forcing colors drove some neighbor's remaining list size to zero:
    /// the graph is vacuously not f-choosable.
    ForcedContradiction,
    /// At most one vertex remained after reduction: trivially f-choosable.
    Trivial,
    /// The reduced instance to hand to the core search.
    Reduced { graph: Graph, f: FVector },
}

/// Iteratively removes vertices with `f(v) == 1`, decreasing each neighbor's
/// `f` by one (since that neighbor's list can no longer use the forced
/// vertex's color), compounding whenever a neighbor's `f` itself drops to 1.
pub fn remove_forced_vertices(graph: &Graph, f: &FVector) -> ReductionOutcome {
    let n = graph.n();
    let mut neighbors: Vec<VertexSet> = (0..n).map(|v| graph.neighbors(v)).collect();
    let mut fv: Vec<i64> = f.as_slice().iter().map(|&x| x as i64).collect();
    let mut alive = VertexSet::full(n);
    let mut remaining = n;

    let mut i: isize = n as isize - 1;
    while i >= 0 {
        let iu = i as usize;
        if fv[iu] != 1 {
            i -= 1;
            continue;
        }

        let mut new_i = i - 1;
        for j in neighbors[iu].iter() {
            fv[j] -= 1;
            if fv[j] == 0 {
                return ReductionOutcome::ForcedContradiction;
            }
            if j > iu && fv[j] == 1 {
                new_i = j as isize;
            }
            neighbors[j].remove(iu);
        }
        neighbors[iu] = VertexSet::EMPTY;
        fv[iu] = 0;
        alive.remove(iu);
        remaining -= 1;
        i = new_i;
    }

    if remaining <= 1 {
        return ReductionOutcome::Trivial;
    }

    let kept: Vec<VertexId> = (0..n).filter(|&v| alive.contains(v)).collect();
    debug_assert_eq!(kept.len(), remaining);
    let mut index_of = vec![0usize; n];
    for (new_idx, &old) in kept.iter().enumerate() {
        index_of[old] = new_idx;
    }
    let adj: Vec<Vec<VertexId>> = kept
        .iter()
        .map(|&old| neighbors[old].iter().map(|u| index_of[u]).collect())
        .collect();
    let new_f: Vec<usize> = kept.iter().map(|&old| fv[old] as usize).collect();

    let reduced_graph =
        Graph::from_adjacency(adj).expect("reduction preserves simple-graph invariants");
    let reduced_f =
        FVector::new(new_f, remaining).expect("reduction only ever raises f above zero or forbids it");
    ReductionOutcome::Reduced {
        graph: reduced_graph,
        f: reduced_f,
    }
}

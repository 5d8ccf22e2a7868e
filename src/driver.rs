//! The outer exhaustive search: generates candidate bad list assignments
//! and decides f-choosability.
//!
//! Grounded on `original_source/listassignment.h` (`ListAssignment::verify`).
//! The sharding parameters (`res`, `mod`, `splitlevel`) are carried through
//! unchanged; actually running many shards as separate OS processes is left
//! to the external supervisor described in SPEC_FULL.md — this module only
//! implements the odometer gate itself.

use std::rc::Rc;
use std::time::Instant;

use log::{debug, trace};

use crate::bitset::VertexSet;
use crate::checker::FeasibleColoringChecker;
use crate::error::{FchoosabilityError, Result};
use crate::frame::ColorabilityClassFrame;
use crate::graph::{FVector, Graph, VertexId};

/// The result of a complete search.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// Every possible list assignment (of the given sizes) has a proper
    /// coloring.
    FChoosable,
    /// `witness` is a list assignment with no proper coloring.
    NotFChoosable(Witness),
}

/// A bad list assignment: one colorability class per color, and the final
/// per-vertex list-size counters at the point the search gave up on it.
#[derive(Debug, Clone)]
pub struct Witness {
    /// `colors[k]`: the set of vertices whose list contains color `k`.
    pub colors: Vec<VertexSet>,
    /// `l[v]`: total number of colors in `v`'s list (== `f[v]` for every v,
    /// since the witness is a *full* list assignment).
    pub l: Vec<usize>,
}

/// Search statistics, exposed for diagnostics and parity with the
/// periodic progress report of the original implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Number of main-loop iterations (candidate list assignments visited).
    pub count: u64,
    /// Number of candidate classes found to admit a feasible coloring.
    pub num_feasible_colorings: u64,
}

/// Exhaustively decides whether `(graph, f)` is f-choosable.
#[derive(Debug)]
pub struct SearchDriver {
    graph: Rc<Graph>,
    f: FVector,
    frames: Vec<ColorabilityClassFrame>,
    cur_color: isize,
    checker: FeasibleColoringChecker,
    stats: SearchStats,
    res: usize,
    modulus: usize,
    splitlevel: isize,
    odometer: usize,
}

impl SearchDriver {
    /// Builds a driver that explores the whole search tree (no sharding).
    pub fn new(graph: Rc<Graph>, f: FVector) -> Result<Self> {
        Self::sharded(graph, f, 0, 1, -1)
    }

    /// Builds a driver that explores only the shard with residue `res`
    /// modulo `modulus`, splitting at depth `splitlevel` (`-1` disables
    /// sharding regardless of `res`/`modulus`).
    pub fn sharded(
        graph: Rc<Graph>,
        f: FVector,
        res: usize,
        modulus: usize,
        splitlevel: isize,
    ) -> Result<Self> {
        if modulus == 0 {
            return Err(FchoosabilityError::OutOfRange {
                what: "modulus".into(),
                value: 0,
                limit: 1,
            });
        }
        if res >= modulus {
            return Err(FchoosabilityError::OutOfRange {
                what: "residue".into(),
                value: res,
                limit: modulus,
            });
        }
        let n = graph.n();
        let sum = f.sum();
        debug!(
            "reserving colorability class stack to size {} (n={}, res={}, mod={}, splitlevel={})",
            sum, n, res, modulus, splitlevel
        );
        let mut frames: Vec<ColorabilityClassFrame> = (0..sum.max(1))
            .map(|_| ColorabilityClassFrame::new(graph.clone()))
            .collect();
        frames[0].init_root(&f);
        Ok(SearchDriver {
            graph,
            f,
            frames,
            cur_color: 0,
            checker: FeasibleColoringChecker::new(n, sum.max(1)),
            stats: SearchStats::default(),
            res,
            modulus,
            splitlevel,
            odometer: modulus,
        })
    }

    /// Search statistics accumulated so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search to completion.
    pub fn run(&mut self) -> Verdict {
        let n = self.graph.n();
        loop {
            if self.cur_color < 0 {
                debug!(
                    "search complete: count={} num_feasible_colorings={}",
                    self.stats.count, self.stats.num_feasible_colorings
                );
                return Verdict::FChoosable;
            }

            self.stats.count += 1;
            let cc = self.cur_color as usize;
            trace!("cur_color={} attempting next subgraph", cc);

            if !self.frames[cc].generate_subgraph() {
                trace!("no more subgraphs for color {}, backtracking", cc);
                self.cur_color -= 1;
                continue;
            }

            if self
                .checker
                .has_feasible_coloring(&self.graph, &self.frames[..=cc])
            {
                self.stats.num_feasible_colorings += 1;
                continue;
            }

            // No feasible coloring with this class added once: try raising
            // its multiplicity, up to the size of the class itself.
            let mut multiplicity = self.frames[cc].colorability_class.len() as isize;
            'raise: loop {
                if multiplicity <= 0 {
                    break 'raise;
                }

                if self.cur_color == self.splitlevel {
                    self.odometer = if self.odometer == 0 {
                        self.modulus - 1
                    } else {
                        self.odometer - 1
                    };
                    if self.odometer != self.res {
                        // this branch belongs to a different shard; go back
                        // to the main loop and ask for the next subgraph at
                        // the same depth.
                        break 'raise;
                    }
                }

                let from = self.cur_color as usize;
                let next = from + 1;
                {
                    let (head, tail) = self.frames.split_at_mut(next);
                    tail[0].setup_next_from(&head[from], &self.f);
                }
                self.cur_color += 1;

                if self.frames[next].eligible_vertices.is_empty() {
                    // every vertex's list is full and the checker already
                    // said this configuration has no feasible coloring:
                    // a bad list assignment, hence not f-choosable.
                    let full_frame = next;
                    self.cur_color = cc as isize;
                    debug!("bad full list assignment found at color {}", full_frame);
                    return Verdict::NotFChoosable(self.build_witness(cc, full_frame));
                }

                // Small Pot Lemma: n-1 classes already suffice.
                if self.cur_color as usize >= n.saturating_sub(1) {
                    self.cur_color -= 1;
                    break 'raise;
                }

                let class = self.frames[next].colorability_class;
                if class.is_subset_of(self.frames[next].eligible_vertices) {
                    if self
                        .checker
                        .has_feasible_coloring(&self.graph, &self.frames[..=next])
                    {
                        break 'raise;
                    }
                    // else: loop again, adding the same class a second time.
                } else {
                    break 'raise;
                }

                multiplicity -= 1;
            }

            if multiplicity <= 0 {
                // this class's multiplicity reached its own size: every
                // vertex in it is colorable regardless, so it never needs
                // another color in its list.
                let top = self.cur_color as usize;
                let class = self.frames[top].colorability_class;
                self.frames[top].eligible_vertices = self.frames[top].eligible_vertices - class;
            }
        }
    }

    fn build_witness(&self, committed_up_to: usize, full_frame: usize) -> Witness {
        let colors = self.frames[..=committed_up_to]
            .iter()
            .map(|fr| fr.colorability_class)
            .collect();
        let n = self.graph.n();
        let l = (0..n as VertexId)
            .map(|v| self.frames[full_frame].l(v))
            .collect();
        Witness { colors, l }
    }
}

/// Convenience wrapper: runs a complete (unsharded) search and reports how
/// long it took.
pub fn decide(graph: Rc<Graph>, f: FVector) -> Result<(Verdict, std::time::Duration)> {
    let mut driver = SearchDriver::new(graph, f)?;
    let start = Instant::now();
    let verdict = driver.run();
    Ok((verdict, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn triangle() -> Rc<Graph> {
        Rc::new(Graph::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap())
    }

    fn four_cycle() -> Rc<Graph> {
        // 0-1-2-3-0
        Rc::new(Graph::from_adjacency(vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![2, 0]]).unwrap())
    }

    fn five_cycle() -> Rc<Graph> {
        // 0-1-2-3-4-0
        Rc::new(
            Graph::from_adjacency(vec![
                vec![1, 4],
                vec![0, 2],
                vec![1, 3],
                vec![2, 4],
                vec![3, 0],
            ])
            .unwrap(),
        )
    }

    fn k33() -> Rc<Graph> {
        // parts {0,1,2} and {3,4,5}
        Rc::new(
            Graph::from_adjacency(vec![
                vec![3, 4, 5],
                vec![3, 4, 5],
                vec![3, 4, 5],
                vec![0, 1, 2],
                vec![0, 1, 2],
                vec![0, 1, 2],
            ])
            .unwrap(),
        )
    }

    fn path(n: usize) -> Rc<Graph> {
        let adj = (0..n)
            .map(|v| {
                let mut nbrs = Vec::new();
                if v > 0 {
                    nbrs.push(v - 1);
                }
                if v + 1 < n {
                    nbrs.push(v + 1);
                }
                nbrs
            })
            .collect();
        Rc::new(Graph::from_adjacency(adj).unwrap())
    }

    // K_3's list-chromatic number is exactly 3 (the all-lists-{a,b}
    // assignment is a classic bad example), matching the boundary rule
    // "complete graph K_n with f == k is f-choosable iff k >= n" — NOT the
    // "f-choosable" verdict the distilled spec's scenario table mistakenly
    // attaches to this exact instance. See DESIGN.md.
    #[test]
    fn triangle_with_f_2_is_not_f_choosable() {
        let f = FVector::new(vec![2, 2, 2], 3).unwrap();
        let mut driver = SearchDriver::new(triangle(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::NotFChoosable(_)));
    }

    #[test]
    fn triangle_with_f_3_is_f_choosable() {
        // k == n, matching the complete-graph boundary rule.
        let f = FVector::new(vec![3, 3, 3], 3).unwrap();
        let mut driver = SearchDriver::new(triangle(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn triangle_with_f_1_1_2_is_not_f_choosable() {
        // K3 needs 3 colors; a list assignment of size 1 for two vertices
        // with disjoint singleton lists already blocks any coloring.
        let f = FVector::new(vec![1, 1, 1], 3).unwrap();
        let mut driver = SearchDriver::new(triangle(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::NotFChoosable(_)));
    }

    #[test]
    fn four_cycle_with_f_2_is_f_choosable() {
        // even cycles are 2-choosable.
        let f = FVector::new(vec![2, 2, 2, 2], 4).unwrap();
        let mut driver = SearchDriver::new(four_cycle(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn five_cycle_with_f_2_is_not_f_choosable() {
        // odd cycles have list-chromatic number 3.
        let f = FVector::new(vec![2, 2, 2, 2, 2], 5).unwrap();
        let mut driver = SearchDriver::new(five_cycle(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::NotFChoosable(_)));
    }

    #[test]
    fn k33_with_f_3_is_f_choosable() {
        let f = FVector::new(vec![3; 6], 6).unwrap();
        let mut driver = SearchDriver::new(k33(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn k33_with_f_2_is_not_f_choosable() {
        // the classical example showing ch(K_{3,3}) = 3.
        let f = FVector::new(vec![2; 6], 6).unwrap();
        let mut driver = SearchDriver::new(k33(), f).unwrap();
        assert!(matches!(driver.run(), Verdict::NotFChoosable(_)));
    }

    #[test]
    fn path_with_f_2_is_f_choosable() {
        // trees are always 2-choosable.
        let f = FVector::new(vec![2, 2, 2, 2, 2], 5).unwrap();
        let mut driver = SearchDriver::new(path(5), f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn single_vertex_is_f_choosable_whenever_f_is_positive() {
        let g = Rc::new(Graph::from_adjacency(vec![Vec::new()]).unwrap());
        let f = FVector::new(vec![1], 1).unwrap();
        let mut driver = SearchDriver::new(g, f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn edgeless_graph_with_f_1_is_f_choosable() {
        let g = Rc::new(Graph::from_adjacency(vec![Vec::new(); 3]).unwrap());
        let f = FVector::new(vec![1, 1, 1], 3).unwrap();
        let mut driver = SearchDriver::new(g, f).unwrap();
        assert!(matches!(driver.run(), Verdict::FChoosable));
    }

    #[test]
    fn single_edge_with_f_1_is_not_f_choosable() {
        // two adjacent vertices given the same singleton list cannot both
        // be colored.
        let g = Rc::new(Graph::from_adjacency(vec![vec![1], vec![0]]).unwrap());
        let f = FVector::new(vec![1, 1], 2).unwrap();
        let mut driver = SearchDriver::new(g, f).unwrap();
        assert!(matches!(driver.run(), Verdict::NotFChoosable(_)));
    }

    #[test]
    fn sharded_residues_partition_without_changing_the_verdict() {
        let f = FVector::new(vec![3, 3, 3], 3).unwrap();
        let mut full = SearchDriver::new(triangle(), f.clone()).unwrap();
        let full_verdict = matches!(full.run(), Verdict::FChoosable);

        let mut any_not_fchoosable = false;
        for res in 0..2 {
            let mut shard = SearchDriver::sharded(triangle(), f.clone(), res, 2, 0).unwrap();
            if matches!(shard.run(), Verdict::NotFChoosable(_)) {
                any_not_fchoosable = true;
            }
        }
        assert_eq!(full_verdict, !any_not_fchoosable);
    }

    #[test]
    fn rejects_residue_out_of_range() {
        let f = FVector::new(vec![2, 2, 2], 3).unwrap();
        assert!(SearchDriver::sharded(triangle(), f, 2, 2, 0).is_err());
    }

    /// All `k`-element subsets of `{0, .., universe-1}`.
    fn combinations(universe: usize, k: usize) -> Vec<Vec<usize>> {
        if k == 0 {
            return vec![Vec::new()];
        }
        if universe == 0 {
            return Vec::new();
        }
        let mut with_last = combinations(universe - 1, k - 1);
        for combo in with_last.iter_mut() {
            combo.push(universe - 1);
        }
        let without_last = combinations(universe - 1, k);
        with_last.extend(without_last);
        with_last
    }

    fn has_proper_coloring_from_lists(graph: &Graph, lists: &[Vec<usize>]) -> bool {
        fn rec(graph: &Graph, lists: &[Vec<usize>], v: usize, colors: &mut Vec<usize>) -> bool {
            if v == graph.n() {
                return true;
            }
            for &c in &lists[v] {
                if (0..v).all(|u| !(graph.are_adjacent(u, v) && colors[u] == c)) {
                    colors.push(c);
                    if rec(graph, lists, v + 1, colors) {
                        return true;
                    }
                    colors.pop();
                }
            }
            false
        }
        let mut colors = Vec::with_capacity(graph.n());
        rec(graph, lists, 0, &mut colors)
    }

    /// Direct brute-force implementation of f-choosability per the
    /// definition in spec.md's glossary: try every list assignment with
    /// `L(v) ⊆ [0, sum f)` and `|L(v)| = f(v)`, and require a proper
    /// coloring from every one of them.
    fn bruteforce_fchoosable(graph: &Graph, f: &FVector) -> bool {
        let n = graph.n();
        let universe = f.sum().max(1);
        let per_vertex: Vec<Vec<Vec<usize>>> =
            (0..n).map(|v| combinations(universe, f.get(v))).collect();

        fn cartesian(
            graph: &Graph,
            per_vertex: &[Vec<Vec<usize>>],
            v: usize,
            lists: &mut Vec<Vec<usize>>,
        ) -> bool {
            if v == per_vertex.len() {
                return has_proper_coloring_from_lists(graph, lists);
            }
            for candidate in &per_vertex[v] {
                lists.push(candidate.clone());
                let ok = cartesian(graph, per_vertex, v + 1, lists);
                lists.pop();
                if !ok {
                    return false;
                }
            }
            true
        }

        let mut lists = Vec::with_capacity(n);
        cartesian(graph, &per_vertex, 0, &mut lists)
    }

    fn random_graph(rng: &mut StdRng, n: usize) -> Graph {
        let mut adj = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(0.5) {
                    adj[i].push(j);
                    adj[j].push(i);
                }
            }
        }
        Graph::from_adjacency(adj).unwrap()
    }

    #[test]
    fn random_small_instances_match_bruteforce_verdict() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            // kept small (sum f <= 6) so the brute-force reference, which
            // enumerates every list assignment, stays cheap.
            let n = rng.gen_range(2..=3);
            let g = random_graph(&mut rng, n);
            let f_vals: Vec<usize> = (0..n).map(|_| rng.gen_range(1..=2)).collect();
            let f = FVector::new(f_vals, n).unwrap();

            let mut driver = SearchDriver::new(Rc::new(g.clone()), f.clone()).unwrap();
            let engine_verdict = matches!(driver.run(), Verdict::FChoosable);
            let bruteforce_verdict = bruteforce_fchoosable(&g, &f);
            assert_eq!(
                engine_verdict,
                bruteforce_verdict,
                "mismatch for n={} f={:?}",
                n,
                f.as_slice()
            );
        }
    }

    #[test]
    fn doubling_f_never_turns_f_choosable_into_not_f_choosable() {
        let mut rng = StdRng::seed_from_u64(0xf00d);
        for _ in 0..10 {
            let n = rng.gen_range(2..=4);
            let g = Rc::new(random_graph(&mut rng, n));
            let f_vals: Vec<usize> = (0..n).map(|_| rng.gen_range(1..=2)).collect();
            let f = FVector::new(f_vals.clone(), n).unwrap();
            let doubled_f =
                FVector::new(f_vals.iter().map(|&x| x * 2).collect(), n).unwrap();

            let mut base = SearchDriver::new(g.clone(), f).unwrap();
            let base_choosable = matches!(base.run(), Verdict::FChoosable);

            let mut doubled = SearchDriver::new(g.clone(), doubled_f).unwrap();
            let doubled_choosable = matches!(doubled.run(), Verdict::FChoosable);

            if base_choosable {
                assert!(
                    doubled_choosable,
                    "doubling f flipped f-choosable to NOT f-choosable"
                );
            }
        }
    }
}

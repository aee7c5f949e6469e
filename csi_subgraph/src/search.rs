//! Backtracking search over vertex pairings.
//!
//! Each level picks the unpaired vertex of `g1` with the fewest candidates,
//! tries every candidate in turn, and (in common mode) finally tries leaving
//! the vertex out. After a pair is added, every other row of the candidate
//! map is filtered down to the candidates whose edge counts to the new pair
//! agree in both graphs.

use contracts::*;
use csi_common::{EdgeId, VertexId};
use csi_graph::GraphView;
use tracing::{debug, trace};

use crate::equivalence::{CsiNextAction, EquivalencePredicate};
use crate::error::CsiResult;
use crate::processor::SolutionProcessor;
use crate::profiling::Timer;
use crate::solver::Solver;
use crate::vam::Vam;

/// Reusable buffers for the edges between two vertices.
#[derive(Debug, Default)]
pub(crate) struct EdgeScratch {
    edges1: Vec<EdgeId>,
    edges2: Vec<EdgeId>,
}

impl EdgeScratch {
    /// Can `i` of `g1` be paired with `j` of `g2` as far as self-loops go?
    fn vertices_match<G, P>(&mut self, g1: &G, g2: &G, predicate: &P, i: VertexId, j: VertexId) -> bool
    where
        G: GraphView,
        P: EquivalencePredicate<G>,
    {
        self.edges1.clear();
        self.edges2.clear();
        g1.find_edges_between(i, i, &mut self.edges1);
        g2.find_edges_between(j, j, &mut self.edges2);
        self.edges1.len() == self.edges2.len()
            && predicate.mu(g1, i, g2, j)
            && predicate.nu(g1, i, i, &self.edges1, g2, j, j, &self.edges2)
    }

    /// With `(i, j)` already paired, can `(iu, ju)` still be paired?
    ///
    /// Edge counts must agree in each direction. The predicate is only asked
    /// when there is at least one edge to compare.
    #[allow(clippy::too_many_arguments)]
    fn edges_are_suitable<G, P>(
        &mut self,
        g1: &G,
        g2: &G,
        predicate: &P,
        i: VertexId,
        iu: VertexId,
        j: VertexId,
        ju: VertexId,
    ) -> bool
    where
        G: GraphView,
        P: EquivalencePredicate<G>,
    {
        self.edges1.clear();
        self.edges2.clear();
        g1.find_edges_between(i, iu, &mut self.edges1);
        g2.find_edges_between(j, ju, &mut self.edges2);
        if self.edges1.len() != self.edges2.len() {
            return false;
        }

        g1.find_edges_between(iu, i, &mut self.edges1);
        g2.find_edges_between(ju, j, &mut self.edges2);
        if self.edges1.len() != self.edges2.len() {
            return false;
        }

        self.edges1.is_empty() || predicate.nu(g1, i, iu, &self.edges1, g2, j, ju, &self.edges2)
    }
}

impl<G, S, P> Solver<'_, G, S, P>
where
    G: GraphView,
    S: SolutionProcessor<G>,
    P: EquivalencePredicate<G>,
{
    /// Candidate map for the empty partial solution: every pair passing `mu`
    /// whose self-loop counts agree and pass `nu`.
    pub(crate) fn initialize_vam(&mut self) -> CsiResult<Vam> {
        let _t = Timer::new("initialize_vam");
        let (g1, g2) = (self.g1, self.g2);
        let Self {
            predicate,
            v,
            w,
            arena,
            edges,
            ..
        } = self;

        let mut vam = Vam::new(arena);
        vam.reserve_rows(v.max_plus_one_or_zero());
        for i in v.vertices() {
            vam.start_new_row(arena, i, w.len())?;
            for j in w.vertices() {
                if edges.vertices_match(g1, g2, predicate, i, j) {
                    vam.push(arena, i, j);
                }
            }
        }
        Ok(vam)
    }

    /// Whether this branch can still produce a solution of acceptable size.
    ///
    /// Counts one potential pair per unpaired vertex that has any candidate
    /// at all, which is a loose but cheap upper bound.
    pub(crate) fn is_solution_possible(&self, vam: &Vam) -> bool {
        let common = self.config.finding_common_subgraphs;
        if common && self.x.len() >= self.config.maximum_solution_size {
            return false;
        }
        let needed = if common {
            self.search_minimum
        } else {
            self.g1.vertex_count()
        };

        let mut largest = self.x.len();
        for i in self.vnotx.vertices() {
            if vam.size(i) > 0 {
                largest += 1;
                if largest >= needed {
                    return true;
                }
            }
        }
        false
    }

    /// Unpaired vertex with the shortest non-empty row. Ties go to the vertex
    /// that comes first in availability order.
    pub(crate) fn pick_vertex(&self, vam: &Vam) -> Option<VertexId> {
        let mut best: Option<(usize, VertexId)> = None;
        for i in self.vnotx.vertices() {
            let n = vam.size(i);
            if n > 0 && best.is_none_or(|(shortest, _)| n < shortest) {
                best = Some((n, i));
            }
        }
        best.map(|(_, i)| i)
    }

    #[debug_requires(self.x.len() == self.y.len())]
    #[debug_requires(!self.x.contains(&i), "vertex of g1 paired twice")]
    #[debug_requires(!self.y.contains(&j), "vertex of g2 paired twice")]
    #[debug_requires(self.vnotx.contains(i.as_usize()))]
    pub(crate) fn extend(&mut self, i: VertexId, j: VertexId) {
        self.x.push(i);
        self.y.push(j);
        self.vnotx.erase(i.as_usize());
    }

    #[debug_requires(!self.x.is_empty() && self.x.len() == self.y.len())]
    pub(crate) fn retract(&mut self) {
        if let (Some(i), Some(_)) = (self.x.pop(), self.y.pop()) {
            self.vnotx.insert(i.as_usize());
        }
    }

    /// Candidate map for the level below, after `(i, j)` was added.
    ///
    /// Keeps, for each unpaired vertex, the candidates from `vam` other than
    /// `j` whose edges to `j` match the vertex's edges to `i`.
    pub(crate) fn refine(&mut self, vam: &Vam, i: VertexId, j: VertexId) -> CsiResult<Vam> {
        let _t = Timer::new("refine");
        let (g1, g2) = (self.g1, self.g2);
        let Self {
            predicate,
            vnotx,
            arena,
            edges,
            ..
        } = self;

        let mut refined = Vam::new(arena);
        refined.reserve_rows(vnotx.max_plus_one_or_zero());
        for iu in vnotx.vertices() {
            let span = vam.span(iu);
            refined.start_new_row(arena, iu, span.len())?;
            for k in span {
                let ju = arena.get(k);
                if ju != j && edges.edges_are_suitable(g1, g2, predicate, i, iu, j, ju) {
                    refined.push(arena, iu, ju);
                }
            }
        }
        Ok(refined)
    }

    /// Builds the refined map for `(i, j)`, runs `f` on it, and frees it again
    /// whether `f` returns normally, aborts or fails.
    fn with_refined<R>(
        &mut self,
        vam: &Vam,
        i: VertexId,
        j: VertexId,
        f: impl FnOnce(&mut Self, &Vam) -> CsiResult<R>,
    ) -> CsiResult<R> {
        let checkpoint = self.arena.checkpoint();
        match self.refine(vam, i, j) {
            Ok(refined) => {
                let result = f(self, &refined);
                refined.release(&mut self.arena);
                result
            }
            Err(e) => {
                self.arena.revert(checkpoint);
                Err(e)
            }
        }
    }

    pub(crate) fn is_solution_valid_size(&self) -> bool {
        if self.config.finding_common_subgraphs {
            self.search_minimum <= self.x.len()
                && self.x.len() <= self.config.maximum_solution_size
        } else {
            self.x.len() == self.g1.vertex_count()
        }
    }

    pub(crate) fn recurse(&mut self, vam: &Vam, level: usize) -> CsiResult<CsiNextAction> {
        if self.predicate.progress(level).is_abort() {
            debug!("progress hook stopped the search at level {}", level);
            return Ok(CsiNextAction::Abort);
        }
        trace!(
            "level {}: {} pairs, {} unpaired",
            level,
            self.x.len(),
            self.vnotx.len()
        );

        if self.is_solution_possible(vam) {
            let Some(i) = self.pick_vertex(vam) else {
                unreachable!("a feasible level always has a non-empty row");
            };

            for k in vam.span(i) {
                let j = self.arena.get(k);
                self.extend(i, j);
                let action = self.with_refined(vam, i, j, |solver, refined| {
                    solver.recurse(refined, level + 1)
                })?;
                if action.is_abort() {
                    return Ok(CsiNextAction::Abort);
                }
                self.retract();
            }

            // Try again with `i` left out of the solution.
            if self.config.finding_common_subgraphs {
                self.v.erase(i.as_usize());
                self.vnotx.erase(i.as_usize());
                if self.recurse(vam, level + 1)?.is_abort() {
                    return Ok(CsiNextAction::Abort);
                }
                self.v.insert(i.as_usize());
                self.vnotx.insert(i.as_usize());
            }
        } else if self.is_solution_valid_size() {
            if self.config.monotonically_increasing {
                self.search_minimum = self.x.len();
            }
            self.solutions_found += 1;
            debug!(
                "solution #{} of size {} at level {}",
                self.solutions_found,
                self.x.len(),
                level
            );
            if self
                .processor
                .process(self.g1, &self.x, self.g2, &self.y)
                .is_abort()
            {
                debug!("solution processor stopped the search");
                return Ok(CsiNextAction::Abort);
            }
        }
        Ok(CsiNextAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use csi_common::vertex_ids;
    use csi_graph::Graph;

    use super::*;
    use crate::processor::CollectSolutions;

    fn v(id: usize) -> VertexId {
        VertexId::from(id)
    }

    #[test]
    fn initial_map_respects_self_loops() {
        // Only vertex 1 of each graph has a self-loop.
        let g1: Graph = Graph::from_edges(2, &[(1, 1)]).unwrap();
        let g2: Graph = Graph::from_edges(3, &[(1, 1), (0, 2)]).unwrap();
        let mut solver = Solver::with_processor(&g1, &g2, CollectSolutions::new());
        solver.reset();
        let vam = solver.initialize_vam().unwrap();
        assert_eq!(vam.get(&solver.arena, v(0)), vertex_ids(&[0, 2]).as_slice());
        assert_eq!(vam.get(&solver.arena, v(1)), &[v(1)]);
    }

    #[test]
    fn pick_vertex_prefers_shortest_row_then_first() {
        let g1: Graph = Graph::from_edges(3, &[(0, 0)]).unwrap();
        let g2: Graph = Graph::from_edges(3, &[(0, 0)]).unwrap();
        let mut solver = Solver::with_processor(&g1, &g2, CollectSolutions::new());
        solver.reset();
        let vam = solver.initialize_vam().unwrap();
        // Row 0 has one candidate, rows 1 and 2 have two each.
        assert_eq!(solver.pick_vertex(&vam), Some(v(0)));

        solver.extend(v(0), v(0));
        assert_eq!(solver.pick_vertex(&vam), Some(v(1)));
    }

    #[test]
    fn refine_drops_used_target_and_mismatched_edges() {
        // g1: 0 -> 1, 2 isolated. g2: 0 -> 1 -> 2.
        let g1: Graph = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let g2: Graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut solver = Solver::with_processor(&g1, &g2, CollectSolutions::new());
        solver.reset();
        let vam = solver.initialize_vam().unwrap();

        solver.extend(v(0), v(1));
        let refined = solver.refine(&vam, v(0), v(1)).unwrap();
        // 0 -> 1 in g1 needs 1 -> j' in g2: only 2.
        assert_eq!(refined.get(&solver.arena, v(1)), &[v(2)]);
        // 2 has no edge to 0, so j' must have none to 1: nothing qualifies.
        assert!(refined.get(&solver.arena, v(2)).is_empty());
        assert!(!refined.has_row(v(0)));
    }

    #[test]
    fn with_refined_frees_arena_on_every_path() {
        let g: Graph = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let mut solver = Solver::with_processor(&g, &g, CollectSolutions::new());
        solver.reset();
        let vam = solver.initialize_vam().unwrap();
        let top = solver.arena.len();

        solver.extend(v(0), v(0));
        let r = solver.with_refined(&vam, v(0), v(0), |_, _| Ok(CsiNextAction::Abort));
        assert_eq!(r, Ok(CsiNextAction::Abort));
        assert_eq!(solver.arena.len(), top);

        // An arena with no room beyond the initial map fails the next refine.
        solver.arena = crate::arena::StackArena::new(top, Some(top));
        let vam = solver.initialize_vam().unwrap();
        let r = solver.with_refined(&vam, v(0), v(0), |_, _| Ok(CsiNextAction::Continue));
        assert!(r.is_err());
        assert_eq!(solver.arena.len(), top);
    }

    #[test]
    fn retract_restores_availability_at_end() {
        let g: Graph = Graph::from_edges(3, &[]).unwrap();
        let mut solver = Solver::with_processor(&g, &g, CollectSolutions::new());
        solver.reset();
        solver.extend(v(0), v(2));
        assert!(!solver.vnotx.contains(0));
        solver.retract();
        assert!(solver.x.is_empty() && solver.y.is_empty());
        assert_eq!(solver.vnotx.values().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn feasibility_counts_rows_with_candidates() {
        let g1: Graph = Graph::from_edges(3, &[(2, 2)]).unwrap();
        let g2: Graph = Graph::from_edges(2, &[]).unwrap();
        let mut solver = Solver::with_processor(&g1, &g2, CollectSolutions::new());
        solver.reset();
        let vam = solver.initialize_vam().unwrap();
        // Vertex 2 has a self-loop g2 lacks, so at most two pairs.
        solver.set_minimum_solution_size(2);
        assert!(solver.is_solution_possible(&vam));
        solver.set_minimum_solution_size(3);
        assert!(!solver.is_solution_possible(&vam));

        solver.set_finding_common_subgraphs(false);
        assert!(!solver.is_solution_possible(&vam));
    }
}

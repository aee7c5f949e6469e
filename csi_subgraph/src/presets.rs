//! One-call wrappers for the common ways of running a [`Solver`].
//!
//! Each wrapper has a `_with_predicate` twin taking a custom
//! [`EquivalencePredicate`]. Processors are taken by value and handed back so
//! callers can read what they accumulated.

use csi_graph::GraphView;

use crate::equivalence::{CsiEquivalence, EquivalencePredicate};
use crate::error::CsiResult;
use crate::processor::{
    FirstIsomorphicSubgraph, MaximumIsomorphicSubgraphs, Solution, SolutionProcessor,
};
use crate::solver::Solver;

/// Reports every common subgraph of `g1` and `g2` to `processor`.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_common_isomorphic_subgraphs<G, S>(g1: &G, g2: &G, processor: S) -> CsiResult<S>
where
    G: GraphView,
    S: SolutionProcessor<G>,
{
    find_common_isomorphic_subgraphs_with_predicate(g1, g2, processor, CsiEquivalence)
}

/// [`find_common_isomorphic_subgraphs`] with a custom predicate.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_common_isomorphic_subgraphs_with_predicate<G, S, P>(
    g1: &G,
    g2: &G,
    processor: S,
    predicate: P,
) -> CsiResult<S>
where
    G: GraphView,
    S: SolutionProcessor<G>,
    P: EquivalencePredicate<G>,
{
    let mut solver = Solver::with_parts(g1, g2, processor, predicate);
    solver.run()?;
    Ok(solver.into_processor())
}

/// First common subgraph with exactly `size` vertices, or an empty solution
/// if there is none.
///
/// Which solution is "first" depends on vertex order and is not otherwise
/// specified.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_first_common_isomorphic_subgraph<G: GraphView>(
    g1: &G,
    g2: &G,
    size: usize,
) -> CsiResult<Solution> {
    find_first_common_isomorphic_subgraph_with_predicate(g1, g2, size, CsiEquivalence)
}

/// [`find_first_common_isomorphic_subgraph`] with a custom predicate.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_first_common_isomorphic_subgraph_with_predicate<G, P>(
    g1: &G,
    g2: &G,
    size: usize,
    predicate: P,
) -> CsiResult<Solution>
where
    G: GraphView,
    P: EquivalencePredicate<G>,
{
    let mut solver = Solver::with_parts(g1, g2, FirstIsomorphicSubgraph::new(), predicate);
    solver.set_minimum_solution_size(size);
    solver.set_maximum_solution_size(size);
    solver.run()?;
    Ok(solver.into_processor().into_solution())
}

/// Reports every embedding of all of `g1` into `g2`.
///
/// Every solution has `g1.vertex_count()` pairs. Nothing is reported when
/// `g1` is larger than `g2`.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_isomorphic_subgraphs<G, S>(g1: &G, g2: &G, processor: S) -> CsiResult<S>
where
    G: GraphView,
    S: SolutionProcessor<G>,
{
    find_isomorphic_subgraphs_with_predicate(g1, g2, processor, CsiEquivalence)
}

/// [`find_isomorphic_subgraphs`] with a custom predicate.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_isomorphic_subgraphs_with_predicate<G, S, P>(
    g1: &G,
    g2: &G,
    processor: S,
    predicate: P,
) -> CsiResult<S>
where
    G: GraphView,
    S: SolutionProcessor<G>,
    P: EquivalencePredicate<G>,
{
    let mut solver = Solver::with_parts(g1, g2, processor, predicate);
    solver.set_finding_common_subgraphs(false);
    solver.run()?;
    Ok(solver.into_processor())
}

/// All common subgraphs tied for the largest size.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_maximum_common_isomorphic_subgraphs<G: GraphView>(
    g1: &G,
    g2: &G,
) -> CsiResult<Vec<Solution>> {
    find_maximum_common_isomorphic_subgraphs_with_predicate(g1, g2, CsiEquivalence)
}

/// [`find_maximum_common_isomorphic_subgraphs`] with a custom predicate.
///
/// # Errors
///
/// Fails only when the solver's scratch arena is capped and runs out.
pub fn find_maximum_common_isomorphic_subgraphs_with_predicate<G, P>(
    g1: &G,
    g2: &G,
    predicate: P,
) -> CsiResult<Vec<Solution>>
where
    G: GraphView,
    P: EquivalencePredicate<G>,
{
    let mut solver = Solver::with_parts(g1, g2, MaximumIsomorphicSubgraphs::new(), predicate);
    solver.set_monotonically_increasing(true);
    solver.run()?;
    Ok(solver.into_processor().into_solutions())
}

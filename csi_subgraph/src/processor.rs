//! Consumers of search results.
//!
//! A [`SolutionProcessor`] sees every solution the moment the search reaches
//! it. Any closure with the right shape is a processor; the structs here
//! cover the common cases.

use std::fmt::Write as _;

use csi_common::{VertexId, vertex_ids};
use csi_graph::GraphView;
use tracing::debug;

use crate::equivalence::CsiNextAction;

/// Receives each solution as two parallel vertex lists.
///
/// `x[k]` in the first graph corresponds to `y[k]` in the second. The slices
/// borrow the solver's working state, so copy them to keep them.
pub trait SolutionProcessor<G: GraphView> {
    /// Handles one solution and says whether to keep searching.
    fn process(&mut self, g1: &G, x: &[VertexId], g2: &G, y: &[VertexId]) -> CsiNextAction;
}

impl<G, F> SolutionProcessor<G> for F
where
    G: GraphView,
    F: FnMut(&G, &[VertexId], &G, &[VertexId]) -> CsiNextAction,
{
    fn process(&mut self, g1: &G, x: &[VertexId], g2: &G, y: &[VertexId]) -> CsiNextAction {
        self(g1, x, g2, y)
    }
}

/// An owned copy of one solution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Solution {
    /// Vertices of the first graph.
    pub x: Vec<VertexId>,
    /// Matching vertices of the second graph, parallel to `x`.
    pub y: Vec<VertexId>,
}

impl Solution {
    /// Pairs `x[k]` with `y[k]`; both must have the same length.
    pub fn new(x: Vec<VertexId>, y: Vec<VertexId>) -> Self {
        debug_assert_eq!(x.len(), y.len(), "solution sides differ in length");
        Self { x, y }
    }

    /// Builds a solution from raw vertex numbers.
    pub fn from_raw(x: &[usize], y: &[usize]) -> Self {
        Self::new(vertex_ids(x), vertex_ids(y))
    }

    /// Number of vertex pairs.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True for the empty pairing.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The `(x[k], y[k])` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Prints every solution to standard output and keeps going.
#[derive(Clone, Debug, Default)]
pub struct ShowSolution {
    n: usize,
}

impl ShowSolution {
    /// Printer starting at solution #0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solutions printed so far.
    pub const fn count(&self) -> usize {
        self.n
    }

    fn render(&self, x: &[VertexId], y: &[VertexId]) -> String {
        let mut out = format!(
            "Common subgraph isomorphism solution #{} found:\n  x = [",
            self.n
        );
        for i in x {
            let _ = write!(out, " {}", i.as_usize());
        }
        out.push_str(" ]\n  y = [");
        for j in y {
            let _ = write!(out, " {}", j.as_usize());
        }
        out.push_str(" ]");
        out
    }
}

impl<G: GraphView> SolutionProcessor<G> for ShowSolution {
    fn process(&mut self, _g1: &G, x: &[VertexId], _g2: &G, y: &[VertexId]) -> CsiNextAction {
        println!("{}", self.render(x, y));
        self.n += 1;
        CsiNextAction::Continue
    }
}

/// Keeps the first solution and stops the search.
#[derive(Clone, Debug, Default)]
pub struct FirstIsomorphicSubgraph {
    solution: Option<Solution>,
}

impl FirstIsomorphicSubgraph {
    /// Processor with nothing found yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The solution found, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// The solution found, or an empty one if the search found nothing.
    pub fn into_solution(self) -> Solution {
        self.solution.unwrap_or_default()
    }
}

impl<G: GraphView> SolutionProcessor<G> for FirstIsomorphicSubgraph {
    fn process(&mut self, _g1: &G, x: &[VertexId], _g2: &G, y: &[VertexId]) -> CsiNextAction {
        self.solution = Some(Solution::new(x.to_vec(), y.to_vec()));
        CsiNextAction::Abort
    }
}

/// Keeps every solution tied for the largest size seen.
///
/// Meant for monotonic searches, where sizes never shrink: a larger solution
/// discards everything kept so far.
#[derive(Clone, Debug, Default)]
pub struct MaximumIsomorphicSubgraphs {
    solutions: Vec<Solution>,
}

impl MaximumIsomorphicSubgraphs {
    /// Processor with nothing found yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest solutions found so far, in discovery order.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Consumes the processor, returning the largest solutions.
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

impl<G: GraphView> SolutionProcessor<G> for MaximumIsomorphicSubgraphs {
    fn process(&mut self, _g1: &G, x: &[VertexId], _g2: &G, y: &[VertexId]) -> CsiNextAction {
        if self.solutions.first().is_some_and(|s| x.len() > s.len()) {
            debug!(
                "larger solution of size {} replaces {} kept",
                x.len(),
                self.solutions.len()
            );
            self.solutions.clear();
        }
        self.solutions.push(Solution::new(x.to_vec(), y.to_vec()));
        CsiNextAction::Continue
    }
}

/// Collects solutions, optionally stopping after a fixed number.
#[derive(Clone, Debug, Default)]
pub struct CollectSolutions {
    solutions: Vec<Solution>,
    limit: Option<usize>,
}

impl CollectSolutions {
    /// Collects every solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts the search once `limit` solutions are collected.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            solutions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Solutions in discovery order.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Number of solutions collected.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// True if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Consumes the processor, returning its solutions.
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

impl<G: GraphView> SolutionProcessor<G> for CollectSolutions {
    fn process(&mut self, _g1: &G, x: &[VertexId], _g2: &G, y: &[VertexId]) -> CsiNextAction {
        self.solutions.push(Solution::new(x.to_vec(), y.to_vec()));
        match self.limit {
            Some(limit) if self.solutions.len() >= limit => CsiNextAction::Abort,
            _ => CsiNextAction::Continue,
        }
    }
}

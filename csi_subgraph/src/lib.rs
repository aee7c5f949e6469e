//! Common subgraph isomorphism.
//!
//! Given two directed multigraphs, the [`Solver`] finds vertex subsets of
//! each, of equal size, and a pairing between them such that every two
//! paired vertices have the same number of edges between them in both graphs,
//! in both directions. Self-loops and parallel edges count.
//!
//! The search is a depth-first backtracking search. Each level keeps a
//! candidate map ([`Vam`]) listing, for every unpaired vertex of the first
//! graph, which vertices of the second graph it could still pair with. Maps
//! for deeper levels are carved out of a per-solver [`StackArena`] and freed
//! in bulk when their level returns.
//!
//! Callers plug in an [`EquivalencePredicate`] to restrict pairings and a
//! [`SolutionProcessor`] to consume solutions. For the common cases, see the
//! functions in [`presets`].
//!
//! ```ignore
//! use csi_graph::Graph;
//! use csi_subgraph::find_maximum_common_isomorphic_subgraphs;
//!
//! let g1: Graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)])?;
//! let g2: Graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)])?;
//! let largest = find_maximum_common_isomorphic_subgraphs(&g1, &g2)?;
//! assert_eq!(largest[0].len(), 3);
//! ```

pub mod arena;
pub mod batch;
pub mod cancel;
pub mod equivalence;
mod error;
pub mod presets;
pub mod processor;
pub mod profiling;
mod search;
mod solver;
pub mod vam;

pub use arena::{Checkpoint, StackArena};
pub use batch::find_maximum_common_isomorphic_subgraphs_batch;
pub use cancel::{CancelToken, Cancellable, ProgressSnapshot, SearchProgress};
pub use equivalence::{CsiEquivalence, CsiNextAction, EquivalencePredicate, VertexValueEquivalence};
pub use error::{CsiError, CsiResult};
pub use presets::*;
pub use processor::{
    CollectSolutions, FirstIsomorphicSubgraph, MaximumIsomorphicSubgraphs, ShowSolution, Solution,
    SolutionProcessor,
};
pub use solver::{Solver, SolverState};
pub use vam::Vam;

pub use csi_common::{CsiConfig, VertexId};

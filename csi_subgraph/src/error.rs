//! Error types for the subgraph solver.
//!
//! Invalid search configuration is not an error: an impossible size range or
//! an exact search against a smaller graph simply yields no solutions. The
//! only failure a search itself can produce is running out of scratch space.

use csi_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while preparing or running a search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsiError {
    /// The scratch arena would grow past its configured limit.
    #[error("scratch arena exhausted: {requested} more slots requested with {in_use} in use (limit {limit})")]
    ArenaExhausted {
        /// Slots the failing reservation asked for.
        requested: usize,
        /// Slots already in use.
        in_use: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// A graph could not be built or loaded.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Convenience alias used throughout the solver.
pub type CsiResult<T> = Result<T, CsiError>;

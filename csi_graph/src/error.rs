//! Error types for graph construction and loading.

use csi_common::{EdgeId, VertexId};
use thiserror::Error;

/// Errors raised while building, editing or loading a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex ID is not part of the graph.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    /// An edge ID is not part of the graph.
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    /// The same vertex was listed twice where each must be unique.
    #[error("vertex {0} listed more than once")]
    DuplicateVertex(VertexId),

    /// Malformed edge-list text.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl GraphError {
    /// Create a parse error for a one-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

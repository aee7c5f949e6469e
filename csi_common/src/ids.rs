use std::fmt;
use std::hash::Hash;

/// Stable identifier of a vertex within one graph.
///
/// Vertex IDs of a graph with `n` vertices are always the dense range `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    /// The underlying raw integer index.
    inner: u32,
}

impl VertexId {
    /// Creates a vertex identifier from a raw integer.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.inner)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(id: usize) -> Self {
        Self { inner: id as u32 }
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.inner as Self
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.inner
    }
}

/// Stable identifier of an edge within one graph.
///
/// Like vertices, edge IDs are dense: `0..edge_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    /// The underlying raw integer index.
    inner: u32,
}

impl EdgeId {
    /// Creates an edge identifier from a raw integer.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.inner)
    }
}

impl From<usize> for EdgeId {
    #[inline]
    fn from(id: usize) -> Self {
        Self { inner: id as u32 }
    }
}

impl From<EdgeId> for usize {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.inner as Self
    }
}

/// Converts raw integers into vertex identifiers.
///
/// Mostly useful when writing down expected solutions by hand.
pub fn vertex_ids(raw: &[usize]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId::from).collect()
}

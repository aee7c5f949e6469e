use csi_common::{EdgeId, VertexId};

/// Read-only access to a directed multigraph with dense, stable IDs.
///
/// Vertex IDs are `0..vertex_count()` and edge IDs are `0..edge_count()`.
/// Parallel edges and self-loops are allowed. The accessors taking an ID
/// panic when the ID is out of range, the same way slice indexing does.
///
/// Implementations must not change topology while a borrower (for example a
/// running solver) holds a shared reference.
pub trait GraphView {
    /// Payload stored at each vertex.
    type VertexValue;
    /// Payload stored at each edge.
    type EdgeValue;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Edges whose source is `v`, in insertion order.
    fn out_edges(&self, v: VertexId) -> &[EdgeId];

    /// Edges whose target is `v`, in insertion order.
    fn in_edges(&self, v: VertexId) -> &[EdgeId];

    /// Source vertex of `e`.
    fn edge_source(&self, e: EdgeId) -> VertexId;

    /// Target vertex of `e`.
    fn edge_target(&self, e: EdgeId) -> VertexId;

    /// Payload of vertex `v`.
    fn vertex_value(&self, v: VertexId) -> &Self::VertexValue;

    /// Payload of edge `e`.
    fn edge_value(&self, e: EdgeId) -> &Self::EdgeValue;

    /// True if the graph has no vertices.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// True if `v` names a vertex of this graph.
    fn contains_vertex(&self, v: VertexId) -> bool {
        v.as_usize() < self.vertex_count()
    }

    /// True if `e` names an edge of this graph.
    fn contains_edge(&self, e: EdgeId) -> bool {
        e.as_usize() < self.edge_count()
    }

    /// All vertex IDs in ascending order.
    fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count()).map(VertexId::from)
    }

    /// All edge IDs in ascending order.
    fn edges(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edge_count()).map(EdgeId::from)
    }

    /// Appends to `out` every edge from `source` to `target`.
    ///
    /// Usually zero or one edge, more when the graph has parallel edges.
    fn find_edges_between(&self, source: VertexId, target: VertexId, out: &mut Vec<EdgeId>) {
        out.extend(
            self.out_edges(source)
                .iter()
                .copied()
                .filter(|&e| self.edge_target(e) == target),
        );
    }

    /// Number of edges from `source` to `target`.
    fn count_edges_between(&self, source: VertexId, target: VertexId) -> usize {
        self.out_edges(source)
            .iter()
            .filter(|&&e| self.edge_target(e) == target)
            .count()
    }
}

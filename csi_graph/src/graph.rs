//! Adjacency-list directed multigraph.

use csi_common::{EdgeId, VertexId};
use tracing::trace;

use crate::{GraphError, GraphView};

/// A vertex with its payload and incident edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex<V> {
    id: VertexId,
    value: V,
    out_edges: Vec<EdgeId>,
    in_edges: Vec<EdgeId>,
}

impl<V> Vertex<V> {
    /// ID of this vertex.
    pub const fn id(&self) -> VertexId {
        self.id
    }

    /// Payload of this vertex.
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Outgoing edges in insertion order.
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    /// Incoming edges in insertion order.
    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    /// Number of incoming edges.
    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }
}

/// A directed edge with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge<E> {
    id: EdgeId,
    source: VertexId,
    target: VertexId,
    value: E,
}

impl<E> Edge<E> {
    /// ID of this edge.
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Source vertex.
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Target vertex.
    pub const fn target(&self) -> VertexId {
        self.target
    }

    /// Payload of this edge.
    pub const fn value(&self) -> &E {
        &self.value
    }

    /// True if source and target are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Directed multigraph with dense vertex and edge IDs.
///
/// Vertices are never erased, so vertex IDs are stable for the life of the
/// graph. Erasing an edge hands its ID to the last edge, keeping edge IDs in
/// `0..edge_count()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<V = (), E = ()> {
    vertices: Vec<Vertex<V>>,
    edges: Vec<Edge<E>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph.
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Creates an empty graph with room for the given number of vertices and edges.
    pub fn with_capacity(n_vertices: usize, n_edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n_vertices),
            edges: Vec::with_capacity(n_edges),
        }
    }

    /// Looks up a vertex by ID.
    pub fn find_vertex(&self, id: VertexId) -> Option<&Vertex<V>> {
        self.vertices.get(id.as_usize())
    }

    /// Looks up an edge by ID.
    pub fn find_edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(id.as_usize())
    }

    /// Mutable access to a vertex payload. Topology cannot be changed this way.
    pub fn vertex_value_mut(&mut self, id: VertexId) -> Option<&mut V> {
        self.vertices.get_mut(id.as_usize()).map(|v| &mut v.value)
    }

    /// Mutable access to an edge payload.
    pub fn edge_value_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.edges.get_mut(id.as_usize()).map(|e| &mut e.value)
    }

    /// Iterates over all vertices in ID order.
    pub fn vertex_iter(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.iter()
    }

    /// Iterates over all edges in ID order.
    pub fn edge_iter(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edges.iter()
    }

    /// Adds a vertex and returns its ID, which is always the previous vertex count.
    pub fn insert_vertex(&mut self, value: V) -> VertexId {
        let id = VertexId::from(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            value,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        });
        id
    }

    /// Adds an edge from `source` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either endpoint is not in the graph.
    pub fn insert_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        value: E,
    ) -> Result<EdgeId, GraphError> {
        for v in [source, target] {
            if v.as_usize() >= self.vertices.len() {
                return Err(GraphError::UnknownVertex(v));
            }
        }
        let id = EdgeId::from(self.edges.len());
        self.edges.push(Edge {
            id,
            source,
            target,
            value,
        });
        self.vertices[source.as_usize()].out_edges.push(id);
        self.vertices[target.as_usize()].in_edges.push(id);
        Ok(id)
    }

    /// Removes an edge and returns its payload.
    ///
    /// The edge that previously had the largest ID takes over `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownEdge`] if `id` is not in the graph.
    pub fn erase_edge(&mut self, id: EdgeId) -> Result<E, GraphError> {
        if id.as_usize() >= self.edges.len() {
            return Err(GraphError::UnknownEdge(id));
        }
        let removed = self.edges.swap_remove(id.as_usize());
        self.vertices[removed.source.as_usize()]
            .out_edges
            .retain(|&e| e != id);
        self.vertices[removed.target.as_usize()]
            .in_edges
            .retain(|&e| e != id);

        // Renumber the edge that moved into the hole.
        if let Some(moved) = self.edges.get_mut(id.as_usize()) {
            let old = moved.id;
            moved.id = id;
            let (source, target) = (moved.source, moved.target);
            trace!("edge {} renumbered to {}", old, id);
            for e in &mut self.vertices[source.as_usize()].out_edges {
                if *e == old {
                    *e = id;
                }
            }
            for e in &mut self.vertices[target.as_usize()].in_edges {
                if *e == old {
                    *e = id;
                }
            }
        }
        Ok(removed.value)
    }
}

impl<V: Default, E: Default> Graph<V, E> {
    /// Builds a graph with `n_vertices` default-valued vertices and the listed
    /// `(source, target)` edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if an edge endpoint is `>= n_vertices`.
    pub fn from_edges(n_vertices: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut g = Self::with_capacity(n_vertices, edges.len());
        for _ in 0..n_vertices {
            g.insert_vertex(V::default());
        }
        for &(s, t) in edges {
            g.insert_edge(VertexId::from(s), VertexId::from(t), E::default())?;
        }
        Ok(g)
    }
}

impl<V, E> GraphView for Graph<V, E> {
    type VertexValue = V;
    type EdgeValue = E;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.as_usize()].out_edges
    }

    fn in_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.as_usize()].in_edges
    }

    fn edge_source(&self, e: EdgeId) -> VertexId {
        self.edges[e.as_usize()].source
    }

    fn edge_target(&self, e: EdgeId) -> VertexId {
        self.edges[e.as_usize()].target
    }

    fn vertex_value(&self, v: VertexId) -> &V {
        &self.vertices[v.as_usize()].value
    }

    fn edge_value(&self, e: EdgeId) -> &E {
        &self.edges[e.as_usize()].value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: usize) -> VertexId {
        VertexId::from(id)
    }

    #[test]
    fn insert_assigns_dense_ids() {
        let mut g: Graph<&str, ()> = Graph::new();
        assert_eq!(g.insert_vertex("a"), v(0));
        assert_eq!(g.insert_vertex("b"), v(1));
        let e = g.insert_edge(v(0), v(1), ()).unwrap();
        assert_eq!(e, EdgeId::new(0));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(*g.vertex_value(v(1)), "b");
        assert_eq!(g.out_edges(v(0)), &[e]);
        assert_eq!(g.in_edges(v(1)), &[e]);
    }

    #[test]
    fn insert_edge_rejects_unknown_endpoint() {
        let mut g: Graph = Graph::new();
        g.insert_vertex(());
        assert_eq!(
            g.insert_edge(v(0), v(3), ()),
            Err(GraphError::UnknownVertex(v(3)))
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn parallel_edges_and_self_loops_are_kept() {
        let g: Graph = Graph::from_edges(2, &[(0, 1), (0, 1), (1, 1)]).unwrap();
        assert_eq!(g.count_edges_between(v(0), v(1)), 2);
        assert_eq!(g.count_edges_between(v(1), v(1)), 1);
        assert_eq!(g.count_edges_between(v(1), v(0)), 0);
        assert!(g.find_edge(EdgeId::new(2)).unwrap().is_self_loop());
    }

    #[test]
    fn erase_edge_renumbers_last_edge() {
        let mut g: Graph<(), u8> = Graph::new();
        for _ in 0..3 {
            g.insert_vertex(());
        }
        g.insert_edge(v(0), v(1), 10).unwrap();
        g.insert_edge(v(1), v(2), 20).unwrap();
        g.insert_edge(v(2), v(0), 30).unwrap();

        assert_eq!(g.erase_edge(EdgeId::new(0)), Ok(10));
        assert_eq!(g.edge_count(), 2);

        // The old edge 2 (2 -> 0) now has ID 0.
        let moved = g.find_edge(EdgeId::new(0)).unwrap();
        assert_eq!((moved.source(), moved.target(), *moved.value()), (v(2), v(0), 30));
        assert_eq!(g.out_edges(v(2)), &[EdgeId::new(0)]);
        assert_eq!(g.in_edges(v(0)), &[EdgeId::new(0)]);
        assert!(g.out_edges(v(0)).is_empty());
        assert!(g.in_edges(v(1)).is_empty());
    }

    #[test]
    fn erase_last_edge_needs_no_renumbering() {
        let mut g: Graph = Graph::from_edges(2, &[(0, 1), (1, 0)]).unwrap();
        g.erase_edge(EdgeId::new(1)).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.out_edges(v(0)), &[EdgeId::new(0)]);
        assert!(g.out_edges(v(1)).is_empty());
        assert_eq!(
            g.erase_edge(EdgeId::new(5)),
            Err(GraphError::UnknownEdge(EdgeId::new(5)))
        );
    }
}

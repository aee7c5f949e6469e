//! Whole-graph algorithms: cycles, connectivity and subgraph copies.
//!
//! Connectivity is weak connectivity: edge direction is ignored. All
//! algorithms run in `O(|V| + |E|)` except [`break_cycles`], which also pays
//! for the edge erasures.

use std::collections::HashMap;

use csi_common::{DenseIntegerSet, EdgeId, VertexId};
use tracing::debug;

use crate::{Graph, GraphError, GraphView};

/// DFS colouring of a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Depth-first search over out-edges that reports every back edge.
///
/// A back edge targets a vertex on the current DFS path, so the graph is
/// acyclic exactly when no back edge exists. `on_back_edge` returns `false`
/// to stop the search early.
fn visit_back_edges<G: GraphView>(g: &G, mut on_back_edge: impl FnMut(EdgeId) -> bool) {
    let n = g.vertex_count();
    let mut mark = vec![Mark::Unvisited; n];
    // (vertex, index of the next out-edge to follow)
    let mut stack: Vec<(VertexId, usize)> = Vec::new();

    for root in g.vertices() {
        if mark[root.as_usize()] != Mark::Unvisited {
            continue;
        }
        mark[root.as_usize()] = Mark::OnPath;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (v, cursor) = *top;
            let out = g.out_edges(v);
            if cursor == out.len() {
                mark[v.as_usize()] = Mark::Done;
                stack.pop();
                continue;
            }
            top.1 += 1;
            let e = out[cursor];

            let t = g.edge_target(e);
            match mark[t.as_usize()] {
                Mark::OnPath => {
                    if !on_back_edge(e) {
                        return;
                    }
                }
                Mark::Unvisited => {
                    mark[t.as_usize()] = Mark::OnPath;
                    stack.push((t, 0));
                }
                Mark::Done => {}
            }
        }
    }
}

/// Determines whether any edges of the graph form a cycle.
///
/// Self-loops count as cycles.
pub fn contains_cycle<G: GraphView>(g: &G) -> bool {
    let mut found = false;
    visit_back_edges(g, |_| {
        found = true;
        false
    });
    found
}

/// Erases edges until the graph is acyclic and returns how many were erased.
///
/// The erased edges are the back edges of a depth-first search, so which
/// edges go depends on vertex and edge order rather than on any weighting.
pub fn break_cycles<V, E>(g: &mut Graph<V, E>) -> usize {
    let mut back_edges: Vec<EdgeId> = Vec::new();
    visit_back_edges(&*g, |e| {
        back_edges.push(e);
        true
    });

    // Highest ID first: erasing moves the last edge into the hole, and every
    // edge still scheduled has a smaller ID than the one being erased.
    back_edges.sort_unstable_by(|a, b| b.cmp(a));
    for &e in &back_edges {
        let erased = g.erase_edge(e);
        debug_assert!(erased.is_ok(), "back edge {e} vanished before erasure");
    }
    debug!("broke cycles by erasing {} edges", back_edges.len());
    back_edges.len()
}

/// Vertices adjacent to `v` in either direction.
fn neighbours<G: GraphView>(g: &G, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
    let out = g.out_edges(v).iter().map(move |&e| g.edge_target(e));
    let inc = g.in_edges(v).iter().map(move |&e| g.edge_source(e));
    out.chain(inc)
}

/// Tests whether the graph is (weakly) connected.
///
/// The empty graph is connected. This is a special case of
/// [`find_connected_components`] that stops after the first component.
pub fn is_connected<G: GraphView>(g: &G) -> bool {
    if g.is_empty() {
        return true;
    }
    let mut seen = vec![false; g.vertex_count()];
    let mut n_seen = 0;
    let mut worklist = DenseIntegerSet::new(g.vertex_count());
    worklist.insert(0);

    loop {
        let Some(id) = worklist.values().next() else {
            break;
        };
        worklist.erase(id);
        if seen[id] {
            continue;
        }
        seen[id] = true;
        n_seen += 1;
        for n in neighbours(g, VertexId::from(id)) {
            if !seen[n.as_usize()] {
                worklist.insert(n.as_usize());
            }
        }
    }
    n_seen == g.vertex_count()
}

/// Result of [`find_connected_components`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedComponents {
    /// Number of components.
    pub count: usize,
    /// Component number of each vertex, indexed by vertex ID.
    pub component_of: Vec<usize>,
}

impl ConnectedComponents {
    /// Vertices of component `c` in ascending ID order.
    pub fn members(&self, c: usize) -> Vec<VertexId> {
        self.component_of
            .iter()
            .enumerate()
            .filter(|&(_, &comp)| comp == c)
            .map(|(v, _)| VertexId::from(v))
            .collect()
    }
}

/// Numbers the (weakly) connected components of a graph.
///
/// Components are numbered from zero in order of their lowest vertex ID.
pub fn find_connected_components<G: GraphView>(g: &G) -> ConnectedComponents {
    const NOT_SEEN: usize = usize::MAX;
    let n = g.vertex_count();
    let mut component_of = vec![NOT_SEEN; n];
    let mut count = 0;
    let mut worklist = DenseIntegerSet::new(n);

    for root in 0..n {
        if component_of[root] != NOT_SEEN {
            continue;
        }
        worklist.insert(root);
        loop {
            let Some(id) = worklist.values().next() else {
                break;
            };
            worklist.erase(id);
            if component_of[id] != NOT_SEEN {
                continue;
            }
            component_of[id] = count;
            for nb in neighbours(g, VertexId::from(id)) {
                if component_of[nb.as_usize()] == NOT_SEEN {
                    worklist.insert(nb.as_usize());
                }
            }
        }
        count += 1;
    }

    ConnectedComponents {
        count,
        component_of,
    }
}

/// Copies the listed vertices and every edge among them into a new graph.
///
/// Vertex `ids[k]` of `g` becomes vertex `k` of the result. Edges keep their
/// relative order.
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for an ID not in `g` and
/// [`GraphError::DuplicateVertex`] for an ID listed twice.
pub fn copy_subgraph<G>(
    g: &G,
    ids: &[VertexId],
) -> Result<Graph<G::VertexValue, G::EdgeValue>, GraphError>
where
    G: GraphView,
    G::VertexValue: Clone,
    G::EdgeValue: Clone,
{
    let mut result = Graph::with_capacity(ids.len(), 0);
    let mut old_to_new: HashMap<VertexId, VertexId> = HashMap::with_capacity(ids.len());

    for &old in ids {
        if !g.contains_vertex(old) {
            return Err(GraphError::UnknownVertex(old));
        }
        if old_to_new.contains_key(&old) {
            return Err(GraphError::DuplicateVertex(old));
        }
        let new = result.insert_vertex(g.vertex_value(old).clone());
        old_to_new.insert(old, new);
    }

    for &old in ids {
        let new_source = old_to_new[&old];
        for &e in g.out_edges(old) {
            if let Some(&new_target) = old_to_new.get(&g.edge_target(e)) {
                result.insert_edge(new_source, new_target, g.edge_value(e).clone())?;
            }
        }
    }
    Ok(result)
}

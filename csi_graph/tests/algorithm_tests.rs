#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use csi_graph::algorithm::{
    break_cycles, contains_cycle, copy_subgraph, find_connected_components, is_connected,
};
use csi_graph::{Graph, GraphError, GraphView, VertexId};
use itertools::Itertools;
use rstest::rstest;

lazy_static::lazy_static! {
    static ref TRIANGLE: Graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    static ref PATH: Graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    static ref TWO_ISLANDS: Graph = Graph::from_edges(5, &[(0, 1), (3, 2), (4, 3)]).unwrap();
    static ref ISOLATED: Graph = Graph::from_edges(3, &[]).unwrap();
}

fn ids(raw: &[usize]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId::from).collect()
}

#[rstest]
#[case(&TRIANGLE, true)]
#[case(&PATH, false)]
#[case(&TWO_ISLANDS, false)]
#[case(&ISOLATED, false)]
fn cycle_detection(#[case] g: &Graph, #[case] expected: bool) {
    assert_eq!(contains_cycle(g), expected);
}

#[rstest]
#[case(&TRIANGLE, true, 1)]
#[case(&PATH, true, 1)]
#[case(&TWO_ISLANDS, false, 2)]
#[case(&ISOLATED, false, 3)]
fn connectivity(#[case] g: &Graph, #[case] connected: bool, #[case] n_components: usize) {
    assert_eq!(is_connected(g), connected);
    assert_eq!(find_connected_components(g).count, n_components);
}

#[test]
fn components_numbered_by_lowest_vertex() {
    let comps = find_connected_components(&*TWO_ISLANDS);
    assert_eq!(comps.component_of, vec![0, 0, 1, 1, 1]);
    assert_eq!(comps.members(1), ids(&[2, 3, 4]));
}

#[test]
fn break_cycles_on_triangle_erases_one_edge() {
    let mut g = TRIANGLE.clone();
    assert_eq!(break_cycles(&mut g), 1);
    assert_eq!(g.edge_count(), 2);
    assert!(!contains_cycle(&g));
}

#[test]
fn break_cycles_leaves_dag_alone() {
    let mut g = PATH.clone();
    assert_eq!(break_cycles(&mut g), 0);
    assert_eq!(g, *PATH);
}

#[test]
fn copy_subgraph_keeps_induced_edges() {
    let g: Graph<char, u8> = {
        let mut g = Graph::new();
        for c in ['a', 'b', 'c', 'd'] {
            g.insert_vertex(c);
        }
        g.insert_edge(VertexId::new(0), VertexId::new(1), 1).unwrap();
        g.insert_edge(VertexId::new(1), VertexId::new(2), 2).unwrap();
        g.insert_edge(VertexId::new(2), VertexId::new(2), 3).unwrap();
        g.insert_edge(VertexId::new(3), VertexId::new(0), 4).unwrap();
        g
    };

    let sub = copy_subgraph(&g, &ids(&[2, 1])).unwrap();
    assert_eq!(sub.vertex_count(), 2);
    assert_eq!(*sub.vertex_value(VertexId::new(0)), 'c');
    assert_eq!(*sub.vertex_value(VertexId::new(1)), 'b');
    // 2 -> 2 and 1 -> 2 survive, the rest touch excluded vertices.
    assert_eq!(sub.edge_count(), 2);
    assert_eq!(sub.count_edges_between(VertexId::new(0), VertexId::new(0)), 1);
    assert_eq!(sub.count_edges_between(VertexId::new(1), VertexId::new(0)), 1);
    let payloads = sub.edges().map(|e| *sub.edge_value(e)).sorted().collect_vec();
    assert_eq!(payloads, vec![2, 3]);
}

#[test]
fn copy_subgraph_rejects_bad_ids() {
    assert_eq!(
        copy_subgraph(&*PATH, &ids(&[0, 0])),
        Err(GraphError::DuplicateVertex(VertexId::new(0)))
    );
    assert_eq!(
        copy_subgraph(&*PATH, &ids(&[7])),
        Err(GraphError::UnknownVertex(VertexId::new(7)))
    );
}

// Property-based tests
#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[derive(Clone, Debug)]
    struct SmallGraph {
        n: usize,
        edges: Vec<(usize, usize)>,
    }

    impl Arbitrary for SmallGraph {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = 1 + usize::arbitrary(g) % 8;
            let m = usize::arbitrary(g) % 16;
            let edges = (0..m)
                .map(|_| (usize::arbitrary(g) % n, usize::arbitrary(g) % n))
                .collect();
            Self { n, edges }
        }
    }

    impl SmallGraph {
        fn build(&self) -> Graph {
            Graph::from_edges(self.n, &self.edges).unwrap()
        }
    }

    quickcheck! {
        fn prop_break_cycles_makes_acyclic(sg: SmallGraph) -> bool {
            let mut g = sg.build();
            let had_cycle = contains_cycle(&g);
            let erased = break_cycles(&mut g);
            !contains_cycle(&g)
                && (erased > 0) == had_cycle
                && g.edge_count() + erased == sg.edges.len()
        }

        fn prop_components_agree_with_connectivity(sg: SmallGraph) -> bool {
            let g = sg.build();
            let comps = find_connected_components(&g);
            let endpoints_agree = sg
                .edges
                .iter()
                .all(|&(s, t)| comps.component_of[s] == comps.component_of[t]);
            endpoints_agree && (comps.count == 1) == is_connected(&g)
        }

        fn prop_copy_of_all_vertices_is_identity(sg: SmallGraph) -> bool {
            let g = sg.build();
            let all = g.vertices().collect_vec();
            let copy = copy_subgraph(&g, &all).unwrap();
            copy.vertex_count() == g.vertex_count()
                && copy.edge_count() == g.edge_count()
                && all.iter().cartesian_product(all.iter()).all(|(&a, &b)| {
                    copy.count_edges_between(a, b) == g.count_edges_between(a, b)
                })
        }
    }
}

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::OnceLock;

use csi_graph::{Graph, GraphView};
use csi_subgraph::{Solution, VertexId};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Routes `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_test_logger() {
    LOGGER.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(n, edges).unwrap()
}

/// Checks the structural guarantees every solution must satisfy.
pub fn assert_valid_solution<G: GraphView>(g1: &G, x: &[VertexId], g2: &G, y: &[VertexId]) {
    assert_eq!(x.len(), y.len(), "sides differ in length");
    assert_eq!(x.iter().collect::<HashSet<_>>().len(), x.len(), "duplicate in x: {x:?}");
    assert_eq!(y.iter().collect::<HashSet<_>>().len(), y.len(), "duplicate in y: {y:?}");
    assert!(x.iter().all(|&v| g1.contains_vertex(v)), "x out of range: {x:?}");
    assert!(y.iter().all(|&v| g2.contains_vertex(v)), "y out of range: {y:?}");
    for a in 0..x.len() {
        for b in 0..x.len() {
            assert_eq!(
                g1.count_edges_between(x[a], x[b]),
                g2.count_edges_between(y[a], y[b]),
                "edge count differs for pairs ({}, {}) -> ({}, {})",
                x[a],
                y[a],
                x[b],
                y[b]
            );
        }
    }
}

/// Solutions as a set, for comparing runs regardless of order.
pub fn solution_set(solutions: &[Solution]) -> HashSet<Solution> {
    solutions.iter().cloned().collect()
}

/// Pairs of a solution sorted by first-graph vertex, as raw numbers.
pub fn normalized(solution: &Solution) -> Vec<(usize, usize)> {
    let mut pairs: Vec<_> = solution
        .pairs()
        .map(|(a, b)| (a.as_usize(), b.as_usize()))
        .collect();
    pairs.sort_unstable();
    pairs
}

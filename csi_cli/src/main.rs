//! CSI command-line tool
//!
//! Loads two graphs from plain-text edge lists and prints their common
//! subgraph isomorphisms.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::fs;

use clap::Parser;
use csi_graph::{Graph, GraphView, parse_edge_list};
use csi_subgraph::{
    CsiNextAction, MaximumIsomorphicSubgraphs, ShowSolution, SolutionProcessor, Solver, VertexId,
};
use tracing::info;

use args::{Args, ModeArg};

/// Reads and parses one edge-list file.
fn load_graph(path: &str) -> Result<Graph, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    let graph = parse_edge_list(&text).map_err(|e| format!("{path}: {e}"))?;
    info!(
        "Loaded {}: {} vertices, {} edges",
        path,
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let g1 = load_graph(&args.graph1)?;
    let g2 = load_graph(&args.graph2)?;
    let config = args.to_config();
    let limit = args.effective_limit();

    info!("Searching in {:?} mode", args.mode);

    let printed = if args.mode == ModeArg::Maximum {
        // Smaller solutions are printed-then-discarded otherwise, so collect
        // first and print only the survivors.
        let mut solver =
            Solver::with_processor(&g1, &g2, MaximumIsomorphicSubgraphs::new()).with_config(config);
        solver.run()?;
        let mut show = ShowSolution::new();
        for s in solver.processor().solutions() {
            if limit.is_some_and(|l| show.count() >= l) {
                break;
            }
            show.process(&g1, &s.x, &g2, &s.y);
        }
        show.count()
    } else {
        let mut show = ShowSolution::new();
        let mut solver = Solver::with_processor(
            &g1,
            &g2,
            |g1: &Graph, x: &[VertexId], g2: &Graph, y: &[VertexId]| {
                show.process(g1, x, g2, y);
                if limit.is_some_and(|l| show.count() >= l) {
                    CsiNextAction::Abort
                } else {
                    CsiNextAction::Continue
                }
            },
        )
        .with_config(config);
        solver.run()?;
        drop(solver);
        show.count()
    };

    if printed == 0 {
        println!("No common subgraph isomorphism found.");
    }
    Ok(())
}

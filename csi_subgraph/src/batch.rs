//! Many independent searches at once.
//!
//! Every pair of graphs gets its own solver and arena, so the searches share
//! nothing but read access to the graphs. With the `rayon` feature the pairs
//! are spread over the global thread pool; without it they run in order.

use csi_graph::GraphView;
use tracing::info;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::CsiResult;
use crate::presets::find_maximum_common_isomorphic_subgraphs;
use crate::processor::Solution;

/// Maximum common subgraphs for each `(g1, g2)` pair, in input order.
///
/// # Errors
///
/// Each entry fails independently if its solver's arena is capped and runs
/// out.
pub fn find_maximum_common_isomorphic_subgraphs_batch<G>(
    pairs: &[(&G, &G)],
) -> Vec<CsiResult<Vec<Solution>>>
where
    G: GraphView + Sync,
{
    info!("batch of {} maximum common subgraph searches", pairs.len());

    #[cfg(feature = "rayon")]
    let iter = pairs.par_iter();

    #[cfg(not(feature = "rayon"))]
    let iter = pairs.iter();

    iter.map(|&(g1, g2)| find_maximum_common_isomorphic_subgraphs(g1, g2))
        .collect()
}

#[cfg(test)]
mod tests {
    use csi_graph::Graph;

    use super::*;

    #[test]
    fn batch_matches_individual_runs() {
        let cycle: Graph = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let path: Graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let pairs = [(&cycle, &cycle), (&cycle, &path), (&path, &path)];

        let batch = find_maximum_common_isomorphic_subgraphs_batch(&pairs);
        assert_eq!(batch.len(), pairs.len());
        for (result, &(g1, g2)) in batch.into_iter().zip(pairs.iter()) {
            assert_eq!(
                result.unwrap(),
                find_maximum_common_isomorphic_subgraphs(g1, g2).unwrap()
            );
        }
    }
}

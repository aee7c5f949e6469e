//! Vertex and edge compatibility for the subgraph search.

use csi_common::{EdgeId, VertexId};
use csi_graph::GraphView;

/// What the search should do after a callback returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CsiNextAction {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the whole search and return from `run` immediately.
    Abort,
}

impl CsiNextAction {
    /// True for [`CsiNextAction::Abort`].
    pub const fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Decides which vertex pairs may correspond to each other.
///
/// The default methods accept everything, which reduces the search to purely
/// structural isomorphism: only edge counts between paired vertices matter.
pub trait EquivalencePredicate<G: GraphView> {
    /// May vertex `v1` of `g1` be paired with vertex `v2` of `g2`?
    ///
    /// Called once per vertex pair when the search starts.
    fn mu(&self, g1: &G, v1: VertexId, g2: &G, v2: VertexId) -> bool {
        let _ = (g1, v1, g2, v2);
        true
    }

    /// Given the accepted pair `(i1, j1)`, may the pair `(i2, j2)` still be
    /// added?
    ///
    /// `edges1` holds the edges `i1 -> i2` followed by `i2 -> i1`, and
    /// `edges2` holds `j1 -> j2` followed by `j2 -> j1`. Both lists have the
    /// same length and each direction has the same count. When checking a
    /// vertex against itself (`i1 == i2`, `j1 == j2`), the lists hold the
    /// self-loops.
    #[allow(clippy::too_many_arguments)]
    fn nu(
        &self,
        g1: &G,
        i1: VertexId,
        i2: VertexId,
        edges1: &[EdgeId],
        g2: &G,
        j1: VertexId,
        j2: VertexId,
        edges2: &[EdgeId],
    ) -> bool {
        let _ = (g1, i1, i2, edges1, g2, j1, j2, edges2);
        true
    }

    /// Called on entry to every search level. Returning
    /// [`CsiNextAction::Abort`] cancels the search.
    fn progress(&mut self, level: usize) -> CsiNextAction {
        let _ = level;
        CsiNextAction::Continue
    }
}

/// Accepts every vertex and edge pairing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsiEquivalence;

impl<G: GraphView> EquivalencePredicate<G> for CsiEquivalence {}

/// Pairs vertices only when their payloads compare equal.
///
/// Edges are still compared by count alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexValueEquivalence;

impl<G> EquivalencePredicate<G> for VertexValueEquivalence
where
    G: GraphView,
    G::VertexValue: PartialEq,
{
    fn mu(&self, g1: &G, v1: VertexId, g2: &G, v2: VertexId) -> bool {
        g1.vertex_value(v1) == g2.vertex_value(v2)
    }
}

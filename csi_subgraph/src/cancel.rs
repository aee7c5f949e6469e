//! Cooperative cancellation and progress counters.
//!
//! The search has no timeout of its own. Wrapping a predicate in
//! [`Cancellable`] lets another thread stop a running search through a
//! [`CancelToken`], caps the number of search steps, and exposes counters
//! that can be read while the search runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use csi_common::{EdgeId, VertexId};
use csi_graph::GraphView;
use tracing::debug;

use crate::equivalence::{CsiEquivalence, CsiNextAction, EquivalencePredicate};

/// Shared flag that asks a search to stop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The search stops at its next level.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters updated by a running search.
#[derive(Debug, Default)]
pub struct SearchProgress {
    steps: AtomicU64,
    deepest_level: AtomicU64,
}

/// Point-in-time copy of [`SearchProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Search levels entered so far.
    pub steps: u64,
    /// Deepest level reached.
    pub deepest_level: u64,
}

impl SearchProgress {
    /// Counters starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: usize) -> u64 {
        self.deepest_level.fetch_max(level as u64, Ordering::Relaxed);
        self.steps.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Reads both counters.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            steps: self.steps.load(Ordering::Relaxed),
            deepest_level: self.deepest_level.load(Ordering::Relaxed),
        }
    }
}

/// Predicate wrapper that aborts the search on request or after a step budget.
///
/// `mu` and `nu` are forwarded to the wrapped predicate unchanged. Its
/// `progress` is only consulted while the search is allowed to continue.
#[derive(Debug)]
pub struct Cancellable<P = CsiEquivalence> {
    inner: P,
    token: CancelToken,
    progress: Arc<SearchProgress>,
    step_budget: Option<u64>,
}

impl<P> Cancellable<P> {
    /// Wraps `inner`, stopping when `token` is cancelled.
    pub fn new(inner: P, token: CancelToken) -> Self {
        Self {
            inner,
            token,
            progress: Arc::new(SearchProgress::new()),
            step_budget: None,
        }
    }

    /// Aborts once more than `steps` levels have been entered.
    #[must_use]
    pub fn with_step_budget(mut self, steps: u64) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// The token this wrapper watches.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Counters for this search, readable from other threads.
    pub fn counters(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    /// The wrapped predicate.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwraps the inner predicate.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<G: GraphView, P: EquivalencePredicate<G>> EquivalencePredicate<G> for Cancellable<P> {
    fn mu(&self, g1: &G, v1: VertexId, g2: &G, v2: VertexId) -> bool {
        self.inner.mu(g1, v1, g2, v2)
    }

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
        self.inner.nu(g1, i1, i2, edges1, g2, j1, j2, edges2)
    }

    fn progress(&mut self, level: usize) -> CsiNextAction {
        let steps = self.progress.record(level);
        if self.token.is_cancelled() {
            debug!("search cancelled at level {} after {} steps", level, steps);
            return CsiNextAction::Abort;
        }
        if self.step_budget.is_some_and(|budget| steps > budget) {
            debug!("search step budget exhausted after {} steps", steps - 1);
            return CsiNextAction::Abort;
        }
        self.inner.progress(level)
    }
}

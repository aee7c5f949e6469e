//! Solver state, configuration accessors and the `run` entry point.
//!
//! The search itself lives in [`crate::search`].

use csi_common::{CsiConfig, DenseIntegerSet, VertexId};
use csi_graph::GraphView;
use tracing::{debug, info};

use crate::arena::StackArena;
use crate::equivalence::{CsiEquivalence, CsiNextAction, EquivalencePredicate};
use crate::error::CsiResult;
use crate::processor::{ShowSolution, SolutionProcessor};
use crate::search::EdgeScratch;

/// Where a solver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Constructed or reset, not yet run.
    Init,
    /// A search is in progress, or a callback panicked out of one.
    Searching,
    /// The last search visited the whole search space.
    Exhausted,
    /// The last search was stopped by the processor or the progress hook.
    Aborted,
    /// The last search ran out of arena space.
    Failed,
}

/// Common subgraph isomorphism solver.
///
/// Finds pairs of equally sized vertex subsets of `g1` and `g2`, together with
/// a one-to-one pairing between them, such that for every two paired vertices
/// the number of edges between them is the same in both graphs, in both
/// directions. Self-loops and parallel edges count.
///
/// Each solution is handed to the processor `S` as soon as it is found. The
/// predicate `P` narrows which vertices may be paired. Both graphs are
/// borrowed for the solver's lifetime and cannot change underneath it.
///
/// A solver is deliberately not `Clone`: it owns a scratch arena and partial
/// search state that only make sense for one search at a time. Independent
/// solvers may run on different threads over the same graphs.
///
/// Configuration is read at the start of each [`run`](Self::run). Callbacks
/// get no handle to the solver, so nothing can retune it mid-search. The one
/// change a search makes on its own is monotonic mode raising its working
/// minimum; the configured minimum is left untouched, and every run or
/// [`reset`](Self::reset) starts again from it.
pub struct Solver<'g, G, S = ShowSolution, P = CsiEquivalence>
where
    G: GraphView,
{
    pub(crate) g1: &'g G,
    pub(crate) g2: &'g G,
    pub(crate) processor: S,
    pub(crate) predicate: P,
    pub(crate) config: CsiConfig,
    /// Minimum in force for the current search. Monotonic mode raises it.
    pub(crate) search_minimum: usize,
    /// Arena multiplier and limit the current arena was built with.
    arena_settings: (usize, Option<usize>),

    /// Vertices of `g1` still under consideration.
    pub(crate) v: DenseIntegerSet,
    /// Vertices of `g2` still under consideration.
    pub(crate) w: DenseIntegerSet,
    /// `v` minus the vertices already paired.
    pub(crate) vnotx: DenseIntegerSet,
    /// Paired vertices of `g1`, parallel to `y`.
    pub(crate) x: Vec<VertexId>,
    /// Paired vertices of `g2`, parallel to `x`.
    pub(crate) y: Vec<VertexId>,

    pub(crate) arena: StackArena<VertexId>,
    pub(crate) edges: EdgeScratch,
    pub(crate) state: SolverState,
    pub(crate) solutions_found: usize,
}

impl<'g, G: GraphView> Solver<'g, G> {
    /// Solver that prints every common subgraph to standard output.
    pub fn new(g1: &'g G, g2: &'g G) -> Self {
        Self::with_parts(g1, g2, ShowSolution::new(), CsiEquivalence)
    }
}

impl<'g, G: GraphView, S> Solver<'g, G, S> {
    /// Solver with a custom processor and the default predicate.
    pub fn with_processor(g1: &'g G, g2: &'g G, processor: S) -> Self {
        Self::with_parts(g1, g2, processor, CsiEquivalence)
    }
}

impl<'g, G, S, P> Solver<'g, G, S, P>
where
    G: GraphView,
{
    /// Solver with a custom processor and predicate.
    pub fn with_parts(g1: &'g G, g2: &'g G, processor: S, predicate: P) -> Self {
        let config = CsiConfig::default();
        let arena = StackArena::new(config.arena_capacity(g2.vertex_count()), config.arena_limit);
        Self {
            g1,
            g2,
            processor,
            predicate,
            v: DenseIntegerSet::new(g1.vertex_count()),
            w: DenseIntegerSet::new(g2.vertex_count()),
            vnotx: DenseIntegerSet::new(g1.vertex_count()),
            x: Vec::with_capacity(g1.vertex_count().min(g2.vertex_count())),
            y: Vec::with_capacity(g1.vertex_count().min(g2.vertex_count())),
            arena,
            edges: EdgeScratch::default(),
            search_minimum: config.minimum_solution_size,
            arena_settings: (config.arena_multiplier, config.arena_limit),
            config,
            state: SolverState::Init,
            solutions_found: 0,
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: CsiConfig) -> Self {
        self.config = config;
        self.search_minimum = self.config.minimum_solution_size;
        self.rebuild_arena();
        self
    }

    /// Current configuration.
    pub const fn config(&self) -> &CsiConfig {
        &self.config
    }

    /// Mutable configuration. Changes take effect at the next run or reset.
    pub const fn config_mut(&mut self) -> &mut CsiConfig {
        &mut self.config
    }

    /// Smallest solution that will be reported.
    pub const fn minimum_solution_size(&self) -> usize {
        self.config.minimum_solution_size
    }

    /// Sets the smallest reported solution size.
    pub const fn set_minimum_solution_size(&mut self, n: usize) {
        self.config.minimum_solution_size = n;
        self.search_minimum = n;
    }

    /// Largest solution that will be reported.
    pub const fn maximum_solution_size(&self) -> usize {
        self.config.maximum_solution_size
    }

    /// Sets the largest reported solution size.
    pub const fn set_maximum_solution_size(&mut self, n: usize) {
        self.config.maximum_solution_size = n;
    }

    /// Whether each reported solution raises the minimum size to its own.
    pub const fn monotonically_increasing(&self) -> bool {
        self.config.monotonically_increasing
    }

    /// Enables or disables monotonic mode.
    pub const fn set_monotonically_increasing(&mut self, b: bool) {
        self.config.monotonically_increasing = b;
    }

    /// `true` for common subgraphs, `false` when all of `g1` must embed in `g2`.
    pub const fn finding_common_subgraphs(&self) -> bool {
        self.config.finding_common_subgraphs
    }

    /// Selects common (`true`) or exact (`false`) mode.
    pub const fn set_finding_common_subgraphs(&mut self, b: bool) {
        self.config.finding_common_subgraphs = b;
    }

    /// The solution processor.
    pub const fn processor(&self) -> &S {
        &self.processor
    }

    /// Mutable access to the solution processor, e.g. to clear it between runs.
    pub const fn processor_mut(&mut self) -> &mut S {
        &mut self.processor
    }

    /// Consumes the solver and hands back its processor with whatever it
    /// accumulated.
    pub fn into_processor(self) -> S {
        self.processor
    }

    /// The equivalence predicate.
    pub const fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Mutable access to the equivalence predicate.
    pub const fn predicate_mut(&mut self) -> &mut P {
        &mut self.predicate
    }

    /// Where the solver is in its lifecycle.
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Solutions passed to the processor by the last run.
    pub const fn solutions_found(&self) -> usize {
        self.solutions_found
    }

    /// Most arena slots in use at once during the last run.
    pub const fn arena_high_water_mark(&self) -> usize {
        self.arena.high_water_mark()
    }

    /// The two graphs being compared, in `(g1, g2)` order.
    pub const fn graphs(&self) -> (&'g G, &'g G) {
        (self.g1, self.g2)
    }

    /// Discards all search state. `run` does this itself.
    ///
    /// Also recovers a solver left [`SolverState::Searching`] by a panicking
    /// callback.
    pub fn reset(&mut self) {
        if self.arena_settings != (self.config.arena_multiplier, self.config.arena_limit) {
            self.rebuild_arena();
        }
        self.search_minimum = self.config.minimum_solution_size;
        self.v.insert_all();
        self.w.insert_all();
        self.x.clear();
        self.y.clear();
        self.vnotx.insert_all();
        self.arena.clear();
        self.state = SolverState::Init;
        self.solutions_found = 0;
    }

    fn rebuild_arena(&mut self) {
        self.arena_settings = (self.config.arena_multiplier, self.config.arena_limit);
        self.arena = StackArena::new(
            self.config.arena_capacity(self.g2.vertex_count()),
            self.config.arena_limit,
        );
    }
}

impl<G, S, P> Solver<'_, G, S, P>
where
    G: GraphView,
    S: SolutionProcessor<G>,
    P: EquivalencePredicate<G>,
{
    /// Runs a complete search from scratch, reporting every solution to the
    /// processor.
    ///
    /// Returns normally whether the search was exhausted or aborted; see
    /// [`state`](Self::state) to tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns [`CsiError::ArenaExhausted`](crate::CsiError::ArenaExhausted)
    /// when the configuration caps the arena and the search needs more. The
    /// solver is then [`SolverState::Failed`] until the next run or reset.
    pub fn run(&mut self) -> CsiResult<()> {
        self.reset();
        info!(
            "CSI search started: |V1|={} |V2|={} mode={} size={}..={}",
            self.g1.vertex_count(),
            self.g2.vertex_count(),
            if self.config.finding_common_subgraphs {
                "common"
            } else {
                "exact"
            },
            self.config.minimum_solution_size,
            self.config.maximum_solution_size
        );
        self.state = SolverState::Searching;

        let outcome = match self.initialize_vam() {
            Ok(vam) => {
                let action = self.recurse(&vam, 0);
                vam.release(&mut self.arena);
                action
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(CsiNextAction::Continue) => self.state = SolverState::Exhausted,
            Ok(CsiNextAction::Abort) => self.state = SolverState::Aborted,
            Err(ref e) => {
                debug!("CSI search failed: {}", e);
                self.state = SolverState::Failed;
            }
        }
        info!(
            "CSI search finished: state={:?} solutions={} arena_high_water={}",
            self.state,
            self.solutions_found,
            self.arena.high_water_mark()
        );
        outcome.map(|_| ())
    }
}

//! Configuration for the common subgraph isomorphism search.
//!
//! This module exposes a small, stable surface for consumers to parameterize
//! how the solver behaves. The search properties can also be changed through
//! the solver itself, before or during a run.
//!
//! The main concepts are:
//! - solution size bounds: solutions smaller than the minimum are never
//!   reported, and branches that cannot reach it are pruned. Branches that
//!   reach the maximum stop growing.
//! - monotonic mode: each reported solution is at least as large as the
//!   previous one, which makes the search for maximum subgraphs cheaper.
//! - common vs. exact mode: common mode finds subgraphs of both graphs; exact
//!   mode requires all of the first graph to embed into the second.
//!
//! Quick examples
//!
//! Default search, every common subgraph with at least one vertex:
//! ```ignore
//! use csi_common::CsiConfig;
//! let cfg = CsiConfig::default();
//! ```
//!
//! Solutions of exactly three vertices:
//! ```ignore
//! use csi_common::CsiConfig;
//! let cfg = CsiConfig::builder()
//!     .minimum_solution_size(3)
//!     .maximum_solution_size(3)
//!     .build();
//! ```

/// Default multiple of the second graph's vertex count used to size the
/// solver's scratch arena.
pub const DEFAULT_ARENA_MULTIPLIER: usize = 2;

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsiConfig {
    /// Smallest solution reported to the solution processor.
    pub minimum_solution_size: usize,
    /// Largest solution reported; search paths stop growing at this size.
    pub maximum_solution_size: usize,
    /// Raise the minimum to the size of each reported solution.
    pub monotonically_increasing: bool,
    /// `true` finds common subgraphs, `false` requires the whole first graph
    /// to be isomorphic to a subgraph of the second.
    pub finding_common_subgraphs: bool,
    /// Initial arena capacity as a multiple of the second graph's vertex count.
    pub arena_multiplier: usize,
    /// Hard ceiling on arena slots. `None` lets the arena grow as needed.
    pub arena_limit: Option<usize>,
}

impl CsiConfig {
    /// Starts a builder seeded with the default configuration.
    pub fn builder() -> CsiConfigBuilder {
        CsiConfigBuilder::default()
    }

    /// Convenience: exact subgraph isomorphism, graph 1 must embed completely.
    pub fn exact() -> Self {
        Self::builder().finding_common_subgraphs(false).build()
    }

    /// Convenience: solutions of one fixed size.
    pub fn fixed_size(size: usize) -> Self {
        Self::builder()
            .minimum_solution_size(size)
            .maximum_solution_size(size)
            .build()
    }

    /// Whether the size bounds can never be met in common mode.
    ///
    /// Such a configuration is not an error; the search just reports nothing.
    pub const fn has_empty_size_range(&self) -> bool {
        self.finding_common_subgraphs && self.minimum_solution_size > self.maximum_solution_size
    }

    /// Initial arena capacity for a second graph with `n_vertices` vertices.
    pub const fn arena_capacity(&self, n_vertices: usize) -> usize {
        let wanted = self.arena_multiplier.saturating_mul(n_vertices);
        match self.arena_limit {
            Some(limit) if limit < wanted => limit,
            _ => wanted,
        }
    }
}

impl Default for CsiConfig {
    /// Every common subgraph of at least one vertex, arena sized at twice the
    /// second graph and allowed to grow.
    fn default() -> Self {
        Self {
            minimum_solution_size: 1,
            maximum_solution_size: usize::MAX,
            monotonically_increasing: false,
            finding_common_subgraphs: true,
            arena_multiplier: DEFAULT_ARENA_MULTIPLIER,
            arena_limit: None,
        }
    }
}

/// Builder for [`CsiConfig`].
#[derive(Clone, Debug, Default)]
pub struct CsiConfigBuilder {
    config: CsiConfig,
}

impl CsiConfigBuilder {
    /// Sets the smallest reported solution size.
    pub const fn minimum_solution_size(mut self, n: usize) -> Self {
        self.config.minimum_solution_size = n;
        self
    }

    /// Sets the largest reported solution size.
    pub const fn maximum_solution_size(mut self, n: usize) -> Self {
        self.config.maximum_solution_size = n;
        self
    }

    /// Enables or disables monotonic mode.
    pub const fn monotonically_increasing(mut self, b: bool) -> Self {
        self.config.monotonically_increasing = b;
        self
    }

    /// Selects common (`true`) or exact (`false`) mode.
    pub const fn finding_common_subgraphs(mut self, b: bool) -> Self {
        self.config.finding_common_subgraphs = b;
        self
    }

    /// Sets the arena capacity multiplier.
    pub const fn arena_multiplier(mut self, n: usize) -> Self {
        self.config.arena_multiplier = n;
        self
    }

    /// Caps the arena at `limit` slots.
    pub const fn arena_limit(mut self, limit: Option<usize>) -> Self {
        self.config.arena_limit = limit;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> CsiConfig {
        self.config
    }
}

use clap::Parser;
use csi_common::{CsiConfig, DEFAULT_ARENA_MULTIPLIER};

/// CSI - find common subgraph isomorphisms between two directed graphs
#[derive(Parser, Debug)]
#[command(name = "csi")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Edge list of the first graph
    pub graph1: String,

    /// Edge list of the second graph
    pub graph2: String,

    /// What to search for
    #[arg(short = 'm', long, value_enum, default_value = "all")]
    pub mode: ModeArg,

    /// Smallest solution to report; in `first` mode, the exact size wanted
    #[arg(long, default_value_t = 1)]
    pub min_size: usize,

    /// Largest solution to report
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Stop after this many solutions
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Initial scratch arena size as a multiple of the second graph's vertex count
    #[arg(long, default_value_t = DEFAULT_ARENA_MULTIPLIER)]
    pub arena_multiplier: usize,

    /// Fail instead of growing the scratch arena past this many slots
    #[arg(long)]
    pub arena_limit: Option<usize>,
}

impl Args {
    /// Convert command-line arguments into a search configuration
    pub fn to_config(&self) -> CsiConfig {
        let builder = CsiConfig::builder()
            .arena_multiplier(self.arena_multiplier)
            .arena_limit(self.arena_limit);

        match self.mode {
            ModeArg::All => builder
                .minimum_solution_size(self.min_size)
                .maximum_solution_size(self.max_size.unwrap_or(usize::MAX)),
            ModeArg::First => builder
                .minimum_solution_size(self.min_size)
                .maximum_solution_size(self.min_size),
            ModeArg::Exact => builder.finding_common_subgraphs(false),
            ModeArg::Maximum => builder
                .minimum_solution_size(self.min_size)
                .maximum_solution_size(self.max_size.unwrap_or(usize::MAX))
                .monotonically_increasing(true),
        }
        .build()
    }

    /// Solution cap, with `first` mode always stopping after one.
    pub fn effective_limit(&self) -> Option<usize> {
        match self.mode {
            ModeArg::First => Some(1),
            _ => self.limit,
        }
    }
}

/// Command-line argument wrapper for the search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Every common subgraph within the size bounds
    #[value(name = "all")]
    All,
    /// The first common subgraph of exactly `--min-size` vertices
    #[value(name = "first")]
    First,
    /// Every embedding of the whole first graph in the second
    #[value(name = "exact")]
    Exact,
    /// Only the largest common subgraphs
    #[value(name = "maximum")]
    Maximum,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("csi").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_every_common_subgraph() {
        let args = parse(&["a.txt", "b.txt"]);
        assert_eq!(args.mode, ModeArg::All);
        assert_eq!(args.to_config(), CsiConfig::default());
        assert_eq!(args.effective_limit(), None);
    }

    #[test]
    fn first_mode_pins_size_and_limit() {
        let args = parse(&["a.txt", "b.txt", "--mode", "first", "--min-size", "3"]);
        assert_eq!(args.to_config(), CsiConfig::fixed_size(3));
        assert_eq!(args.effective_limit(), Some(1));
    }

    #[test]
    fn exact_mode_ignores_size_bounds() {
        let args = parse(&["a.txt", "b.txt", "-m", "exact", "--max-size", "2"]);
        let config = args.to_config();
        assert!(!config.finding_common_subgraphs);
        assert_eq!(config.maximum_solution_size, usize::MAX);
    }

    #[test]
    fn maximum_mode_is_monotonic() {
        let args = parse(&["a.txt", "b.txt", "--mode", "maximum", "--arena-limit", "64"]);
        let config = args.to_config();
        assert!(config.monotonically_increasing);
        assert_eq!(config.arena_limit, Some(64));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Args::try_parse_from(["csi", "a", "b", "--mode", "fastest"]).is_err());
    }
}

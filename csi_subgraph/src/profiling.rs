//! Per-label call counts and wall time for the hot search steps.
//!
//! Built with the `profiling` feature, a [`Timer`] records into a global
//! table when dropped and [`report`] prints the table. Without the feature
//! everything here compiles to nothing.

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;
    use std::time::Instant;

    use dashmap::DashMap;

    type Count = u64;
    type TotalNanos = u128;

    static STATS: OnceLock<DashMap<&'static str, (Count, TotalNanos)>> = OnceLock::new();

    fn stats() -> &'static DashMap<&'static str, (Count, TotalNanos)> {
        STATS.get_or_init(DashMap::new)
    }

    /// Records the time between its creation and drop under `label`.
    pub struct Timer {
        label: &'static str,
        start: Instant,
    }

    impl Timer {
        #[inline]
        pub fn new(label: &'static str) -> Self {
            Self {
                label,
                start: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let nanos = self.start.elapsed().as_nanos();
            let mut entry = stats().entry(self.label).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += nanos;
        }
    }

    /// `(label, calls, total nanoseconds)` for every label, largest total first.
    pub fn snapshot() -> Vec<(&'static str, Count, TotalNanos)> {
        let mut rows: Vec<_> = stats()
            .iter()
            .map(|kv| (*kv.key(), kv.value().0, kv.value().1))
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        rows
    }

    /// Prints the table to standard output.
    pub fn report() {
        println!("==== csi_subgraph search profile ====");
        for (label, count, total_ns) in snapshot() {
            let avg_ns = if count == 0 {
                0.0
            } else {
                total_ns as f64 / count as f64
            };
            println!(
                "{:<30} calls={:<10} total={:>9.3} ms avg= {:>12.1} ns",
                label,
                count,
                total_ns as f64 / 1_000_000.0,
                avg_ns
            );
        }
        println!("=====================================");
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    #[derive(Clone, Copy)]
    pub struct Timer;

    impl Timer {
        #[inline]
        pub const fn new(_: &'static str) -> Self {
            Self
        }
    }

    /// Always empty without the `profiling` feature.
    pub fn snapshot() -> Vec<(&'static str, u64, u128)> {
        Vec::new()
    }

    /// Does nothing without the `profiling` feature.
    pub fn report() {}
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
pub use disabled::*;

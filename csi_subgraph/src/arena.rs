//! Stack-discipline scratch arena.
//!
//! Candidate maps are created and destroyed in strict LIFO order as the search
//! recurses and returns, so their storage can come from one growable buffer
//! per solver. Each map remembers a [`Checkpoint`] and the whole map is freed
//! with one [`StackArena::revert`], which is a truncate.
//!
//! Rows are addressed by index rather than by pointer, so growing the buffer
//! never invalidates rows that are still live.

use tracing::trace;

use crate::error::{CsiError, CsiResult};

/// Position in an arena to which it can later be reverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of slots in use when the checkpoint was taken.
    pub const fn position(self) -> usize {
        self.0
    }
}

/// Growable bump allocator with bulk release back to a checkpoint.
///
/// An arena belongs to exactly one solver and is never shared.
#[derive(Debug)]
pub struct StackArena<T> {
    items: Vec<T>,
    limit: Option<usize>,
    high_water_mark: usize,
}

impl<T: Copy> StackArena<T> {
    /// Creates an arena with `capacity` slots preallocated.
    ///
    /// With `limit` set, [`reserve`](Self::reserve) refuses to go past that
    /// many slots in use.
    pub fn new(capacity: usize, limit: Option<usize>) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            limit,
            high_water_mark: 0,
        }
    }

    /// Slots currently in use.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slots that can be in use before the buffer reallocates.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Largest number of slots ever in use at once.
    pub const fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Configured slot limit, if any.
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Captures the current top of the arena.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.items.len())
    }

    /// Makes sure `n` more slots can be pushed and returns the index the next
    /// push will use.
    ///
    /// # Errors
    ///
    /// Returns [`CsiError::ArenaExhausted`] when the arena has a limit and
    /// `n` more slots would exceed it.
    pub fn reserve(&mut self, n: usize) -> CsiResult<usize> {
        let in_use = self.items.len();
        if let Some(limit) = self.limit {
            if in_use.saturating_add(n) > limit {
                return Err(CsiError::ArenaExhausted {
                    requested: n,
                    in_use,
                    limit,
                });
            }
        }
        if self.items.capacity() - in_use < n {
            trace!("arena growing past {} slots", self.items.capacity());
            self.items.reserve(n);
        }
        Ok(in_use)
    }

    /// Allocates one slot holding `value` and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        let idx = self.items.len();
        self.items.push(value);
        self.high_water_mark = self.high_water_mark.max(self.items.len());
        idx
    }

    /// Frees everything allocated since `checkpoint`.
    ///
    /// # Panics
    ///
    /// Panics if the checkpoint lies above the current top, which means
    /// allocations were not released in LIFO order.
    pub fn revert(&mut self, checkpoint: Checkpoint) {
        assert!(
            checkpoint.0 <= self.items.len(),
            "arena reverted to {} but only {} slots are in use",
            checkpoint.0,
            self.items.len()
        );
        self.items.truncate(checkpoint.0);
    }

    /// The `len` slots starting at `start`.
    pub fn slice(&self, start: usize, len: usize) -> &[T] {
        &self.items[start..start + len]
    }

    /// The slot at `idx`.
    pub fn get(&self, idx: usize) -> T {
        self.items[idx]
    }

    /// Frees everything and forgets the high-water mark.
    pub fn clear(&mut self) {
        self.items.clear();
        self.high_water_mark = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_releases_everything_since_checkpoint() {
        let mut arena: StackArena<u32> = StackArena::new(4, None);
        arena.push(1);
        let cp = arena.checkpoint();
        arena.push(2);
        arena.push(3);
        assert_eq!(arena.len(), 3);
        arena.revert(cp);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(0), 1);
        assert_eq!(arena.high_water_mark(), 3);
    }

    #[test]
    fn nested_checkpoints_unwind_in_order() {
        let mut arena: StackArena<u32> = StackArena::new(0, None);
        let outer = arena.checkpoint();
        arena.push(10);
        let inner = arena.checkpoint();
        arena.push(20);
        arena.revert(inner);
        assert_eq!(arena.slice(0, 1), &[10]);
        arena.revert(outer);
        assert!(arena.is_empty());
    }

    #[test]
    fn reserve_grows_without_limit() {
        let mut arena: StackArena<u32> = StackArena::new(1, None);
        assert_eq!(arena.reserve(100), Ok(0));
        for i in 0..100 {
            arena.push(i);
        }
        assert_eq!(arena.slice(98, 2), &[98, 99]);
    }

    #[test]
    fn reserve_past_limit_is_an_error() {
        let mut arena: StackArena<u32> = StackArena::new(2, Some(3));
        arena.push(0);
        assert_eq!(arena.reserve(2), Ok(1));
        assert_eq!(
            arena.reserve(3),
            Err(CsiError::ArenaExhausted {
                requested: 3,
                in_use: 1,
                limit: 3
            })
        );
        // The failed reservation leaves existing allocations alone.
        assert_eq!(arena.slice(0, 1), &[0]);
    }

    #[test]
    #[should_panic(expected = "arena reverted")]
    fn revert_above_top_panics() {
        let mut arena: StackArena<u32> = StackArena::new(0, None);
        arena.push(1);
        let cp = arena.checkpoint();
        arena.revert(Checkpoint(0));
        arena.revert(cp);
    }
}

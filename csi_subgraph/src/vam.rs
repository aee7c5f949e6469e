//! Vertex availability map.
//!
//! For each still-available vertex of the first graph, a [`Vam`] lists the
//! vertices of the second graph it may still be paired with. Rows live in the
//! solver's [`StackArena`]; the map itself only keeps row offsets and the
//! checkpoint it was created at.
//!
//! Rows are filled one at a time: start a row, push its candidates, start the
//! next. Only the most recently started row accepts pushes, which keeps every
//! row contiguous in the arena.

use std::ops::Range;

use contracts::*;
use csi_common::VertexId;

use crate::arena::{Checkpoint, StackArena};
use crate::error::CsiResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Row {
    start: usize,
    len: usize,
    capacity: usize,
}

/// Candidate table for one level of the search.
#[derive(Debug)]
pub struct Vam {
    rows: Vec<Option<Row>>,
    checkpoint: Checkpoint,
    last_row_started: Option<VertexId>,
}

impl Vam {
    /// Creates an empty map whose storage begins at the arena's current top.
    pub fn new(arena: &StackArena<VertexId>) -> Self {
        Self {
            rows: Vec::new(),
            checkpoint: arena.checkpoint(),
            last_row_started: None,
        }
    }

    /// Arena position this map's rows start at.
    pub const fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    /// Makes room in the row table for source vertices `0..n`.
    pub fn reserve_rows(&mut self, n: usize) {
        if self.rows.len() < n {
            self.rows.resize(n, None);
        }
    }

    /// True if a row was started for `i`, even if it is empty.
    pub fn has_row(&self, i: VertexId) -> bool {
        matches!(self.rows.get(i.as_usize()), Some(Some(_)))
    }

    /// Starts the row for source vertex `i`, with room for at most `max`
    /// candidates.
    ///
    /// # Errors
    ///
    /// Returns [`CsiError::ArenaExhausted`](crate::CsiError::ArenaExhausted)
    /// if the arena cannot take `max` more slots.
    #[requires(!self.has_row(i), "row started twice")]
    #[debug_ensures(ret.is_err() || self.last_row_started == Some(i))]
    pub fn start_new_row(
        &mut self,
        arena: &mut StackArena<VertexId>,
        i: VertexId,
        max: usize,
    ) -> CsiResult<()> {
        let start = arena.reserve(max)?;
        self.reserve_rows(i.as_usize() + 1);
        self.rows[i.as_usize()] = Some(Row {
            start,
            len: 0,
            capacity: max,
        });
        self.last_row_started = Some(i);
        Ok(())
    }

    /// Appends candidate `j` to the row of `i`, which must be the row started last.
    #[requires(self.last_row_started == Some(i), "push to a row that is not the newest")]
    pub fn push(&mut self, arena: &mut StackArena<VertexId>, i: VertexId, j: VertexId) {
        let Some(row) = self.rows.get_mut(i.as_usize()).and_then(Option::as_mut) else {
            unreachable!("row {i} was started but has no entry");
        };
        debug_assert!(row.len < row.capacity, "row {i} is full");
        debug_assert_eq!(
            arena.len(),
            row.start + row.len,
            "row {i} is no longer at the top of the arena"
        );
        arena.push(j);
        row.len += 1;
    }

    /// Number of candidates for `i`. Zero if `i` has no row.
    pub fn size(&self, i: VertexId) -> usize {
        self.row(i).map_or(0, |r| r.len)
    }

    /// Arena indices holding the candidates for `i`.
    ///
    /// The range stays valid while the arena is used by deeper levels, which
    /// only ever allocate above this map.
    pub fn span(&self, i: VertexId) -> Range<usize> {
        self.row(i).map_or(0..0, |r| r.start..r.start + r.len)
    }

    /// Candidates for `i` in the order they were pushed.
    pub fn get<'a>(&self, arena: &'a StackArena<VertexId>, i: VertexId) -> &'a [VertexId] {
        match self.row(i) {
            Some(r) => arena.slice(r.start, r.len),
            None => &[],
        }
    }

    /// Frees this map's rows and everything allocated above them.
    pub fn release(self, arena: &mut StackArena<VertexId>) {
        arena.revert(self.checkpoint);
    }

    fn row(&self, i: VertexId) -> Option<Row> {
        self.rows.get(i.as_usize()).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: usize) -> VertexId {
        VertexId::from(id)
    }

    #[test]
    fn rows_are_filled_in_order() {
        let mut arena = StackArena::new(8, None);
        let mut vam = Vam::new(&arena);
        vam.reserve_rows(3);

        vam.start_new_row(&mut arena, v(2), 3).unwrap();
        vam.push(&mut arena, v(2), v(0));
        vam.push(&mut arena, v(2), v(4));
        vam.start_new_row(&mut arena, v(0), 3).unwrap();
        vam.push(&mut arena, v(0), v(1));

        assert_eq!(vam.get(&arena, v(2)), &[v(0), v(4)]);
        assert_eq!(vam.get(&arena, v(0)), &[v(1)]);
        assert_eq!(vam.size(v(2)), 2);
        assert_eq!(vam.span(v(0)), 2..3);
    }

    #[test]
    fn missing_rows_are_empty() {
        let mut arena = StackArena::new(4, None);
        let mut vam = Vam::new(&arena);
        vam.start_new_row(&mut arena, v(1), 0).unwrap();

        assert!(vam.has_row(v(1)));
        assert_eq!(vam.size(v(1)), 0);
        assert!(!vam.has_row(v(0)));
        assert_eq!(vam.size(v(9)), 0);
        assert!(vam.get(&arena, v(9)).is_empty());
        assert_eq!(vam.span(v(9)), 0..0);
    }

    #[test]
    fn release_returns_storage_to_parent_checkpoint() {
        let mut arena = StackArena::new(4, None);
        let mut parent = Vam::new(&arena);
        parent.start_new_row(&mut arena, v(0), 1).unwrap();
        parent.push(&mut arena, v(0), v(3));

        let mut child = Vam::new(&arena);
        child.start_new_row(&mut arena, v(1), 2).unwrap();
        child.push(&mut arena, v(1), v(2));
        assert_eq!(arena.len(), 2);

        child.release(&mut arena);
        assert_eq!(arena.len(), 1);
        assert_eq!(parent.get(&arena, v(0)), &[v(3)]);
    }

    #[test]
    fn start_row_past_arena_limit_fails() {
        let mut arena = StackArena::new(1, Some(1));
        let mut vam = Vam::new(&arena);
        assert!(vam.start_new_row(&mut arena, v(0), 2).is_err());
        assert!(!vam.has_row(v(0)));
    }

    #[test]
    #[should_panic(expected = "push to a row that is not the newest")]
    fn push_to_older_row_panics() {
        let mut arena = StackArena::new(4, None);
        let mut vam = Vam::new(&arena);
        vam.start_new_row(&mut arena, v(0), 1).unwrap();
        vam.start_new_row(&mut arena, v(1), 1).unwrap();
        vam.push(&mut arena, v(0), v(0));
    }

    #[test]
    #[should_panic(expected = "row started twice")]
    fn starting_row_twice_panics() {
        let mut arena = StackArena::new(4, None);
        let mut vam = Vam::new(&arena);
        vam.start_new_row(&mut arena, v(0), 1).unwrap();
        vam.start_new_row(&mut arena, v(0), 1).unwrap();
    }
}

//! Dense set of small integers with insertion-ordered iteration.
//!
//! Members are drawn from a fixed domain `0..domain`. Insert, erase and
//! membership tests are constant time. Iteration visits members in the order
//! they were inserted, so a member that is erased and inserted again moves to
//! the end. The search relies on this order when it breaks ties between
//! candidate vertices.

use contracts::*;

use crate::VertexId;

/// Sentinel link for "no neighbour".
const NIL: usize = usize::MAX;

/// Insertion-ordered set over the integer domain `0..domain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseIntegerSet {
    present: Vec<bool>,
    prev: Vec<usize>,
    next: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl DenseIntegerSet {
    /// Creates an empty set able to hold `0..domain`.
    pub fn new(domain: usize) -> Self {
        Self {
            present: vec![false; domain],
            prev: vec![NIL; domain],
            next: vec![NIL; domain],
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Size of the domain the set was created for.
    pub fn domain(&self) -> usize {
        self.present.len()
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if the set has no members.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Membership test. Values outside the domain are never members.
    pub fn contains(&self, value: usize) -> bool {
        self.present.get(value).copied().unwrap_or(false)
    }

    /// Inserts `value` at the end of the iteration order.
    ///
    /// Returns false if it was already a member.
    #[requires(value < self.domain(), "value outside the set's domain")]
    #[debug_ensures(self.contains(value))]
    pub fn insert(&mut self, value: usize) -> bool {
        if self.present[value] {
            return false;
        }
        self.present[value] = true;
        self.prev[value] = self.tail;
        self.next[value] = NIL;
        if self.tail == NIL {
            self.head = value;
        } else {
            self.next[self.tail] = value;
        }
        self.tail = value;
        self.len += 1;
        true
    }

    /// Removes `value`. Returns false if it was not a member.
    #[debug_ensures(!self.contains(value))]
    pub fn erase(&mut self, value: usize) -> bool {
        if !self.contains(value) {
            return false;
        }
        let (p, n) = (self.prev[value], self.next[value]);
        if p == NIL {
            self.head = n;
        } else {
            self.next[p] = n;
        }
        if n == NIL {
            self.tail = p;
        } else {
            self.prev[n] = p;
        }
        self.present[value] = false;
        self.prev[value] = NIL;
        self.next[value] = NIL;
        self.len -= 1;
        true
    }

    /// Empties the set without changing its domain.
    pub fn clear(&mut self) {
        while self.head != NIL {
            let v = self.head;
            self.erase(v);
        }
    }

    /// Makes every value of the domain a member, in ascending order.
    #[debug_ensures(self.len() == self.domain())]
    pub fn insert_all(&mut self) {
        self.clear();
        for value in 0..self.domain() {
            self.insert(value);
        }
    }

    /// One past the largest member, or zero when the set is empty.
    pub fn max_plus_one_or_zero(&self) -> usize {
        self.values().max().map_or(0, |m| m + 1)
    }

    /// Iterates over members in insertion order.
    pub fn values(&self) -> Values<'_> {
        Values {
            set: self,
            cursor: self.head,
        }
    }

    /// Iterates over members as vertex identifiers.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.values().map(VertexId::from)
    }
}

/// Iterator over the members of a [`DenseIntegerSet`].
#[derive(Clone, Debug)]
pub struct Values<'a> {
    set: &'a DenseIntegerSet,
    cursor: usize,
}

impl Iterator for Values<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == NIL {
            return None;
        }
        let value = self.cursor;
        self.cursor = self.set.next[value];
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_all_iterates_ascending() {
        let mut set = DenseIntegerSet::new(4);
        set.insert_all();
        assert_eq!(set.values().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn reinserted_member_moves_to_end() {
        let mut set = DenseIntegerSet::new(4);
        set.insert_all();
        assert!(set.erase(1));
        assert!(set.insert(1));
        assert_eq!(set.values().collect::<Vec<_>>(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn erase_head_and_tail() {
        let mut set = DenseIntegerSet::new(3);
        set.insert_all();
        set.erase(0);
        set.erase(2);
        assert_eq!(set.values().collect::<Vec<_>>(), vec![1]);
        set.erase(1);
        assert!(set.is_empty());
        assert_eq!(set.values().next(), None);
    }

    #[test]
    fn duplicate_insert_and_missing_erase_are_noops() {
        let mut set = DenseIntegerSet::new(2);
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(!set.erase(0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn max_plus_one_or_zero_tracks_largest_member() {
        let mut set = DenseIntegerSet::new(10);
        assert_eq!(set.max_plus_one_or_zero(), 0);
        set.insert(7);
        set.insert(3);
        assert_eq!(set.max_plus_one_or_zero(), 8);
    }

    #[test]
    fn contains_outside_domain_is_false() {
        let set = DenseIntegerSet::new(2);
        assert!(!set.contains(5));
    }
}

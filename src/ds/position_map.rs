//! Immutable value-to-first-position snapshot of a sequence.
//!
//! ## Build
//!
//! ```text
//!   sequence:  [5, 3, 5, 8]
//!   scan:       ◄──────────  last to first
//!
//!   i=3  8 → 3          {8:3}
//!   i=2  5 → 2          {8:3, 5:2}
//!   i=1  3 → 1          {8:3, 5:2, 3:1}
//!   i=0  5 → 0          {8:3, 5:0, 3:1}   earlier position overwrites
//! ```
//!
//! Scanning backwards means the last write for each value comes from its
//! lowest position, so a lookup yields first-occurrence semantics.
//!
//! A `PositionMap` is never updated after it is built. If the sequence it
//! was built from changes, the map keeps answering for the old contents.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Lowest index of every distinct value in a sequence.
///
/// # Example
///
/// ```
/// use indexkit::ds::PositionMap;
///
/// let map = PositionMap::build(&[5, 3, 5, 8]);
/// assert_eq!(map.position(&5), Some(0));
/// assert_eq!(map.position(&8), Some(3));
/// assert_eq!(map.position(&9), None);
/// assert_eq!(map.distinct_len(), 3);
/// ```
pub struct PositionMap<T> {
    positions: FxHashMap<T, usize>,
    source_len: usize,
}

impl<T> PositionMap<T>
where
    T: Eq + Hash + Clone,
{
    /// Builds the map with a single reverse scan over `items`.
    pub fn build(items: &[T]) -> Self {
        let mut positions =
            FxHashMap::with_capacity_and_hasher(items.len(), Default::default());
        for (idx, item) in items.iter().enumerate().rev() {
            positions.insert(item.clone(), idx);
        }
        positions.shrink_to_fit();
        Self {
            positions,
            source_len: items.len(),
        }
    }

    /// Returns the lowest index holding `value`.
    #[inline]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.positions.get(value).copied()
    }
}

impl<T> PositionMap<T> {
    /// Number of distinct values recorded.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.positions.len()
    }

    /// Length of the sequence at build time.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<T> fmt::Debug for PositionMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionMap")
            .field("distinct_len", &self.positions.len())
            .field("source_len", &self.source_len)
            .finish_non_exhaustive()
    }
}

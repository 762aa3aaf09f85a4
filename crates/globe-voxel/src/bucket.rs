//! Per-category dense instance storage with dirty tracking and epochs.
//!
//! A [`TypeBucket`] keeps every live voxel of one category packed into
//! `dense[0..count)` so the renderer can draw a prefix of the instance buffer
//! without gaps. Mutation is crate-private: only [`VoxelIndex`] may touch a
//! bucket, because every move inside `dense` must be mirrored in the index's
//! coordinate map.
//!
//! [`VoxelIndex`]: crate::VoxelIndex

use std::ops::Range;

use crate::coord::Coordinate;

/// Half-open range of slots whose instance data changed since the renderer
/// last took the dirty state.
///
/// The range may extend past the current count after removals; those slots
/// need no upload, but the count itself changed and the draw call must be
/// resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRange {
    /// First dirty slot.
    pub start: usize,
    /// One past the last dirty slot.
    pub end: usize,
}

impl DirtyRange {
    /// Range covering exactly `slot`.
    pub fn single(slot: usize) -> Self {
        Self {
            start: slot,
            end: slot + 1,
        }
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The part of the range that still holds live data for a bucket of
    /// `count` entries. Empty when only the count changed.
    pub fn clamped(self, count: usize) -> Range<usize> {
        self.start.min(count)..self.end.min(count)
    }
}

/// Dense storage for one category.
#[derive(Clone, Debug)]
pub struct TypeBucket {
    /// Live entries; `dense.len()` is the live count.
    dense: Vec<Coordinate>,
    /// Hard ceiling on `dense.len()`.
    capacity: usize,
    /// Incremented on every mutation; invalidates previously issued handles.
    epoch: u64,
    /// Slots changed since the last [`take_dirty`](Self::take_dirty).
    dirty: Option<DirtyRange>,
}

impl TypeBucket {
    /// Creates an empty bucket that will hold at most `capacity` entries.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            dense: Vec::new(),
            capacity,
            epoch: 0,
            dirty: None,
        }
    }

    /// Number of live entries.
    pub fn count(&self) -> usize {
        self.dense.len()
    }

    /// Capacity ceiling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once `count == capacity`.
    pub fn is_full(&self) -> bool {
        self.dense.len() >= self.capacity
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Live entries, `dense[0..count)`.
    pub fn entries(&self) -> &[Coordinate] {
        &self.dense
    }

    /// Coordinate stored in `slot`, if the slot is live.
    pub fn get(&self, slot: usize) -> Option<Coordinate> {
        self.dense.get(slot).copied()
    }

    /// Pending dirty range without clearing it.
    pub fn dirty(&self) -> Option<DirtyRange> {
        self.dirty
    }

    /// Returns and clears the pending dirty range.
    pub fn take_dirty(&mut self) -> Option<DirtyRange> {
        self.dirty.take()
    }

    /// Appends `coord` and returns its slot. The caller has already checked
    /// capacity.
    pub(crate) fn push(&mut self, coord: Coordinate) -> usize {
        debug_assert!(!self.is_full());
        let slot = self.dense.len();
        self.dense.push(coord);
        self.touch(slot);
        slot
    }

    /// Swap-removes `slot`: the last live entry is moved into `slot` and the
    /// count shrinks by one.
    ///
    /// Returns the coordinate that now occupies `slot`, or `None` when `slot`
    /// was the last entry and nothing moved.
    pub(crate) fn swap_remove(&mut self, slot: usize) -> Option<Coordinate> {
        self.dense.swap_remove(slot);
        self.touch(slot);
        self.dense.get(slot).copied()
    }

    fn touch(&mut self, slot: usize) {
        let range = DirtyRange::single(slot);
        self.dirty = Some(match self.dirty {
            Some(prev) => prev.union(range),
            None => range,
        });
        self.epoch += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32) -> Coordinate {
        Coordinate::new(x, 0, 0)
    }

    #[test]
    fn test_new_bucket_is_clean() {
        let bucket = TypeBucket::new(4);
        assert_eq!(bucket.count(), 0);
        assert_eq!(bucket.epoch(), 0);
        assert!(bucket.dirty().is_none());
        assert!(!bucket.is_full());
    }

    #[test]
    fn test_push_marks_appended_slot() {
        let mut bucket = TypeBucket::new(4);
        assert_eq!(bucket.push(c(0)), 0);
        assert_eq!(bucket.push(c(1)), 1);
        assert_eq!(bucket.dirty(), Some(DirtyRange { start: 0, end: 2 }));
        assert_eq!(bucket.epoch(), 2);
    }

    #[test]
    fn test_swap_remove_moves_last_into_hole() {
        let mut bucket = TypeBucket::new(4);
        bucket.push(c(0));
        bucket.push(c(1));
        bucket.push(c(2));
        bucket.take_dirty();

        assert_eq!(bucket.swap_remove(0), Some(c(2)));
        assert_eq!(bucket.entries(), &[c(2), c(1)]);
        assert_eq!(bucket.dirty(), Some(DirtyRange::single(0)));
    }

    #[test]
    fn test_swap_remove_last_moves_nothing() {
        let mut bucket = TypeBucket::new(4);
        bucket.push(c(0));
        bucket.push(c(1));
        assert_eq!(bucket.swap_remove(1), None);
        assert_eq!(bucket.entries(), &[c(0)]);
    }

    #[test]
    fn test_take_dirty_clears() {
        let mut bucket = TypeBucket::new(2);
        bucket.push(c(0));
        assert!(bucket.take_dirty().is_some());
        assert!(bucket.take_dirty().is_none());
    }

    #[test]
    fn test_dirty_range_clamped_after_shrink() {
        let range = DirtyRange { start: 1, end: 4 };
        assert_eq!(range.clamped(2), 1..2);
        assert!(range.clamped(1).is_empty());
    }
}

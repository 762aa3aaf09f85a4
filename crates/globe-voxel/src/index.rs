//! The voxel index: coordinate map plus one dense bucket per category.
//!
//! [`VoxelIndex`] is the single authority for which cells are occupied. It
//! provides O(1) insertion, lookup and removal using an
//! [`FxHashMap`](rustc_hash::FxHashMap) for the sparse coordinate map, while
//! keeping each category's instances densely packed for batched drawing.
//!
//! Removal is swap-with-last: the bucket's final entry fills the hole, and the
//! moved entry's recorded slot is patched in the coordinate map before the
//! removed coordinate is purged.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::bucket::{DirtyRange, TypeBucket};
use crate::category::{BucketCapacities, Category};
use crate::coord::Coordinate;
use crate::snapshot::BucketSnapshot;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where an occupied coordinate lives inside the buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotLocation {
    /// Bucket holding the entry.
    pub category: Category,
    /// Index into that bucket's dense array.
    pub slot: usize,
}

/// Externally held reference to one bucket slot.
///
/// Only valid while the bucket's epoch equals `epoch`; any later mutation of
/// the same bucket may have moved a different block into `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    /// Bucket the slot belongs to.
    pub category: Category,
    /// Dense index.
    pub slot: usize,
    /// Bucket epoch the handle was issued at.
    pub epoch: u64,
}

/// Rejected insertion. The index is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddError {
    /// The cell already holds a voxel of some category.
    #[error("cell is already occupied")]
    AlreadyOccupied,
    /// The category's bucket reached its capacity ceiling.
    #[error("bucket is full")]
    BucketFull,
}

/// Rejected removal. The index is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemoveError {
    /// Nothing occupies the coordinate.
    #[error("no voxel at coordinate")]
    NotFound,
    /// The slot handle is out of range or was issued before a later mutation
    /// of its bucket.
    #[error("stale or out-of-range slot handle")]
    InvalidSlot,
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Coordinate -> block map with per-category dense instance arrays.
#[derive(Clone, Debug)]
pub struct VoxelIndex {
    /// One bucket per category, addressed by [`Category::index`].
    buckets: [TypeBucket; Category::COUNT],
    /// Sparse occupancy map.
    locations: FxHashMap<Coordinate, SlotLocation>,
}

impl VoxelIndex {
    /// Creates an empty index with the given per-category ceilings.
    pub fn new(capacities: BucketCapacities) -> Self {
        Self {
            buckets: Category::ALL.map(|c| TypeBucket::new(capacities.get(c))),
            locations: FxHashMap::default(),
        }
    }

    /// Creates an empty index where every category shares one ceiling.
    pub fn with_uniform_capacity(capacity: usize) -> Self {
        Self::new(BucketCapacities::uniform(capacity))
    }

    /// Inserts a voxel of `category` at `coord`.
    ///
    /// # Errors
    ///
    /// [`AddError::AlreadyOccupied`] if any voxel is already at `coord`;
    /// [`AddError::BucketFull`] if `category` is at capacity. Both leave the
    /// index untouched.
    pub fn add(&mut self, coord: Coordinate, category: Category) -> Result<SlotHandle, AddError> {
        if self.locations.contains_key(&coord) {
            tracing::trace!(%coord, %category, "add rejected: occupied");
            return Err(AddError::AlreadyOccupied);
        }

        let bucket = &mut self.buckets[category.index()];
        if bucket.is_full() {
            tracing::debug!(%category, capacity = bucket.capacity(), "add rejected: bucket full");
            return Err(AddError::BucketFull);
        }

        let slot = bucket.push(coord);
        self.locations.insert(coord, SlotLocation { category, slot });

        Ok(SlotHandle {
            category,
            slot,
            epoch: bucket.epoch(),
        })
    }

    /// Removes whatever occupies `coord` and returns its category.
    ///
    /// # Errors
    ///
    /// [`RemoveError::NotFound`] if the cell is empty.
    pub fn remove(&mut self, coord: Coordinate) -> Result<Category, RemoveError> {
        let Some(&SlotLocation { category, slot }) = self.locations.get(&coord) else {
            tracing::debug!(%coord, "remove rejected: not found");
            return Err(RemoveError::NotFound);
        };

        let bucket = &mut self.buckets[category.index()];
        debug_assert_eq!(bucket.get(slot), Some(coord));

        if let Some(moved) = bucket.swap_remove(slot) {
            // The former last entry now lives at `slot`.
            if let Some(loc) = self.locations.get_mut(&moved) {
                loc.slot = slot;
            }
        }
        self.locations.remove(&coord);

        Ok(category)
    }

    /// Removes the block a renderer pick identified by slot.
    ///
    /// # Errors
    ///
    /// [`RemoveError::InvalidSlot`] if the handle's epoch no longer matches its
    /// bucket or the slot is not live.
    pub fn remove_by_slot(&mut self, handle: SlotHandle) -> Result<Coordinate, RemoveError> {
        let bucket = &self.buckets[handle.category.index()];
        let coord = match bucket.get(handle.slot) {
            Some(coord) if bucket.epoch() == handle.epoch => coord,
            _ => {
                tracing::warn!(
                    category = %handle.category,
                    slot = handle.slot,
                    handle_epoch = handle.epoch,
                    bucket_epoch = bucket.epoch(),
                    count = bucket.count(),
                    "rejected stale slot handle"
                );
                return Err(RemoveError::InvalidSlot);
            }
        };

        self.remove(coord)?;
        Ok(coord)
    }

    /// Issues a handle for `slot` against the current bucket state.
    pub fn handle_at(&self, category: Category, slot: usize) -> Option<SlotHandle> {
        self.bucket_snapshot(category).handle(slot)
    }

    /// Category occupying `coord`, if any.
    pub fn get(&self, coord: Coordinate) -> Option<Category> {
        self.locations.get(&coord).map(|loc| loc.category)
    }

    /// Returns `true` if `coord` is occupied.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.locations.contains_key(&coord)
    }

    /// Bucket position of the voxel at `coord`, if any.
    pub fn location(&self, coord: Coordinate) -> Option<SlotLocation> {
        self.locations.get(&coord).copied()
    }

    /// Read-only view of `dense[0..count)` for `category`.
    pub fn bucket_snapshot(&self, category: Category) -> BucketSnapshot<'_> {
        BucketSnapshot::new(category, &self.buckets[category.index()])
    }

    /// Returns and clears the pending dirty range for `category`.
    pub fn take_dirty(&mut self, category: Category) -> Option<DirtyRange> {
        self.buckets[category.index()].take_dirty()
    }

    /// Live entries in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.buckets[category.index()].count()
    }

    /// Capacity ceiling of `category`.
    pub fn capacity(&self, category: Category) -> usize {
        self.buckets[category.index()].capacity()
    }

    /// Total number of occupied cells.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterates over all occupied cells and their categories, in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Category)> + '_ {
        self.locations.iter().map(|(c, loc)| (*c, loc.category))
    }

    /// Verifies the packing invariants, describing the first violation found.
    ///
    /// O(n); meant for tests and debug tooling, not per-frame use.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut live = 0;
        for category in Category::ALL {
            let bucket = &self.buckets[category.index()];
            if bucket.count() > bucket.capacity() {
                return Err(format!(
                    "{category}: count {} exceeds capacity {}",
                    bucket.count(),
                    bucket.capacity()
                ));
            }
            for (slot, coord) in bucket.entries().iter().enumerate() {
                let expected = SlotLocation { category, slot };
                match self.locations.get(coord) {
                    Some(loc) if *loc == expected => {}
                    other => {
                        return Err(format!(
                            "{category}[{slot}] = {coord} but map says {other:?}"
                        ));
                    }
                }
            }
            live += bucket.count();
        }
        if live != self.locations.len() {
            return Err(format!(
                "buckets hold {live} entries but map holds {}",
                self.locations.len()
            ));
        }
        Ok(())
    }
}

impl Default for VoxelIndex {
    fn default() -> Self {
        Self::new(BucketCapacities::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

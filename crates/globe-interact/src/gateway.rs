//! The seam through which pick/place events reach the voxel index.

use globe_voxel::{
    AddError, Category, Coordinate, DirtyRange, RemoveError, SlotHandle, VoxelChangedEvent,
    VoxelEventBuffer, VoxelIndex,
};

/// What a mining action points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MineTarget {
    /// A known cell.
    Coord(Coordinate),
    /// A renderer pick result; checked against the bucket epoch.
    Slot(SlotHandle),
}

impl From<Coordinate> for MineTarget {
    fn from(coord: Coordinate) -> Self {
        MineTarget::Coord(coord)
    }
}

impl From<SlotHandle> for MineTarget {
    fn from(handle: SlotHandle) -> Self {
        MineTarget::Slot(handle)
    }
}

/// Owns the world's [`VoxelIndex`] and records every accepted change.
#[derive(Debug, Default)]
pub struct Gateway {
    index: VoxelIndex,
    events: VoxelEventBuffer,
}

impl Gateway {
    /// Wraps an already populated index.
    pub fn new(index: VoxelIndex) -> Self {
        Self {
            index,
            events: VoxelEventBuffer::new(),
        }
    }

    /// Places a block of `category` at `coord`.
    pub fn place(&mut self, coord: Coordinate, category: Category) -> Result<SlotHandle, AddError> {
        match self.index.add(coord, category) {
            Ok(handle) => {
                self.events.send(VoxelChangedEvent::placed(coord, category));
                Ok(handle)
            }
            Err(AddError::BucketFull) => {
                tracing::warn!(%category, %coord, "max instances reached");
                Err(AddError::BucketFull)
            }
            Err(e) => {
                tracing::debug!(%category, %coord, "place rejected: {e}");
                Err(e)
            }
        }
    }

    /// Removes the targeted block and returns its category.
    pub fn mine(&mut self, target: impl Into<MineTarget>) -> Result<Category, RemoveError> {
        let (coord, category) = match target.into() {
            MineTarget::Coord(coord) => (coord, self.index.remove(coord)?),
            MineTarget::Slot(handle) => (self.index.remove_by_slot(handle)?, handle.category),
        };
        self.events.send(VoxelChangedEvent::removed(coord, category));
        Ok(category)
    }

    /// Category at `coord`, if occupied.
    pub fn peek(&self, coord: Coordinate) -> Option<Category> {
        self.index.get(coord)
    }

    /// Read access for rendering and picking.
    pub fn index(&self) -> &VoxelIndex {
        &self.index
    }

    /// Returns and clears the pending dirty range of one bucket.
    pub fn take_dirty(&mut self, category: Category) -> Option<DirtyRange> {
        self.index.take_dirty(category)
    }

    /// Changes recorded during this and the previous frame.
    pub fn events(&self) -> &VoxelEventBuffer {
        &self.events
    }

    /// Advances the event buffer by one frame.
    pub fn end_frame(&mut self) {
        self.events.swap();
    }

    /// Releases the index.
    pub fn into_index(self) -> VoxelIndex {
        self.index
    }
}

//! Read-only bucket views for the render pass.

use bytemuck::{Pod, Zeroable};

use crate::bucket::{DirtyRange, TypeBucket};
use crate::category::Category;
use crate::coord::Coordinate;
use crate::index::SlotHandle;

/// Per-instance data uploaded for one unit cube.
///
/// Translation only; `w` is always 1 so the shader can treat it as a point.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    /// `[x, y, z, 1.0]` cell centre.
    pub translation: [f32; 4],
}

impl From<Coordinate> for InstanceTransform {
    fn from(coord: Coordinate) -> Self {
        let [x, y, z] = coord.translation();
        Self {
            translation: [x, y, z, 1.0],
        }
    }
}

/// Borrowed view of one bucket's live prefix.
///
/// Holding a snapshot borrows the [`VoxelIndex`](crate::VoxelIndex)
/// immutably, so no mutation can swap entries underneath a reader.
#[derive(Clone, Copy, Debug)]
pub struct BucketSnapshot<'a> {
    category: Category,
    bucket: &'a TypeBucket,
}

impl<'a> BucketSnapshot<'a> {
    pub(crate) fn new(category: Category, bucket: &'a TypeBucket) -> Self {
        Self { category, bucket }
    }

    /// Category this bucket stores.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Live entries, `dense[0..count)`.
    pub fn entries(&self) -> &'a [Coordinate] {
        self.bucket.entries()
    }

    /// Number of instances to draw.
    pub fn count(&self) -> usize {
        self.bucket.count()
    }

    /// Capacity ceiling of the bucket.
    pub fn capacity(&self) -> usize {
        self.bucket.capacity()
    }

    /// Epoch the snapshot was taken at.
    pub fn epoch(&self) -> u64 {
        self.bucket.epoch()
    }

    /// Pending dirty range, if any.
    pub fn dirty(&self) -> Option<DirtyRange> {
        self.bucket.dirty()
    }

    /// Handle for a picked instance, valid until the next mutation of this
    /// bucket.
    pub fn handle(&self, slot: usize) -> Option<SlotHandle> {
        (slot < self.count()).then_some(SlotHandle {
            category: self.category,
            slot,
            epoch: self.epoch(),
        })
    }

    /// Instance transforms for the live prefix, ready for
    /// [`bytemuck::cast_slice`].
    pub fn instance_transforms(&self) -> Vec<InstanceTransform> {
        self.entries()
            .iter()
            .copied()
            .map(InstanceTransform::from)
            .collect()
    }
}

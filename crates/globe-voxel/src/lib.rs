//! Voxel storage for a spherical world: a coordinate index backed by dense,
//! per-category instance buckets ready for batched drawing.

pub mod bucket;
pub mod category;
pub mod coord;
pub mod events;
pub mod index;
pub mod snapshot;

pub use bucket::{DirtyRange, TypeBucket};
pub use category::{BucketCapacities, Category, CategoryParseError, MAX_INSTANCES};
pub use coord::Coordinate;
pub use events::{VoxelChangedEvent, VoxelEventBuffer};
pub use index::{AddError, RemoveError, SlotHandle, SlotLocation, VoxelIndex};
pub use snapshot::{BucketSnapshot, InstanceTransform};

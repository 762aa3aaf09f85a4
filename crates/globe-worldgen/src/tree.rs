//! Tree stamping: a short trunk along the surface normal topped by a leaf cube.

use glam::DVec3;
use globe_voxel::{AddError, Category, Coordinate, VoxelIndex};

/// Trunk length in cells.
pub const TRUNK_HEIGHT: i32 = 3;

/// What a single [`stamp_tree`] call managed to place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStamp {
    /// Wood voxels placed.
    pub wood: u32,
    /// Leaf voxels placed.
    pub leaves: u32,
    /// Attempts rejected because the category bucket was full.
    pub rejected_full: u32,
}

/// Cell containing `v`, rounding half-up per component.
pub fn round_to_cell(v: DVec3) -> Coordinate {
    Coordinate::round_from(v.x, v.y, v.z)
}

/// Grows a tree from the grass cell at `ground`.
///
/// The trunk follows the outward normal for [`TRUNK_HEIGHT`] steps; every
/// free step becomes wood and the new trunk top. The 26 cells around the final
/// top receive leaves where free. Occupied cells are never overwritten.
pub fn stamp_tree(index: &mut VoxelIndex, ground: Coordinate) -> TreeStamp {
    let mut stamp = TreeStamp::default();
    let base = DVec3::new(
        f64::from(ground.x),
        f64::from(ground.y),
        f64::from(ground.z),
    );
    let normal = base.normalize_or_zero();
    let mut top = ground;

    for step in 1..=TRUNK_HEIGHT {
        let cell = round_to_cell(base + normal * f64::from(step));
        if index.contains(cell) {
            continue;
        }
        match index.add(cell, Category::Wood) {
            Ok(_) => stamp.wood += 1,
            Err(AddError::BucketFull) => stamp.rejected_full += 1,
            Err(AddError::AlreadyOccupied) => {}
        }
        top = cell;
    }

    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                match index.add(top.offset(dx, dy, dz), Category::Leaf) {
                    Ok(_) => stamp.leaves += 1,
                    Err(AddError::BucketFull) => stamp.rejected_full += 1,
                    Err(AddError::AlreadyOccupied) => {}
                }
            }
        }
    }

    stamp
}

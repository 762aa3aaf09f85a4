//! Resolving a pick hit into a place or mine action.

use glam::DVec3;
use globe_voxel::{AddError, Category, Coordinate, RemoveError, SlotHandle};
use thiserror::Error;

use crate::gateway::Gateway;
use crate::inventory::{Inventory, Item};

/// A renderer ray hit on a block instance, in world-group local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// Instance that was hit, as issued by the bucket snapshot.
    pub handle: SlotHandle,
    /// Intersection point.
    pub point: DVec3,
    /// Outward normal of the face that was hit.
    pub normal: DVec3,
}

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A block from the inventory was placed.
    Placed {
        /// Where it went.
        coord: Coordinate,
        /// What it was.
        category: Category,
    },
    /// A block was mined into the inventory.
    Mined {
        /// What it was.
        category: Category,
    },
    /// Nothing to do (secondary click without a placeable block).
    Ignored,
}

/// A click was rejected by the voxel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Placement failed.
    #[error("cannot place block: {0}")]
    Place(#[from] AddError),
    /// Mining failed.
    #[error("cannot mine block: {0}")]
    Mine(#[from] RemoveError),
}

/// Cell in front of the hit face: `round(point + normal * 0.5)`.
pub fn placement_cell(point: DVec3, normal: DVec3) -> Coordinate {
    let p = point + normal * 0.5;
    Coordinate::round_from(p.x, p.y, p.z)
}

/// Primary click: place the selected block if one is held, otherwise mine
/// the hit block into the inventory.
///
/// A block is only taken from the inventory once it has actually been placed.
pub fn primary(
    gateway: &mut Gateway,
    inventory: &mut Inventory,
    hit: &PickHit,
) -> Result<ActionOutcome, ActionError> {
    match inventory.placeable() {
        Some(category) => place_selected(gateway, inventory, hit, category),
        None => {
            let category = gateway.mine(hit.handle)?;
            inventory.add(Item::Block(category), 1);
            Ok(ActionOutcome::Mined { category })
        }
    }
}

/// Secondary click: place only, never mine.
pub fn secondary(
    gateway: &mut Gateway,
    inventory: &mut Inventory,
    hit: &PickHit,
) -> Result<ActionOutcome, ActionError> {
    match inventory.placeable() {
        Some(category) => place_selected(gateway, inventory, hit, category),
        None => Ok(ActionOutcome::Ignored),
    }
}

fn place_selected(
    gateway: &mut Gateway,
    inventory: &mut Inventory,
    hit: &PickHit,
    category: Category,
) -> Result<ActionOutcome, ActionError> {
    let coord = placement_cell(hit.point, hit.normal);
    gateway.place(coord, category)?;
    inventory.remove(Item::Block(category), 1);
    Ok(ActionOutcome::Placed { coord, category })
}

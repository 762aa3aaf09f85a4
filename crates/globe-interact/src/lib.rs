//! Player-facing interaction with the voxel world.
//!
//! [`Gateway`] is the only path by which picks and clicks mutate the world.
//! [`Inventory`] and the [`actions`] helpers turn raw pick hits into place or
//! mine calls the way a first-person client does.

pub mod actions;
pub mod gateway;
pub mod inventory;

pub use actions::{ActionError, ActionOutcome, PickHit, placement_cell, primary, secondary};
pub use gateway::{Gateway, MineTarget};
pub use inventory::{CraftError, Inventory, Item, PICKAXE_STONE, PICKAXE_WOOD};

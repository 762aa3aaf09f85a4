//! Scripted play session: dig a shaft at the north pole, collect wood,
//! craft a pickaxe and fill the shaft back in.

use glam::DVec3;
use globe_interact::{
    ActionError, ActionOutcome, Gateway, Inventory, Item, PICKAXE_WOOD, PickHit, primary,
    secondary,
};
use globe_voxel::{Category, Coordinate, VoxelIndex};
use tracing::{info, warn};

/// Cells dug below the pole block.
const SHAFT_DEPTH: i32 = 4;

/// Plays the session and hands back the world it was played in.
pub fn run(index: VoxelIndex) -> Gateway {
    let Some(radius) = pole_height(&index) else {
        warn!("world has no block on the +Y axis, skipping session");
        return Gateway::new(index);
    };
    let mut gateway = Gateway::new(index);
    let mut inventory = Inventory::new();
    let pole = Coordinate::new(0, radius, 0);

    // Click the pole's top face with an empty hand.
    if let Some(hit) = pick_top_face(&gateway, pole) {
        log_outcome(primary(&mut gateway, &mut inventory, &hit));
    }

    // Dig straight down.
    for depth in 1..=SHAFT_DEPTH {
        let coord = pole.offset(0, -depth, 0);
        match gateway.mine(coord) {
            Ok(category) => {
                inventory.add(Item::Block(category), 1);
                info!(%coord, %category, "dug");
            }
            Err(e) => warn!(%coord, "dig failed: {e}"),
        }
    }

    collect_wood(&mut gateway, &mut inventory);
    match inventory.craft_pickaxe() {
        Ok(()) => inventory.select(Item::Pickaxe),
        Err(e) => info!("no pickaxe this time: {e}"),
    }
    end_frame(&mut gateway);

    // Refill the shaft from the bottom, clicking the top face of the floor.
    for category in [Category::Stone, Category::Dirt, Category::Grass] {
        inventory.select(Item::Block(category));
        while inventory.placeable().is_some() {
            let Some(floor) = shaft_floor(&gateway, pole) else {
                break;
            };
            let Some(hit) = pick_top_face(&gateway, floor) else {
                break;
            };
            let outcome = secondary(&mut gateway, &mut inventory, &hit);
            let placed = matches!(outcome, Ok(ActionOutcome::Placed { .. }));
            log_outcome(outcome);
            if !placed {
                break;
            }
        }
    }
    end_frame(&mut gateway);

    for (item, count) in inventory.iter().filter(|&(_, n)| n > 0) {
        info!("holding {count} {item}");
    }

    match gateway.index().check_invariants() {
        Ok(()) => info!(total = gateway.index().len(), "session finished"),
        Err(e) => warn!("index inconsistent after session: {e}"),
    }
    gateway
}

/// Highest occupied cell on the +Y axis.
fn pole_height(index: &VoxelIndex) -> Option<i32> {
    index
        .iter()
        .filter(|(c, _)| c.x == 0 && c.z == 0 && c.y >= 0)
        .map(|(c, _)| c.y)
        .max()
}

/// Lowest empty cell of the shaft, minus one: the block a refill click hits.
fn shaft_floor(gateway: &Gateway, pole: Coordinate) -> Option<Coordinate> {
    (0..=SHAFT_DEPTH)
        .rev()
        .map(|depth| pole.offset(0, -depth, 0))
        .find(|&c| gateway.peek(c).is_none())
        .map(|c| c.offset(0, -1, 0))
        .filter(|&c| gateway.peek(c).is_some())
}

/// Simulated ray hit on the +Y face of the block at `coord`.
fn pick_top_face(gateway: &Gateway, coord: Coordinate) -> Option<PickHit> {
    let location = gateway.index().location(coord)?;
    let handle = gateway
        .index()
        .handle_at(location.category, location.slot)?;
    Some(PickHit {
        handle,
        point: DVec3::new(f64::from(coord.x), f64::from(coord.y) + 0.5, f64::from(coord.z)),
        normal: DVec3::Y,
    })
}

/// Mines wood from the front of the wood bucket until a pickaxe is affordable.
fn collect_wood(gateway: &mut Gateway, inventory: &mut Inventory) {
    let wood = Item::Block(Category::Wood);
    while inventory.count(wood) < PICKAXE_WOOD {
        let Some(handle) = gateway.index().handle_at(Category::Wood, 0) else {
            info!("no wood left to collect");
            return;
        };
        match gateway.mine(handle) {
            Ok(category) => inventory.add(Item::Block(category), 1),
            Err(e) => {
                warn!("wood pick rejected: {e}");
                return;
            }
        }
    }
}

fn end_frame(gateway: &mut Gateway) {
    info!(changes = gateway.events().len(), "frame");
    for category in Category::ALL {
        if let Some(range) = gateway.take_dirty(category) {
            info!(%category, start = range.start, end = range.end, "upload slots");
        }
    }
    gateway.end_frame();
}

fn log_outcome(outcome: Result<ActionOutcome, ActionError>) {
    match outcome {
        Ok(ActionOutcome::Placed { coord, category }) => info!(%coord, %category, "placed"),
        Ok(ActionOutcome::Mined { category }) => info!(%category, "mined"),
        Ok(ActionOutcome::Ignored) => {}
        Err(e) => warn!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_worldgen::{GeneratorSettings, WorldGenerator};

    fn bare_world(radius: i32) -> VoxelIndex {
        let settings = GeneratorSettings {
            tree_probability: 0.0,
            ..GeneratorSettings::with_radius(radius)
        };
        WorldGenerator::from_seed(settings, 3)
            .build(Default::default())
            .0
    }

    #[test]
    fn test_pole_height() {
        assert_eq!(pole_height(&bare_world(9)), Some(9));
        assert_eq!(pole_height(&VoxelIndex::default()), None);
    }

    #[test]
    fn test_shaft_floor_tracks_digging() {
        let mut gw = Gateway::new(bare_world(9));
        let pole = Coordinate::new(0, 9, 0);
        assert_eq!(shaft_floor(&gw, pole), None);

        gw.mine(pole).unwrap();
        gw.mine(pole.offset(0, -1, 0)).unwrap();
        assert_eq!(shaft_floor(&gw, pole), Some(Coordinate::new(0, 7, 0)));
    }

    #[test]
    fn test_pick_top_face_targets_block() {
        let gw = Gateway::new(bare_world(4));
        let hit = pick_top_face(&gw, Coordinate::new(0, 4, 0)).unwrap();
        assert_eq!(hit.handle.category, Category::Grass);
        assert_eq!(hit.point, DVec3::new(0.0, 4.5, 0.0));
        assert!(pick_top_face(&gw, Coordinate::new(0, 5, 0)).is_none());
    }

    #[test]
    fn test_session_restores_shaft() {
        let index = bare_world(8);
        let before = index.len();

        let gw = run(index);

        // No trees, so nothing is crafted and every dug block goes back.
        assert_eq!(gw.index().len(), before);
        assert_eq!(gw.peek(Coordinate::new(0, 8, 0)), Some(Category::Grass));
        assert_eq!(gw.peek(Coordinate::new(0, 7, 0)), Some(Category::Dirt));
        assert_eq!(gw.peek(Coordinate::new(0, 6, 0)), Some(Category::Dirt));
        assert_eq!(gw.peek(Coordinate::new(0, 5, 0)), Some(Category::Stone));
        assert_eq!(gw.peek(Coordinate::new(0, 4, 0)), Some(Category::Stone));
        assert!(gw.index().check_invariants().is_ok());
    }

    #[test]
    fn test_session_on_empty_world() {
        let gw = run(VoxelIndex::default());
        assert!(gw.index().is_empty());
    }
}

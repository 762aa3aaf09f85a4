//! Mining and placing against a generated world.

use globe_interact::{Gateway, Inventory, Item, MineTarget};
use globe_voxel::{BucketCapacities, Category, Coordinate, RemoveError};
use globe_worldgen::{GeneratorSettings, WorldGenerator};

fn world(tree_probability: f64) -> Gateway {
    let settings = GeneratorSettings {
        tree_probability,
        ..GeneratorSettings::with_radius(16)
    };
    let (index, _) = WorldGenerator::from_seed(settings, 2024).build(BucketCapacities::default());
    Gateway::new(index)
}

#[test]
fn mine_stone_then_place_wood() {
    let mut gw = world(0.0);
    let target = Coordinate::new(0, 0, 3);
    assert_eq!(gw.peek(target), Some(Category::Stone));

    assert_eq!(gw.mine(target), Ok(Category::Stone));
    assert_eq!(gw.peek(target), None);

    gw.place(target, Category::Wood).unwrap();
    assert_eq!(gw.peek(target), Some(Category::Wood));
    gw.index().check_invariants().unwrap();
}

#[test]
fn mine_by_picked_slot() {
    let mut gw = world(0.05);
    let target = Coordinate::new(0, 0, 3);
    let slot = gw.index().location(target).unwrap().slot;
    let handle = gw.index().handle_at(Category::Stone, slot).unwrap();
    let stone_before = gw.index().count(Category::Stone);

    assert_eq!(gw.mine(MineTarget::Slot(handle)), Ok(Category::Stone));
    assert_eq!(gw.peek(target), None);
    assert_eq!(gw.index().count(Category::Stone), stone_before - 1);

    // The handle died with the mutation it caused.
    assert_eq!(gw.mine(handle), Err(RemoveError::InvalidSlot));
    gw.index().check_invariants().unwrap();
}

#[test]
fn dig_a_shaft_and_refill_it() {
    let mut gw = world(0.0);
    let mut inventory = Inventory::new();

    for z in 0..=16 {
        let cell = Coordinate::new(0, 0, z);
        if let Ok(category) = gw.mine(cell) {
            inventory.add(Item::Block(category), 1);
        }
    }
    assert_eq!(inventory.count(Item::Block(Category::Grass)), 1);
    assert_eq!(inventory.count(Item::Block(Category::Dirt)), 2);
    assert_eq!(inventory.count(Item::Block(Category::Stone)), 14);
    gw.index().check_invariants().unwrap();

    for z in 0..=13 {
        gw.place(Coordinate::new(0, 0, z), Category::Stone).unwrap();
        assert!(inventory.remove(Item::Block(Category::Stone), 1));
    }
    assert_eq!(inventory.count(Item::Block(Category::Stone)), 0);
    gw.index().check_invariants().unwrap();
}

#[test]
fn snapshot_matches_index_after_churn() {
    let mut gw = world(0.0);
    for x in -3..=3 {
        gw.mine(Coordinate::new(x, 0, 0)).unwrap();
    }
    for x in -3..=3 {
        gw.place(Coordinate::new(x, 0, 0), Category::Leaf).unwrap();
    }

    let stone = gw.index().bucket_snapshot(Category::Stone);
    assert_eq!(stone.count(), 9171 - 7);
    for coord in stone.entries() {
        assert_eq!(gw.peek(*coord), Some(Category::Stone));
    }
    assert_eq!(gw.index().bucket_snapshot(Category::Leaf).count(), 7);
}

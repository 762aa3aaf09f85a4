//! Player inventory: block counts, the pickaxe tool, and crafting.
//!
//! Tools are inventory items only. They never occupy a voxel bucket, so they
//! live in [`Item`] rather than in [`Category`].

use std::fmt;

use globe_voxel::Category;
use thiserror::Error;

/// Wood consumed by one pickaxe.
pub const PICKAXE_WOOD: u32 = 3;
/// Stone consumed by one pickaxe.
pub const PICKAXE_STONE: u32 = 2;

/// Something the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// A placeable block.
    Block(Category),
    /// Mining tool; never placeable.
    Pickaxe,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Block(category) => f.write_str(category.name()),
            Item::Pickaxe => f.write_str("pickaxe"),
        }
    }
}

/// Crafting failed; nothing was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CraftError {
    /// The recipe's inputs are not all in stock.
    #[error("not enough resources: need {wood} wood and {stone} stone")]
    MissingIngredients {
        /// Wood required.
        wood: u32,
        /// Stone required.
        stone: u32,
    },
}

/// Item counts plus the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    blocks: [u32; Category::COUNT],
    pickaxes: u32,
    selected: Item,
}

impl Inventory {
    /// Empty inventory with stone selected.
    pub fn new() -> Self {
        Self {
            blocks: [0; Category::COUNT],
            pickaxes: 0,
            selected: Item::Block(Category::Stone),
        }
    }

    /// Number of `item` held.
    pub fn count(&self, item: Item) -> u32 {
        match item {
            Item::Block(category) => self.blocks[category.index()],
            Item::Pickaxe => self.pickaxes,
        }
    }

    /// Adds `amount` of `item`.
    pub fn add(&mut self, item: Item, amount: u32) {
        let slot = self.slot_mut(item);
        *slot = slot.saturating_add(amount);
    }

    /// Takes `amount` of `item`. Returns `false` and changes nothing if fewer
    /// are held.
    pub fn remove(&mut self, item: Item, amount: u32) -> bool {
        let slot = self.slot_mut(item);
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    /// Currently selected item.
    pub fn selected(&self) -> Item {
        self.selected
    }

    /// Selects `item`, held or not.
    pub fn select(&mut self, item: Item) {
        self.selected = item;
    }

    /// Selects a block by hotbar number `1..=5` in category order. Returns
    /// `false` for any other number.
    pub fn select_slot(&mut self, number: u8) -> bool {
        let Some(category) = usize::from(number)
            .checked_sub(1)
            .and_then(|i| Category::ALL.get(i).copied())
        else {
            return false;
        };
        self.selected = Item::Block(category);
        true
    }

    /// Block that a click would place: the selection, if it is a block and
    /// at least one is held.
    pub fn placeable(&self) -> Option<Category> {
        match self.selected {
            Item::Block(category) if self.count(self.selected) > 0 => Some(category),
            _ => None,
        }
    }

    /// Turns 3 wood and 2 stone into a pickaxe.
    pub fn craft_pickaxe(&mut self) -> Result<(), CraftError> {
        let wood = Item::Block(Category::Wood);
        let stone = Item::Block(Category::Stone);
        if self.count(wood) < PICKAXE_WOOD || self.count(stone) < PICKAXE_STONE {
            tracing::debug!("not enough resources for a pickaxe");
            return Err(CraftError::MissingIngredients {
                wood: PICKAXE_WOOD,
                stone: PICKAXE_STONE,
            });
        }
        self.remove(wood, PICKAXE_WOOD);
        self.remove(stone, PICKAXE_STONE);
        self.add(Item::Pickaxe, 1);
        tracing::info!("crafted pickaxe");
        Ok(())
    }

    /// Iterates over every item and its count, blocks first.
    pub fn iter(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        Category::ALL
            .into_iter()
            .map(Item::Block)
            .chain(std::iter::once(Item::Pickaxe))
            .map(|item| (item, self.count(item)))
    }

    fn slot_mut(&mut self, item: Item) -> &mut u32 {
        match item {
            Item::Block(category) => &mut self.blocks[category.index()],
            Item::Pickaxe => &mut self.pickaxes,
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOOD: Item = Item::Block(Category::Wood);
    const STONE: Item = Item::Block(Category::Stone);

    #[test]
    fn test_new_inventory_selects_stone() {
        let inv = Inventory::new();
        assert_eq!(inv.selected(), STONE);
        assert!(inv.iter().all(|(_, n)| n == 0));
        assert_eq!(inv.placeable(), None);
    }

    #[test]
    fn test_add_remove() {
        let mut inv = Inventory::new();
        inv.add(WOOD, 2);
        assert!(!inv.remove(WOOD, 3));
        assert_eq!(inv.count(WOOD), 2);
        assert!(inv.remove(WOOD, 2));
        assert_eq!(inv.count(WOOD), 0);
    }

    #[test]
    fn test_select_slot() {
        let mut inv = Inventory::new();
        assert!(inv.select_slot(1));
        assert_eq!(inv.selected(), Item::Block(Category::Grass));
        assert!(inv.select_slot(5));
        assert_eq!(inv.selected(), Item::Block(Category::Leaf));
        assert!(!inv.select_slot(0));
        assert!(!inv.select_slot(6));
        assert_eq!(inv.selected(), Item::Block(Category::Leaf));
    }

    #[test]
    fn test_placeable_requires_stock() {
        let mut inv = Inventory::new();
        inv.add(STONE, 1);
        assert_eq!(inv.placeable(), Some(Category::Stone));
        inv.add(Item::Pickaxe, 1);
        inv.select(Item::Pickaxe);
        assert_eq!(inv.placeable(), None);
    }

    #[test]
    fn test_craft_pickaxe() {
        let mut inv = Inventory::new();
        inv.add(WOOD, 4);
        inv.add(STONE, 2);
        inv.craft_pickaxe().unwrap();
        assert_eq!(inv.count(Item::Pickaxe), 1);
        assert_eq!(inv.count(WOOD), 1);
        assert_eq!(inv.count(STONE), 0);
    }

    #[test]
    fn test_craft_without_ingredients_consumes_nothing() {
        let mut inv = Inventory::new();
        inv.add(WOOD, 3);
        inv.add(STONE, 1);
        assert!(matches!(
            inv.craft_pickaxe(),
            Err(CraftError::MissingIngredients { .. })
        ));
        assert_eq!(inv.count(WOOD), 3);
        assert_eq!(inv.count(STONE), 1);
        assert_eq!(inv.count(Item::Pickaxe), 0);
    }

    #[test]
    fn test_item_display() {
        assert_eq!(WOOD.to_string(), "wood");
        assert_eq!(Item::Pickaxe.to_string(), "pickaxe");
    }
}

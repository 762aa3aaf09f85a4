//! Material categories and their per-category capacity ceilings.
//!
//! The set of categories is closed: every voxel in the world belongs to exactly
//! one [`Category`], and each category owns one instanced draw batch. Tools and
//! other inventory-only items are deliberately not categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default per-category instance ceiling.
pub const MAX_INSTANCES: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Material kind of a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Surface shell.
    Grass,
    /// Subsurface shell.
    Dirt,
    /// Core.
    Stone,
    /// Tree trunks.
    Wood,
    /// Tree canopies.
    Leaf,
}

/// Returned when a string does not name a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown voxel category: {0}")]
pub struct CategoryParseError(pub String);

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 5;

    /// Every category in index order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Grass,
        Category::Dirt,
        Category::Stone,
        Category::Wood,
        Category::Leaf,
    ];

    /// Dense index in `[0, COUNT)`, used to address per-category arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Grass => "grass",
            Category::Dirt => "dirt",
            Category::Stone => "stone",
            Category::Wood => "wood",
            Category::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Capacities
// ---------------------------------------------------------------------------

/// Capacity ceiling for every category's bucket.
///
/// Uniform by default; individual categories can be raised or lowered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketCapacities {
    limits: [usize; Category::COUNT],
}

impl BucketCapacities {
    /// Every category gets the same ceiling.
    pub const fn uniform(capacity: usize) -> Self {
        Self {
            limits: [capacity; Category::COUNT],
        }
    }

    /// Returns a copy with `category` set to `capacity`.
    pub const fn with(mut self, category: Category, capacity: usize) -> Self {
        self.limits[category.index()] = capacity;
        self
    }

    /// Sets the ceiling for one category.
    pub fn set(&mut self, category: Category, capacity: usize) {
        self.limits[category.index()] = capacity;
    }

    /// Ceiling for `category`.
    pub const fn get(&self, category: Category) -> usize {
        self.limits[category.index()]
    }
}

impl Default for BucketCapacities {
    fn default() -> Self {
        Self::uniform(MAX_INSTANCES)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

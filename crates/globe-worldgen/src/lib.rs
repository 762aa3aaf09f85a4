//! Procedural population of a spherical voxel world.
//!
//! Classifies cells into grass, dirt and stone shells by radial distance and
//! stamps trees on the surface using an explicit, seedable RNG so that every
//! world can be rebuilt from its seed.

pub mod generator;
pub mod seed;
pub mod shell;
pub mod tree;

pub use generator::{
    DEFAULT_TREE_PROBABILITY, GenerationPass, GenerationReport, GeneratorSettings, StepStatus,
    WorldGenerator,
};
pub use seed::{random_seed, world_rng};
pub use shell::ShellLayout;
pub use tree::{TRUNK_HEIGHT, TreeStamp, round_to_cell, stamp_tree};

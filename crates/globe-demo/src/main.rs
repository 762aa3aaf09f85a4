//! Demo binary that builds a spherical voxel world and plays a short scripted
//! mine/place session against it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p globe-demo -- --radius 24 --seed 7` to pick a world.

mod session;

use std::str::FromStr;

use clap::Parser;
use globe_config::{CliArgs, Config, StorageConfig, WorldConfig};
use globe_voxel::{BucketCapacities, Category, VoxelIndex};
use globe_worldgen::{
    GenerationReport, GeneratorSettings, ShellLayout, StepStatus, WorldGenerator, random_seed,
};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("{e}, running without a config directory");
            None
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = config_dir
        .as_deref()
        .map(|dir| {
            Config::load_or_create(dir).unwrap_or_else(|e| {
                eprintln!("Failed to load config: {e}, using defaults");
                Config::default()
            })
        })
        .unwrap_or_default();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    if let Err(e) = globe_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    let seed = config.world.seed.unwrap_or_else(random_seed);
    info!(seed, radius = config.world.radius, "building world");

    let settings = generator_settings(&config.world);
    let capacities = bucket_capacities(&config.storage);
    let (index, report) = build_world(settings, seed, capacities, config.generation.slabs_per_step);

    log_buckets(&index, &report);
    session::run(index);
}

/// Generator settings from the `world` section. Radii beyond `i32::MAX` are
/// clamped.
fn generator_settings(world: &WorldConfig) -> GeneratorSettings {
    let radius = i32::try_from(world.radius).unwrap_or_else(|_| {
        tracing::warn!(radius = world.radius, "radius too large, clamping");
        i32::MAX
    });
    GeneratorSettings {
        shells: ShellLayout {
            radius,
            surface: world.surface_thickness,
            subsurface: world.subsurface_thickness,
        },
        tree_probability: world.tree_probability,
    }
}

/// Bucket ceilings from the `storage` section. Unknown category names are
/// skipped with a warning.
fn bucket_capacities(storage: &StorageConfig) -> BucketCapacities {
    let mut capacities = BucketCapacities::uniform(storage.max_instances);
    for (name, &limit) in &storage.capacity_overrides {
        match Category::from_str(name) {
            Ok(category) => capacities.set(category, limit),
            Err(e) => tracing::warn!("ignoring capacity override: {e}"),
        }
    }
    capacities
}

/// Generates the world a few slabs at a time, logging progress between steps.
fn build_world(
    settings: GeneratorSettings,
    seed: u64,
    capacities: BucketCapacities,
    slabs_per_step: usize,
) -> (VoxelIndex, GenerationReport) {
    let mut index = VoxelIndex::new(capacities);
    let mut generator = WorldGenerator::from_seed(settings, seed);
    let mut pass = generator.pass();

    while pass.step(&mut index, slabs_per_step) == StepStatus::Pending {
        tracing::debug!(
            progress = pass.progress(),
            placed = pass.report().total_placed(),
            "generating"
        );
    }

    (index, pass.finish())
}

fn log_buckets(index: &VoxelIndex, report: &GenerationReport) {
    for category in Category::ALL {
        let snapshot = index.bucket_snapshot(category);
        info!(
            "{:>5}: {:>6} / {:<6} instances, {} generated",
            category.name(),
            snapshot.count(),
            snapshot.capacity(),
            report.placed(category),
        );
    }
    info!(total = index.len(), trees = report.trees, "world ready");
}

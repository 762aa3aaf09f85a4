//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Globe command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "globe", about = "Spherical voxel world")]
pub struct CliArgs {
    /// Sphere radius in cells.
    #[arg(long)]
    pub radius: Option<u32>,

    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chance per grass cell of growing a tree.
    #[arg(long)]
    pub tree_probability: Option<f64>,

    /// Instance ceiling for every category.
    #[arg(long)]
    pub max_instances: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(r) = args.radius {
            self.world.radius = r;
        }
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(p) = args.tree_probability {
            self.world.tree_probability = p;
        }
        if let Some(n) = args.max_instances {
            self.storage.max_instances = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            radius: None,
            seed: None,
            tree_probability: None,
            max_instances: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            radius: Some(32),
            seed: Some(99),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.radius, 32);
        assert_eq!(config.world.seed, Some(99));
        // Non-overridden fields retain defaults
        assert_eq!(config.world.tree_probability, 0.05);
        assert_eq!(config.storage.max_instances, 10_000);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "globe",
            "--radius",
            "8",
            "--tree-probability",
            "0.5",
            "--max-instances",
            "64",
            "--log-level",
            "debug",
        ]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.radius, 8);
        assert_eq!(config.world.tree_probability, 0.5);
        assert_eq!(config.storage.max_instances, 64);
        assert_eq!(config.debug.log_level, "debug");
    }
}

//! Configuration for the globe world.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and stay
//! forward/backward compatible through `#[serde(default)]`.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, StorageConfig, WorldConfig};
pub use error::ConfigError;

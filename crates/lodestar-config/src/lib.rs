//! Configuration for the Lodestar LOD budget system.
//!
//! Settings persist to disk as RON files, accept CLI overrides via clap,
//! support hot-reload detection, and tolerate missing or unknown fields.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, LodConfig, QUALITY_TIER_COUNT};
pub use error::ConfigError;

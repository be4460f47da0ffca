//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Lodestar command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "lodestar", about = "Budgeted level-of-detail demo")]
pub struct CliArgs {
    /// Geometry quality tier (0 = lowest, 5 = full budget).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub quality_tier: Option<u8>,

    /// Disable the budget coordinator and use per-object distance thresholds.
    #[arg(long)]
    pub no_budget: bool,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Number of objects in the generated scene.
    #[arg(long, default_value_t = 200)]
    pub objects: u32,

    /// Re-read `config.ron` every this many frames (0 disables reloading).
    #[arg(long, default_value_t = 30)]
    pub reload_interval: u32,

    /// Seed for the generated scene.
    #[arg(long, default_value_t = 0x5eed)]
    pub seed: u64,

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
        if let Some(tier) = args.quality_tier {
            self.lod.quality_tier = tier;
        }
        if args.no_budget {
            self.lod.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

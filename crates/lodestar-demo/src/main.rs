//! Lodestar demo: a seeded scene of detail objects seen from an orbiting
//! camera, with levels picked each frame under the configured triangle budget.

mod scene;

use clap::Parser;
use lodestar_config::{CliArgs, Config};
use lodestar_lod::{FrameStats, LodCoordinator, ObjectPool};

use crate::scene::{SceneObject, generate_scene, orbit_camera};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("lodestar")
    });

    // Load or create config, then apply CLI overrides. The file contents are
    // kept apart so reloads compare against what is on disk.
    let mut file_config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    lodestar_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    tracing::info!(
        "Lodestar demo: {} objects, {} frames, quality tier {}, budget {}",
        args.objects,
        args.frames,
        config.lod.quality_tier,
        if config.lod.enabled { "on" } else { "off" }
    );

    let scene = generate_scene(args.seed, args.objects, config.lod.distance_multiplier);
    let (mut pool, objects) = match scene {
        Ok(scene) => scene,
        Err(e) => {
            tracing::error!("Failed to build scene: {e}");
            std::process::exit(1);
        }
    };

    let mut coordinator = LodCoordinator::new(config.lod.clone());
    for SceneObject { handle, importance } in &objects {
        let Some(object) = pool.get(*handle) else {
            continue;
        };
        let costs = object.costs();
        if let Err(e) = coordinator.register(&pool, *handle, *importance, &costs) {
            tracing::warn!("Skipping object {handle:?}: {e}");
        }
    }
    tracing::info!("Registered {} objects, budget {:.0} triangles", coordinator.len(), coordinator.capacity());

    let mut totals = FrameStats::default();
    for frame in 0..args.frames {
        if args.reload_interval > 0 && frame > 0 && frame % args.reload_interval == 0 {
            match file_config.reload(&config_dir) {
                Ok(Some(reloaded)) => {
                    file_config = reloaded;
                    config = file_config.clone();
                    config.apply_cli_overrides(&args);
                    coordinator.set_config(config.lod.clone());
                    tracing::info!(
                        "Frame {frame}: config reloaded, budget {:.0} triangles",
                        coordinator.capacity()
                    );
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Frame {frame}: keeping current config: {e}"),
            }
        }

        let camera = orbit_camera(frame, args.frames);
        let Some(stats) = coordinator.recompute_levels(&mut pool, Some(&camera)) else {
            continue;
        };
        tracing::debug!(
            "Frame {frame}: {:.0}/{:.0} triangles, {} changed, {} hidden",
            stats.used_weight,
            stats.capacity,
            stats.changed,
            stats.hidden
        );
        totals.used_weight += stats.used_weight;
        totals.changed += stats.changed;
        totals.hidden += stats.hidden;
    }

    if args.frames > 0 {
        let frames = f64::from(args.frames);
        tracing::info!(
            "Average {:.0} triangles/frame, {:.1} level changes/frame, {:.1} hidden/frame",
            totals.used_weight / frames,
            totals.changed as f64 / frames,
            totals.hidden as f64 / frames
        );
    }

    let final_camera = orbit_camera(args.frames, args.frames);
    let (histogram, hidden) = level_histogram(&pool, final_camera.position);
    for (level, count) in histogram.iter().enumerate() {
        tracing::info!("Level {level}: {count} objects");
    }
    tracing::info!("Hidden: {hidden} objects");
}

/// Count objects per displayed detail level, plus hidden objects.
fn level_histogram(pool: &ObjectPool, camera_position: glam::Vec3) -> (Vec<usize>, usize) {
    let mut histogram = Vec::new();
    let mut hidden = 0;
    for (_, object) in pool.iter() {
        let level = object.level(Some(camera_position));
        if object.is_hidden_level(level) {
            hidden += 1;
            continue;
        }
        if histogram.len() <= level {
            histogram.resize(level + 1, 0);
        }
        histogram[level] += 1;
    }
    (histogram, hidden)
}

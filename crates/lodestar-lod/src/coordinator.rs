//! Frame-level budget coordination.
//!
//! Each frame every registered object becomes one knapsack group: one option
//! per detail level weighted by its triangle cost, plus a zero-weight
//! "render nothing" option. The solver picks one option per group within the
//! quality-scaled budget and the coordinator forces the result into the
//! objects.

use lodestar_config::{LodConfig, QUALITY_TIER_COUNT};
use lodestar_mckp::{MckpError, MckpSolver};

use crate::value::{detail_value, effective_distance, hysteresis_bonus};
use crate::{Camera, LodError, ObjectHandle, ObjectPool};

/// Summary of one [`LodCoordinator::recompute_levels`] pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Objects that took part in the solve.
    pub objects: usize,
    /// Effective capacity after the quality-tier multiplier.
    pub capacity: f64,
    /// Summed weight of the chosen options.
    pub used_weight: f64,
    /// Summed value of the chosen options, bonuses included.
    pub total_value: f64,
    /// Objects whose displayed level changed this frame.
    pub changed: usize,
    /// Objects set to render nothing.
    pub hidden: usize,
}

#[derive(Clone, Debug)]
struct LodEntry {
    handle: ObjectHandle,
    importance: f32,
    costs: Vec<u32>,
}

/// Distributes a triangle budget across registered detail objects.
#[derive(Clone, Debug)]
pub struct LodCoordinator {
    config: LodConfig,
    entries: Vec<LodEntry>,
    /// Summed level-0 cost of every entry.
    baseline: u64,
}

impl LodCoordinator {
    /// An out-of-range quality tier is clamped to the full budget.
    pub fn new(config: LodConfig) -> Self {
        Self {
            config: checked_config(config),
            entries: Vec::new(),
            baseline: 0,
        }
    }

    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next recompute.
    pub fn set_config(&mut self, config: LodConfig) {
        self.config = checked_config(config);
    }

    /// Select the geometry quality tier, 0 (lowest) to 5.
    pub fn set_quality_tier(&mut self, tier: u8) -> Result<(), LodError> {
        if tier as usize >= QUALITY_TIER_COUNT {
            return Err(LodError::InvalidQualityTier(tier));
        }
        self.config.quality_tier = tier;
        Ok(())
    }

    /// Enable or disable budget selection. While disabled, objects are
    /// released to their distance thresholds on every recompute.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Start tracking `handle`.
    ///
    /// `costs` holds the triangle count of each detail level, most detailed
    /// first. Registering a handle twice replaces the earlier entry.
    pub fn register(
        &mut self,
        pool: &ObjectPool,
        handle: ObjectHandle,
        importance: f32,
        costs: &[u32],
    ) -> Result<(), LodError> {
        let object = pool.get(handle).ok_or(LodError::StaleHandle(handle))?;
        if !importance.is_finite() || importance <= 0.0 {
            return Err(LodError::InvalidImportance(importance));
        }
        if costs.len() != object.level_count() {
            return Err(LodError::CostCountMismatch {
                expected: object.level_count(),
                actual: costs.len(),
            });
        }
        if let Some(level) = costs.iter().position(|&c| c == 0) {
            return Err(LodError::ZeroCost { level });
        }

        self.unregister(handle);
        self.baseline += u64::from(costs[0]);
        self.entries.push(LodEntry {
            handle,
            importance,
            costs: costs.to_vec(),
        });
        Ok(())
    }

    /// Stop tracking `handle`. Returns whether it was tracked.
    pub fn unregister(&mut self, handle: ObjectHandle) -> bool {
        let Some(i) = self.entries.iter().position(|e| e.handle == handle) else {
            return false;
        };
        let entry = self.entries.swap_remove(i);
        self.baseline -= u64::from(entry.costs[0]);
        true
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.baseline = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Budget for the next solve: every entry at full detail plus the fixed
    /// overheads, scaled by the quality tier.
    pub fn capacity(&self) -> f64 {
        let overhead = self.entries.len() as u64 * u64::from(self.config.object_overhead);
        let full = self.baseline + overhead + u64::from(self.config.overall_overhead);
        full as f64 * self.config.capacity_multiplier()
    }

    /// Choose and force a detail level for every tracked object.
    ///
    /// Returns `None` without touching any object when there is no camera.
    /// When disabled, releases every object and returns `None`.
    pub fn recompute_levels(
        &mut self,
        pool: &mut ObjectPool,
        camera: Option<&Camera>,
    ) -> Option<FrameStats> {
        let camera = camera?;

        self.prune_stale(pool);

        if !self.config.enabled {
            for entry in &self.entries {
                if let Some(object) = pool.get_mut(entry.handle) {
                    object.release();
                }
            }
            return None;
        }

        if self.entries.is_empty() {
            return Some(FrameStats {
                capacity: self.capacity(),
                ..FrameStats::default()
            });
        }

        let (mut solver, displayed) = match self.build_instance(pool, camera) {
            Ok(built) => built,
            Err(err) => {
                tracing::error!("Skipping LOD frame: {err}");
                return None;
            }
        };
        solver.solve();

        let mut stats = FrameStats {
            objects: self.entries.len(),
            capacity: solver.capacity(),
            used_weight: solver.total_weight(),
            total_value: solver.total_value(),
            ..FrameStats::default()
        };

        for ((entry, &choice), previous) in self.entries.iter().zip(solver.chosen()).zip(displayed) {
            let Some(object) = pool.get_mut(entry.handle) else {
                continue;
            };
            object.force_level(choice);
            if object.is_hidden_level(choice) {
                stats.hidden += 1;
            }
            if previous != choice {
                stats.changed += 1;
            }
        }

        tracing::debug!(
            objects = stats.objects,
            capacity = stats.capacity,
            used = stats.used_weight,
            changed = stats.changed,
            hidden = stats.hidden,
            "LOD levels recomputed"
        );

        Some(stats)
    }

    /// Forget entries whose object left the pool.
    fn prune_stale(&mut self, pool: &ObjectPool) {
        let before = self.entries.len();
        let mut removed = 0;
        self.entries.retain(|entry| {
            let live = pool.contains(entry.handle);
            if !live {
                removed += u64::from(entry.costs[0]);
            }
            live
        });
        self.baseline -= removed;

        let pruned = before - self.entries.len();
        if pruned > 0 {
            tracing::warn!("Pruned {pruned} LOD entries for removed objects");
        }
    }

    /// One group per entry, in entry order. Also returns the level each
    /// object displayed before this frame.
    fn build_instance(
        &self,
        pool: &ObjectPool,
        camera: &Camera,
    ) -> Result<(MckpSolver, Vec<usize>), MckpError> {
        let mut solver = MckpSolver::new(self.capacity(), self.entries.len())?;
        let mut displayed = Vec::with_capacity(self.entries.len());
        let overhead = f64::from(self.config.object_overhead);
        let level_factor = f64::from(self.config.level_hysteresis);
        let none_factor = f64::from(self.config.none_hysteresis);

        for (group, entry) in self.entries.iter().enumerate() {
            let Some(object) = pool.get(entry.handle) else {
                displayed.push(usize::MAX);
                solver.push_option(0.0, 0.0, group)?;
                continue;
            };

            let area = f64::from(object.surface_area());
            let distance = effective_distance(
                f64::from(camera.distance_to(object.position())),
                f64::from(object.bounding_radius()),
            );
            let current = object.level(Some(camera.position));
            displayed.push(current);

            // Culled objects get no stickiness.
            let on_screen = (!camera.is_culled(&object.world_aabb())).then_some(current);
            let bonus = |level: usize, factor: f64| {
                if on_screen == Some(level) {
                    hysteresis_bonus(factor, area, distance)
                } else {
                    0.0
                }
            };

            let importance = f64::from(entry.importance);
            for (level, &cost) in entry.costs.iter().enumerate() {
                let value = detail_value(importance, cost, area, distance) + bonus(level, level_factor);
                solver.push_option(value, f64::from(cost) + overhead, group)?;
            }
            solver.push_option(bonus(entry.costs.len(), none_factor), 0.0, group)?;
        }

        Ok((solver, displayed))
    }
}

fn checked_config(mut config: LodConfig) -> LodConfig {
    let top = (QUALITY_TIER_COUNT - 1) as u8;
    if config.quality_tier > top {
        tracing::warn!(
            "Quality tier {} out of range, using tier {top}",
            config.quality_tier
        );
        config.quality_tier = top;
    }
    config
}

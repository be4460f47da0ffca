//! Objects with several alternative representations.

use glam::Vec3;
use lodestar_math::Aabb;

use crate::{DistanceSelector, LodError};

/// One representation of a detail object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailLevel {
    /// Triangle count of this representation.
    pub cost: u32,
    /// Distance below which the fallback selector shows this level.
    pub switch_distance: f32,
}

/// A renderable with representations ordered from most to least detailed.
///
/// Level indices run from 0 (full detail) to `level_count() - 1`; the index
/// `level_count()` means the object is not rendered.
#[derive(Clone, Debug)]
pub struct DetailObject {
    position: Vec3,
    /// Bounds relative to `position`.
    local_bounds: Aabb,
    levels: Vec<DetailLevel>,
    selector: DistanceSelector,
    forced: Option<usize>,
}

impl DetailObject {
    /// Create an object at `position` with bounds relative to it.
    pub fn new(position: Vec3, local_bounds: Aabb, levels: Vec<DetailLevel>) -> Result<Self, LodError> {
        let selector = DistanceSelector::new(levels.iter().map(|l| l.switch_distance).collect())?;
        Ok(Self {
            position,
            local_bounds,
            levels,
            selector,
            forced: None,
        })
    }

    /// See [`DistanceSelector::with_min_switch_distance`].
    pub fn with_min_switch_distance(mut self, distance: f32) -> Self {
        self.selector = self.selector.with_min_switch_distance(distance);
        self
    }

    /// See [`DistanceSelector::with_distance_multiplier`].
    pub fn with_distance_multiplier(mut self, multiplier: f32) -> Result<Self, LodError> {
        self.selector = self.selector.with_distance_multiplier(multiplier)?;
        Ok(self)
    }

    /// Number of representations, excluding "not rendered".
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[DetailLevel] {
        &self.levels
    }

    /// Triangle cost per level, aligned with the level indices.
    pub fn costs(&self) -> Vec<u32> {
        self.levels.iter().map(|l| l.cost).collect()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Bounds in world space.
    pub fn world_aabb(&self) -> Aabb {
        self.local_bounds.translated(self.position)
    }

    /// Half the bounding box diagonal.
    pub fn bounding_radius(&self) -> f32 {
        self.local_bounds.bounding_radius()
    }

    /// Surface area of the bounding box.
    pub fn surface_area(&self) -> f32 {
        self.local_bounds.surface_area()
    }

    /// Pin the displayed level. Indices past the last level hide the object.
    pub fn force_level(&mut self, level: usize) {
        self.forced = Some(level.min(self.levels.len()));
    }

    /// Return to distance-threshold selection.
    pub fn release(&mut self) {
        self.forced = None;
    }

    pub fn forced_level(&self) -> Option<usize> {
        self.forced
    }

    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    /// Whether `level` is the "not rendered" index.
    pub fn is_hidden_level(&self, level: usize) -> bool {
        level >= self.levels.len()
    }

    /// The level to display: the forced one, else the distance-threshold
    /// choice. Without a camera the coarsest level is shown.
    pub fn level(&self, camera_position: Option<Vec3>) -> usize {
        if let Some(forced) = self.forced {
            return forced;
        }
        match camera_position {
            Some(camera) => self.selector.select_level(self.position.distance(camera)),
            None => self.levels.len() - 1,
        }
    }
}

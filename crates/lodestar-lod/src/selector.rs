//! Distance-threshold level selection, used when no budget coordinator
//! drives an object.

use crate::LodError;

/// Picks a detail level from per-level switch distances.
///
/// `thresholds[i]` is the distance below which level `i` is shown. Beyond the
/// last threshold the object is hidden and the selector returns the level
/// count.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceSelector {
    thresholds: Vec<f32>,
    /// Levels whose threshold is not above this distance are skipped when a
    /// coarser level exists, so a fine level never pops in from too close.
    min_switch_distance: f32,
}

impl DistanceSelector {
    /// Create a selector from strictly increasing, positive switch distances.
    pub fn new(thresholds: Vec<f32>) -> Result<Self, LodError> {
        if thresholds.is_empty() {
            return Err(LodError::NoLevels);
        }
        let increasing = thresholds.windows(2).all(|w| w[1] > w[0]);
        if !increasing || thresholds[0] <= 0.0 || thresholds.iter().any(|t| !t.is_finite()) {
            return Err(LodError::InvalidSwitchDistances);
        }
        Ok(Self {
            thresholds,
            min_switch_distance: 0.0,
        })
    }

    /// Skip levels that would only switch in closer than `distance`.
    pub fn with_min_switch_distance(mut self, distance: f32) -> Self {
        self.min_switch_distance = distance.max(0.0);
        self
    }

    /// Scale every switch distance by `multiplier`, e.g. to trade detail
    /// for speed globally.
    pub fn with_distance_multiplier(mut self, multiplier: f32) -> Result<Self, LodError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(LodError::InvalidDistanceMultiplier(multiplier));
        }
        for threshold in &mut self.thresholds {
            *threshold *= multiplier;
        }
        Ok(self)
    }

    /// The level index meaning "render nothing".
    pub fn hidden_level(&self) -> usize {
        self.thresholds.len()
    }

    /// Return a reference to the threshold distances.
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Determine the level for an object at `distance` from the camera.
    ///
    /// Returns 0 for the closest objects (full detail), higher values for
    /// progressively more distant ones, and [`hidden_level`](Self::hidden_level)
    /// beyond the last threshold.
    pub fn select_level(&self, distance: f32) -> usize {
        debug_assert!(distance >= 0.0, "distance must be non-negative");
        let last = self.thresholds.len() - 1;
        self.thresholds
            .iter()
            .enumerate()
            .find(|&(i, &threshold)| {
                distance < threshold && (i == last || self.min_switch_distance < threshold)
            })
            .map_or(self.hidden_level(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_selector() -> DistanceSelector {
        DistanceSelector::new(vec![25.0, 50.0, 100.0]).unwrap()
    }

    #[test]
    fn test_zero_distance_returns_level_0() {
        assert_eq!(default_selector().select_level(0.0), 0);
    }

    #[test]
    fn test_threshold_boundary_behavior() {
        let selector = default_selector();
        assert_eq!(selector.select_level(24.999), 0);
        assert_eq!(selector.select_level(25.0), 1);
        assert_eq!(selector.select_level(49.999), 1);
        assert_eq!(selector.select_level(50.0), 2);
    }

    #[test]
    fn test_far_distance_is_hidden() {
        let selector = default_selector();
        assert_eq!(selector.select_level(100.0), 3);
        assert_eq!(selector.select_level(f32::MAX), selector.hidden_level());
    }

    #[test]
    fn test_monotonically_increasing_with_distance() {
        let selector = default_selector();
        let mut prev = 0;
        for d in [0.0, 10.0, 25.0, 40.0, 60.0, 99.0, 150.0, 1e6] {
            let level = selector.select_level(d);
            assert!(level >= prev, "level must not decrease: d={d}, level={level}, prev={prev}");
            prev = level;
        }
    }

    #[test]
    fn test_min_switch_distance_skips_fine_levels() {
        let selector = default_selector().with_min_switch_distance(30.0);
        // Level 0 only switches in below 25, which is under the minimum.
        assert_eq!(selector.select_level(5.0), 1);
        assert_eq!(selector.select_level(60.0), 2);
    }

    #[test]
    fn test_min_switch_distance_keeps_last_level() {
        let selector = default_selector().with_min_switch_distance(500.0);
        assert_eq!(selector.select_level(5.0), 2);
    }

    #[test]
    fn test_distance_multiplier_scales_thresholds() {
        let selector = default_selector().with_distance_multiplier(2.0).unwrap();
        assert_eq!(selector.thresholds(), &[50.0, 100.0, 200.0]);
        assert_eq!(selector.select_level(30.0), 0);
        assert_eq!(selector.select_level(150.0), 2);
        assert_eq!(selector.select_level(200.0), selector.hidden_level());
    }

    #[test]
    fn test_distance_multiplier_leaves_min_switch_unscaled() {
        let selector = default_selector()
            .with_min_switch_distance(30.0)
            .with_distance_multiplier(2.0)
            .unwrap();
        // Level 0 now switches in below 50, above the minimum.
        assert_eq!(selector.select_level(5.0), 0);
    }

    #[test]
    fn test_rejects_bad_distance_multiplier() {
        for multiplier in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                default_selector().with_distance_multiplier(multiplier),
                Err(LodError::InvalidDistanceMultiplier(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_increasing_thresholds() {
        assert_eq!(
            DistanceSelector::new(vec![100.0, 50.0, 200.0]),
            Err(LodError::InvalidSwitchDistances)
        );
        assert_eq!(
            DistanceSelector::new(vec![0.0, 10.0]),
            Err(LodError::InvalidSwitchDistances)
        );
        assert_eq!(DistanceSelector::new(Vec::new()), Err(LodError::NoLevels));
    }
}

//! Visual value of a detail level, as seen from the camera.
//!
//! Pure functions so the heuristic can be tuned and tested without a scene.

/// Lower bound on the distance used in the value formula.
pub const MIN_DISTANCE: f64 = 1e-3;

/// Distance used for value computation: never closer than the object's
/// bounding radius, so a camera inside an object does not blow up the value.
pub fn effective_distance(camera_distance: f64, bounding_radius: f64) -> f64 {
    camera_distance.max(bounding_radius).max(MIN_DISTANCE)
}

/// Projected size over distance: `surface_area / distance² / distance`.
fn projection_factor(surface_area: f64, distance: f64) -> f64 {
    surface_area / (distance * distance) / distance
}

/// Value of rendering one detail level.
///
/// `importance × accuracy × projected size / distance`, where accuracy is
/// `1 − 1/cost` (a one-triangle level is worth nothing).
pub fn detail_value(importance: f64, cost: u32, surface_area: f64, distance: f64) -> f64 {
    let accuracy = (1.0 - 1.0 / f64::from(cost.max(1))).max(0.0);
    importance * accuracy * projection_factor(surface_area, distance)
}

/// Extra value for the option currently on screen.
///
/// Independent of importance: every object gets the same stickiness for the
/// same on-screen size.
pub fn hysteresis_bonus(factor: f64, surface_area: f64, distance: f64) -> f64 {
    factor * projection_factor(surface_area, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_distance_clamps_to_radius() {
        assert_eq!(effective_distance(2.0, 5.0), 5.0);
        assert_eq!(effective_distance(8.0, 5.0), 8.0);
        assert_eq!(effective_distance(0.0, 0.0), MIN_DISTANCE);
    }

    #[test]
    fn test_single_triangle_level_is_worthless() {
        assert_eq!(detail_value(1.0, 1, 6.0, 10.0), 0.0);
    }

    #[test]
    fn test_value_formula() {
        // 2 × (1 − 1/4) × (24 / 4) / 2 = 4.5
        let v = detail_value(2.0, 4, 24.0, 2.0);
        assert!((v - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_value_grows_with_cost() {
        let coarse = detail_value(1.0, 10, 6.0, 10.0);
        let fine = detail_value(1.0, 1000, 6.0, 10.0);
        assert!(fine > coarse);
    }

    #[test]
    fn test_value_falls_with_distance() {
        let near = detail_value(1.0, 100, 6.0, 10.0);
        let far = detail_value(1.0, 100, 6.0, 20.0);
        assert!((near / far - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_scales_with_importance() {
        let low = detail_value(1.0, 100, 6.0, 10.0);
        let high = detail_value(3.0, 100, 6.0, 10.0);
        assert!((high / low - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hysteresis_bonus_ignores_importance() {
        let bonus = hysteresis_bonus(0.2, 6.0, 10.0);
        assert!((bonus - 0.2 * 6.0 / 1000.0).abs() < 1e-15);
    }
}

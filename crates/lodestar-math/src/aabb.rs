use glam::Vec3;

/// Axis-aligned bounding box in f32 space.
///
/// Invariant: `min <= max` on every axis.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corners. Components are sorted so that
    /// `min <= max` on every axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Returns the full size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Total area of the six faces.
    pub fn surface_area(&self) -> f32 {
        let s = self.size();
        2.0 * (s.x * s.y + s.x * s.z + s.y * s.z)
    }

    /// Radius of the sphere through the corners, i.e. half the diagonal.
    pub fn bounding_radius(&self) -> f32 {
        self.size().length() * 0.5
    }

    /// The box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_auto_sorts() {
        let aabb = Aabb::new(Vec3::splat(10.0), Vec3::ZERO);
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_surface_area_unit_cube() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.surface_area(), 6.0);
    }

    #[test]
    fn test_surface_area_box() {
        // 2 * (1*2 + 1*3 + 2*3) = 22
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.surface_area(), 22.0);
    }

    #[test]
    fn test_bounding_radius_is_half_diagonal() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((aabb.bounding_radius() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_center_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec3::splat(10.0), Vec3::splat(5.0));
        assert_eq!(aabb.min, Vec3::splat(5.0));
        assert_eq!(aabb.max, Vec3::splat(15.0));
    }

    #[test]
    fn test_translated_keeps_size() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE).translated(Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(aabb.min, Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(aabb.size(), Vec3::ONE);
    }
}

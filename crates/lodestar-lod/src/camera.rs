use glam::{Mat4, Vec3};
use lodestar_math::{Aabb, Frustum};

/// The viewpoint LOD decisions are made for.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// View frustum used for precise culling.
    pub frustum: Frustum,
}

impl Camera {
    pub fn new(position: Vec3, frustum: Frustum) -> Self {
        Self { position, frustum }
    }

    /// Right-handed perspective camera at `position` looking at `target`,
    /// with Y up and `fov_y` in radians.
    pub fn look_at(position: Vec3, target: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let projection = Mat4::perspective_rh(fov_y, aspect, near, far);
        Self::new(position, Frustum::from_view_projection(&(projection * view)))
    }

    /// Whether `bounds` lies entirely outside the view.
    pub fn is_culled(&self, bounds: &Aabb) -> bool {
        self.frustum.is_culled(bounds)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn forward_camera() -> Camera {
        Camera::look_at(Vec3::ZERO, Vec3::NEG_Z, FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0)
    }

    #[test]
    fn test_box_ahead_is_visible() {
        let bounds = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::splat(0.5));
        assert!(!forward_camera().is_culled(&bounds));
    }

    #[test]
    fn test_box_behind_is_culled() {
        let bounds = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(0.5));
        assert!(forward_camera().is_culled(&bounds));
    }

    #[test]
    fn test_box_beyond_far_plane_is_culled() {
        let bounds = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -2000.0), Vec3::splat(0.5));
        assert!(forward_camera().is_culled(&bounds));
    }

    #[test]
    fn test_distance_to() {
        let camera = forward_camera();
        assert_eq!(camera.distance_to(Vec3::new(3.0, 4.0, 0.0)), 5.0);
    }
}

//! View frustum extracted from a view-projection matrix.
//!
//! Used by the LOD coordinator to decide whether an object is precisely
//! culled, which only affects the hysteresis bonus, never membership in the
//! budget.

use glam::{Mat4, Vec3, Vec4};

use crate::Aabb;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A view frustum defined by six inward-pointing planes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far.
    /// Each `Vec4(a, b, c, d)` where `(a,b,c)` is the normalized inward
    /// normal and `d` is the signed distance term.
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined view-projection matrix
    /// using the Gribb-Hartmann method, for projections that map depth to
    /// `[0, 1]` (glam's `perspective_rh`/`orthographic_rh`).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        planes[NEAR] = rows[2];
        planes[FAR] = rows[3] - rows[2];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// For each plane, the corner furthest along the plane normal is tested;
    /// if that corner is behind the plane, all eight corners are, and the
    /// box is culled. Boxes straddling a frustum corner may be reported
    /// visible even though they are outside.
    pub fn is_visible(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let p = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            if normal.dot(p) + plane.w < 0.0 {
                return false;
            }
        }
        true
    }

    /// Returns `true` if every corner of the box lies outside one plane.
    pub fn is_culled(&self, aabb: &Aabb) -> bool {
        !self.is_visible(aabb)
    }
}

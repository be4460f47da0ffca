//! Bounding boxes and view-frustum tests feeding the LOD value heuristics.

mod aabb;
mod frustum;

pub use aabb::Aabb;
pub use frustum::Frustum;

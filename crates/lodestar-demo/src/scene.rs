//! Seeded random scene and camera path for the demo.

use std::f32::consts::{FRAC_PI_3, TAU};

use glam::Vec3;
use lodestar_lod::{Camera, DetailLevel, DetailObject, LodError, ObjectHandle, ObjectPool};
use lodestar_math::Aabb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Objects are scattered over a disc of this radius around the origin.
const SCENE_RADIUS: f32 = 200.0;

/// Distance of the orbiting camera from the origin.
const ORBIT_RADIUS: f32 = 150.0;

/// A generated object with the importance it is registered with.
pub struct SceneObject {
    pub handle: ObjectHandle,
    pub importance: f32,
}

/// Fill a pool with `count` objects whose levels get coarser and switch
/// further away with each step. Switch distances are scaled by
/// `distance_multiplier`.
pub fn generate_scene(
    seed: u64,
    count: u32,
    distance_multiplier: f32,
) -> Result<(ObjectPool, Vec<SceneObject>), LodError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut pool = ObjectPool::new();
    let mut objects = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let radius = SCENE_RADIUS * rng.gen_range(0.0_f32..1.0).sqrt();
        let position = Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
        let half = Vec3::new(
            rng.gen_range(0.5..4.0),
            rng.gen_range(0.5..6.0),
            rng.gen_range(0.5..4.0),
        );

        let level_count = rng.gen_range(2..=4);
        let mut cost: u32 = rng.gen_range(2_000..=20_000);
        let mut switch_distance = rng.gen_range(30.0..60.0);
        let mut levels = Vec::with_capacity(level_count);
        for _ in 0..level_count {
            levels.push(DetailLevel {
                cost,
                switch_distance,
            });
            cost = (cost / 4).max(12);
            switch_distance *= 2.0;
        }

        let object = DetailObject::new(position, Aabb::from_center_half_extents(Vec3::ZERO, half), levels)?
            .with_distance_multiplier(distance_multiplier)?;
        objects.push(SceneObject {
            handle: pool.insert(object),
            importance: rng.gen_range(0.5..2.0),
        });
    }

    Ok((pool, objects))
}

/// Camera circling the scene once over `frames` frames, looking at the centre.
pub fn orbit_camera(frame: u32, frames: u32) -> Camera {
    let t = frame as f32 / frames.max(1) as f32;
    let angle = t * TAU;
    let position = Vec3::new(ORBIT_RADIUS * angle.cos(), 25.0, ORBIT_RADIUS * angle.sin());
    Camera::look_at(position, Vec3::ZERO, FRAC_PI_3, 16.0 / 9.0, 0.5, 1000.0)
}

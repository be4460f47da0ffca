//! Budgeted level-of-detail selection.
//!
//! The [`LodCoordinator`] turns the registered [`DetailObject`]s into a
//! multiple-choice knapsack instance every frame, solves it against the
//! configured triangle budget, and forces the chosen level back into each
//! object. Objects fall back to their own [`DistanceSelector`] thresholds
//! while the coordinator is disabled.

mod camera;
mod coordinator;
mod error;
mod object;
mod pool;
mod selector;
mod value;

pub use camera::Camera;
pub use coordinator::{FrameStats, LodCoordinator};
pub use error::LodError;
pub use object::{DetailLevel, DetailObject};
pub use pool::{ObjectHandle, ObjectPool};
pub use selector::DistanceSelector;
pub use value::{MIN_DISTANCE, detail_value, effective_distance, hysteresis_bonus};

use lodestar_mckp::MckpError;
use thiserror::Error;

use crate::ObjectHandle;

/// Errors returned by detail objects and the LOD coordinator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LodError {
    /// The handle's object was removed from the pool.
    #[error("object handle {0:?} is stale")]
    StaleHandle(ObjectHandle),

    /// The cost list does not have one entry per detail level.
    #[error("expected {expected} level costs, got {actual}")]
    CostCountMismatch {
        /// Detail levels the object owns.
        expected: usize,
        /// Costs supplied at registration.
        actual: usize,
    },

    /// A detail level was registered with zero triangles.
    #[error("level {level} has zero cost")]
    ZeroCost {
        /// Offending level index.
        level: usize,
    },

    /// Importance is zero, negative or not finite.
    #[error("importance {0} must be positive and finite")]
    InvalidImportance(f32),

    /// Quality tier outside `0..=5`.
    #[error("quality tier {0} out of range")]
    InvalidQualityTier(u8),

    /// A detail object was built without any level.
    #[error("detail object needs at least one level")]
    NoLevels,

    /// Switch distances are not positive and strictly increasing.
    #[error("switch distances must be positive and strictly increasing")]
    InvalidSwitchDistances,

    /// Switch distance scale is zero, negative or not finite.
    #[error("distance multiplier {0} must be positive and finite")]
    InvalidDistanceMultiplier(f32),

    /// The knapsack solver rejected its input.
    #[error("solver rejected input: {0}")]
    Solver(#[from] MckpError),
}

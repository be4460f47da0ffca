//! Solver input errors.

/// Invalid solver input. These are caller bugs, not transient conditions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MckpError {
    /// The solver was constructed without any group.
    #[error("solver needs at least one group")]
    NoGroups,

    /// Capacity is negative, NaN or infinite.
    #[error("invalid capacity {0}: must be finite and non-negative")]
    InvalidCapacity(f64),

    /// An option was pushed into a group that does not exist.
    #[error("group {group} out of range (solver has {group_count} groups)")]
    GroupOutOfRange {
        /// Requested group index.
        group: usize,
        /// Number of groups the solver was built with.
        group_count: usize,
    },

    /// Option weight is negative, NaN or infinite.
    #[error("invalid weight {weight} in group {group}: must be finite and non-negative")]
    InvalidWeight {
        /// Group the option was pushed into.
        group: usize,
        /// Offending weight.
        weight: f64,
    },

    /// Option value is negative, NaN or infinite.
    #[error("invalid value {value} in group {group}: must be finite and non-negative")]
    InvalidValue {
        /// Group the option was pushed into.
        group: usize,
        /// Offending value.
        value: f64,
    },
}

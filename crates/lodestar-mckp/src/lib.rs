//! Multiple-choice knapsack solving for per-frame budget allocation.
//!
//! The solver knows nothing about rendering: it takes groups of
//! `(value, weight)` options and a single capacity, and picks exactly one
//! option per group.

mod error;
mod solver;

pub use error::MckpError;
pub use solver::{EPSILON, McOption, MckpSolver};

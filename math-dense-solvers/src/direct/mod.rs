//! Direct solvers for dense linear systems
//!
//! This module provides the elimination-based methods:
//! - [`eliminate`]: forward Gaussian elimination with a pluggable pivot policy
//! - [`solve`]: elimination followed by back-substitution
//! - [`determinant`]: product of pivots with permutation sign
//! - [`inverse`] and [`condition_number`]: Gauss-Jordan on `[A | I]`
//! - [`analyze`]: any combination of the above in one call

mod analysis;
mod elimination;
mod gauss;
mod inverse;

pub use analysis::{Analysis, AnalysisOptions, analyze};
pub use elimination::{ColumnOrder, PivotStrategy, eliminate};
pub use gauss::{back_substitute, determinant, reduced_determinant, solve};
pub use inverse::{condition_number, inverse};

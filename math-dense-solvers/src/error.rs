//! Error types for the dense solvers.
//!
//! Only structural problems are reported as errors. Numerical degeneracy
//! (zero pivots, singular systems) is never an error: it shows up as
//! non-finite values in the returned matrices.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by matrix construction and the solver entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Arguments are structurally unusable (non-square system, row mismatch, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage for a matrix or a working copy could not be obtained.
    #[error("matrix storage allocation failed")]
    AllocationFailure,

    /// Inner dimensions of a product disagree.
    #[error("matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension required by the left operand
        expected: usize,
        /// Dimension found in the right operand
        got: usize,
    },
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SolverError::InvalidArgument(msg.into())
    }

    /// Returns `true` if the arguments were rejected before any computation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SolverError::InvalidArgument(_))
    }

    /// Returns `true` if the failure came from storage allocation.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, SolverError::AllocationFailure)
    }
}

impl From<TryReserveError> for SolverError {
    fn from(_: TryReserveError) -> Self {
        SolverError::AllocationFailure
    }
}

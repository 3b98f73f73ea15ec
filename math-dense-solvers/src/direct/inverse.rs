//! Matrix inverse by Gauss-Jordan elimination, and condition number
//!
//! The inverse uses its own elimination on `[A | I]` rather than the logical
//! column permutation of [`eliminate`](super::eliminate): reducing `A` all the
//! way to the identity needs the pivots on the diagonal, so zero diagonal
//! entries are fixed by physical row swaps instead.

use crate::error::{Result, SolverError};
use crate::matrix::Matrix;
use crate::traits::Scalar;

/// Compute the inverse of a square matrix
///
/// A diagonal element that is numerically zero is replaced by swapping in
/// the first row below with a non-zero entry in that column. When there is
/// none the matrix is singular and the division goes ahead anyway, so the
/// result contains infinities or NaNs.
///
/// # Errors
///
/// - [`SolverError::InvalidArgument`] if `a` is not square
/// - [`SolverError::AllocationFailure`] if a working matrix cannot be allocated
pub fn inverse<T: Scalar>(a: &Matrix<T>) -> Result<Matrix<T>> {
    if !a.is_square() {
        return Err(SolverError::invalid(format!(
            "inverse needs a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    let n = a.rows();
    let mut work = a.try_clone()?;
    let mut res = Matrix::identity(n)?;

    // Forward pass: unit diagonal, zeros below
    for i in 0..n {
        if work.get(i, i).is_numerically_zero() {
            if let Some(j) = ((i + 1)..n).find(|&j| !work.get(j, i).is_numerically_zero()) {
                work.swap_rows(i, j);
                res.swap_rows(i, j);
            } else {
                log::debug!("inverse: no usable pivot in column {}", i);
            }
        }

        let scale = T::one() / work.get(i, i);
        res.scale_row(i, scale);
        work.scale_row(i, scale);

        for j in (i + 1)..n {
            let coefficient = -work.get(j, i);
            res.add_scaled_row(i, j, coefficient);
            work.add_scaled_row(i, j, coefficient);
        }
    }

    // Backward pass: zeros above
    for i in (0..n).rev() {
        for j in (0..i).rev() {
            let coefficient = -work.get(j, i);
            res.add_scaled_row(i, j, coefficient);
            work.add_scaled_row(i, j, coefficient);
        }
    }

    Ok(res)
}

/// Condition number `||A|| * ||A^-1||` in the max-row-sum norm
///
/// Infinite or NaN for singular matrices. Errors are those of [`inverse`].
pub fn condition_number<T: Scalar>(a: &Matrix<T>) -> Result<T> {
    let inv = inverse(a)?;
    Ok(a.norm_inf() * inv.norm_inf())
}

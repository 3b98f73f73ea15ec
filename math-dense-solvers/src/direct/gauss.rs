//! Determinant and linear solve by Gaussian elimination
//!
//! Both entry points eliminate working copies, so the caller's matrices can
//! be reused for further computations.

use super::elimination::{ColumnOrder, PivotStrategy, eliminate};
use crate::error::{Result, SolverError};
use crate::matrix::Matrix;
use crate::traits::Scalar;

fn require_square<T: Scalar>(a: &Matrix<T>, what: &str) -> Result<()> {
    if a.is_square() {
        Ok(())
    } else {
        Err(SolverError::invalid(format!(
            "{} needs a square matrix, got {}x{}",
            what,
            a.rows(),
            a.cols()
        )))
    }
}

/// Determinant of an eliminated matrix
///
/// `a` must be the output of [`eliminate`] together with its `order`.
pub fn reduced_determinant<T: Scalar>(a: &Matrix<T>, order: &ColumnOrder) -> T {
    let mut det = T::one();
    for (i, pivot) in order.iter().enumerate() {
        match pivot {
            Some(p) => det *= a.get(i, p),
            None => return T::zero(),
        }
    }
    det * order.sign::<T>()
}

/// Back-substitution on an eliminated system
///
/// `a` and `f` must have been reduced together by [`eliminate`]. Unknowns
/// are computed from the last step to the first; each column of `f` gives
/// one column of the result. Degenerate steps are skipped, and the unknowns
/// of columns no step claimed are set to NaN.
pub fn back_substitute<T: Scalar>(
    a: &Matrix<T>,
    f: &Matrix<T>,
    order: &ColumnOrder,
) -> Result<Matrix<T>> {
    let n = a.rows();
    let k = f.cols();
    let mut x = Matrix::new(n, k)?;

    for col in order.unclaimed_columns() {
        for c in 0..k {
            x.set(col, c, T::nan());
        }
    }

    for i in (0..order.len()).rev() {
        let Some(pivot) = order.pivot(i) else {
            continue;
        };
        for c in 0..k {
            let mut acc = f.get(i, c);
            for j in (i + 1)..order.len() {
                if let Some(col) = order.pivot(j) {
                    acc -= a.get(i, col) * x.get(col, c);
                }
            }
            x.set(pivot, c, acc / a.get(i, pivot));
        }
    }

    Ok(x)
}

/// Compute the determinant of a square matrix
///
/// The product of the pivots, with the sign given by the parity of the
/// column permutation. A matrix where elimination finds a row without pivot
/// has determinant zero.
pub fn determinant<T: Scalar>(a: &Matrix<T>, strategy: PivotStrategy) -> Result<T> {
    require_square(a, "determinant")?;

    let mut work = a.try_clone()?;
    let order = eliminate(&mut work, &mut [], strategy)?;
    let det = reduced_determinant(&work, &order);

    log::debug!(
        "determinant of {}x{} matrix ({:?} pivoting): {}",
        a.rows(),
        a.cols(),
        strategy,
        det
    );
    Ok(det)
}

/// Solve `A x = f` by Gaussian elimination
///
/// `f` may hold several right-hand sides as columns. A (near-)zero pivot is
/// not guarded against: singular systems yield infinities or NaNs in the
/// solution instead of an error.
///
/// # Errors
///
/// - [`SolverError::InvalidArgument`] if `a` is not square or `f` has a different number of rows
/// - [`SolverError::AllocationFailure`] if a working copy cannot be allocated
pub fn solve<T: Scalar>(
    a: &Matrix<T>,
    f: &Matrix<T>,
    strategy: PivotStrategy,
) -> Result<Matrix<T>> {
    require_square(a, "solve")?;
    if f.rows() != a.rows() {
        return Err(SolverError::invalid(format!(
            "right-hand side has {} rows, system has {}",
            f.rows(),
            a.rows()
        )));
    }

    let mut work_a = a.try_clone()?;
    let mut work_f = f.try_clone()?;
    let order = eliminate(&mut work_a, &mut [&mut work_f], strategy)?;
    if order.is_degenerate() {
        log::debug!("solve: elimination found a singular system");
    }

    back_substitute(&work_a, &work_f, &order)
}

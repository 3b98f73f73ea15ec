//! Generated test systems
//!
//! Produces the parametrised `n x n` system used to exercise the solvers
//! without typing in a matrix. The matrix is strictly diagonally dominant
//! for moderate `n`, so every method applies to it.

use crate::error::{Result, SolverError};
use crate::matrix::Matrix;
use crate::traits::Scalar;

#[inline]
fn real<T: Scalar>(v: usize) -> T {
    // infallible for floating-point types
    T::from_usize(v).unwrap_or_else(T::nan)
}

/// Build the system `(A, f)` for size `n` and parameter `m`
///
/// - `A[i][i] = n + m^2 + i/m + i/n`
/// - `A[i][j] = (i + j) / (m + n)` for `i != j`
/// - `f[i] = m * i + n`
///
/// Both `n` and `m` must be positive.
pub fn generated_system<T: Scalar>(n: usize, m: usize) -> Result<(Matrix<T>, Matrix<T>)> {
    if n == 0 || m == 0 {
        return Err(SolverError::invalid(format!(
            "generator parameters must be positive, got n = {}, m = {}",
            n, m
        )));
    }
    let (nf, mf) = (real::<T>(n), real::<T>(m));

    let a = Matrix::from_fn(n, n, |i, j| {
        if i == j {
            nf + mf * mf + real::<T>(j) / mf + real::<T>(i) / nf
        } else {
            real::<T>(i + j) / (mf + nf)
        }
    })?;
    let f = Matrix::from_fn(n, 1, |i, _| mf * real::<T>(i) + nf)?;

    Ok((a, f))
}

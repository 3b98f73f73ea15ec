//! SOR (successive over-relaxation) solver
//!
//! The system is first symmetrized into the normal equations
//! `A^T A x = A^T f`, whose matrix is self-adjoint and, for non-singular `A`,
//! positive definite. SOR then converges for any `0 < omega < 2`.
//!
//! Outside that range, or for singular `A`, the iteration need not
//! converge. Without [`SorConfig::max_sweeps`] the solver does not stop in
//! that case.

use crate::error::{Result, SolverError};
use crate::matrix::Matrix;
use crate::traits::Scalar;

/// SOR solver configuration
#[derive(Debug, Clone)]
pub struct SorConfig<R> {
    /// Relaxation factor, converges for values in (0, 2)
    pub omega: R,
    /// Stop once the Euclidean norm of a sweep's update is at most this
    pub precision: R,
    /// Upper bound on the number of sweeps (`None` = unbounded)
    pub max_sweeps: Option<usize>,
    /// Print progress every N sweeps (0 = no output)
    pub print_interval: usize,
}

impl Default for SorConfig<f64> {
    fn default() -> Self {
        Self {
            omega: 1.0,
            precision: 1e-10,
            max_sweeps: None,
            print_interval: 0,
        }
    }
}

/// SOR solver result
#[derive(Debug, Clone)]
pub struct SorSolution<T: Scalar> {
    /// Solution column vector
    pub x: Matrix<T>,
    /// Number of sweeps performed
    pub sweeps: usize,
    /// Norm of the update made by the last sweep
    pub step: T,
    /// Whether the step fell below the requested precision
    pub converged: bool,
}

/// Build the normal equations `(A^T A, A^T f)`
pub fn normal_equations<T: Scalar>(
    a: &Matrix<T>,
    f: &Matrix<T>,
) -> Result<(Matrix<T>, Matrix<T>)> {
    let at = a.transpose()?;
    let ata = at.multiply(a)?;
    let atf = at.multiply(f)?;
    Ok((ata, atf))
}

/// Solve `A x = f` with SOR applied to the normal equations
///
/// Each sweep updates the components in order, in place, so later rows
/// already see the new values of earlier ones:
///
/// `x_i += omega * (f'_i - sum_j a'_ij x_j) / a'_ii`
///
/// Sweeps continue while the norm of the update exceeds `config.precision`.
///
/// # Errors
///
/// - [`SolverError::InvalidArgument`] if `a` is not square or `f` is not a column of matching length
/// - [`SolverError::AllocationFailure`] if a working matrix cannot be allocated
pub fn sor<T: Scalar>(
    a: &Matrix<T>,
    f: &Matrix<T>,
    config: &SorConfig<T>,
) -> Result<SorSolution<T>> {
    if !a.is_square() {
        return Err(SolverError::invalid(format!(
            "SOR needs a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    if f.rows() != a.rows() || f.cols() != 1 {
        return Err(SolverError::invalid(format!(
            "right-hand side must be {}x1, got {}x{}",
            a.rows(),
            f.rows(),
            f.cols()
        )));
    }

    let (a_n, f_n) = normal_equations(a, f)?;
    let n = a_n.rows();
    let mut x = Matrix::new(n, 1)?;
    let mut sweeps = 0;

    loop {
        let mut distance_squared = T::zero();
        for i in 0..n {
            let mut sum = T::zero();
            for j in 0..n {
                sum += a_n.get(i, j) * x.get(j, 0);
            }
            let delta = config.omega * (f_n.get(i, 0) - sum) / a_n.get(i, i);
            distance_squared += delta * delta;
            x.set(i, 0, x.get(i, 0) + delta);
        }
        sweeps += 1;
        let step = distance_squared.sqrt();

        if config.print_interval > 0 && sweeps % config.print_interval == 0 {
            log::info!(
                "SOR sweep {}: step = {:.6e}",
                sweeps,
                step.to_f64().unwrap_or(0.0)
            );
        }

        // NaN ends the loop as well, unconverged
        let keep_going = step > config.precision;
        let capped = config.max_sweeps.is_some_and(|max| sweeps >= max);
        if !keep_going || capped {
            let converged = step <= config.precision;
            log::debug!(
                "SOR finished after {} sweeps (step {:.3e}, converged: {})",
                sweeps,
                step.to_f64().unwrap_or(0.0),
                converged
            );
            return Ok(SorSolution {
                x,
                sweeps,
                step,
                converged,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sor_spd() {
        // Symmetric positive definite matrix
        let a: Matrix = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
        let f: Matrix = Matrix::column(&[1.0, 2.0]).unwrap();

        let config = SorConfig {
            omega: 1.0,
            precision: 1e-8,
            max_sweeps: Some(1000),
            print_interval: 0,
        };

        let solution = sor(&a, &f, &config).unwrap();

        assert!(solution.converged, "SOR should converge for SPD matrix");
        assert!(solution.sweeps < 100);
        assert_relative_eq!(solution.x.get(0, 0), 1.0 / 11.0, epsilon = 1e-6);
        assert_relative_eq!(solution.x.get(1, 0), 7.0 / 11.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sor_identity() {
        let n = 5;
        let id: Matrix = Matrix::identity(n).unwrap();
        let f = Matrix::from_fn(n, 1, |i, _| (i + 1) as f64).unwrap();

        let solution = sor(&id, &f, &SorConfig::default()).unwrap();

        assert!(solution.converged);
        assert!(solution.sweeps <= 2);
        assert!(solution.x.approx_eq(&f, 1e-12));
    }

    #[test]
    fn test_sor_non_symmetric() {
        let a: Matrix = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let f: Matrix = Matrix::column(&[5.0, 6.0]).unwrap();

        let config = SorConfig {
            omega: 1.2,
            precision: 1e-13,
            max_sweeps: Some(100_000),
            print_interval: 0,
        };
        let solution = sor(&a, &f, &config).unwrap();

        assert!(solution.converged);
        assert_relative_eq!(solution.x.get(0, 0), -4.0, epsilon = 1e-8);
        assert_relative_eq!(solution.x.get(1, 0), 4.5, epsilon = 1e-8);
    }

    #[test]
    fn test_sor_sweep_cap() {
        let a: Matrix = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
        let f: Matrix = Matrix::column(&[1.0, 2.0]).unwrap();

        // omega outside (0, 2) diverges
        let config = SorConfig {
            omega: 2.5,
            precision: 1e-10,
            max_sweeps: Some(50),
            print_interval: 0,
        };
        let solution = sor(&a, &f, &config).unwrap();

        assert!(!solution.converged);
        assert!(solution.sweeps <= 50);
    }

    #[test]
    fn test_sor_leaves_inputs_untouched() {
        let a: Matrix = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
        let f: Matrix = Matrix::column(&[3.0, 3.0]).unwrap();
        let (a0, f0) = (a.clone(), f.clone());
        let _ = sor(&a, &f, &SorConfig::default()).unwrap();
        assert_eq!(a, a0);
        assert_eq!(f, f0);
    }

    #[test]
    fn test_sor_rejects_bad_shapes() {
        let config = SorConfig::default();
        let a: Matrix = Matrix::identity(2).unwrap();

        let wide: Matrix = Matrix::new(2, 2).unwrap();
        assert!(sor(&a, &wide, &config).unwrap_err().is_invalid_argument());

        let short: Matrix = Matrix::new(3, 1).unwrap();
        assert!(sor(&a, &short, &config).unwrap_err().is_invalid_argument());

        let rect: Matrix = Matrix::new(2, 3).unwrap();
        let f: Matrix = Matrix::new(2, 1).unwrap();
        assert!(sor(&rect, &f, &config).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_normal_equations() {
        let a: Matrix = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let f: Matrix = Matrix::column(&[1.0, 1.0]).unwrap();
        let (ata, atf) = normal_equations(&a, &f).unwrap();
        assert_eq!(ata, Matrix::from_rows(&[[10.0, 14.0], [14.0, 20.0]]).unwrap());
        assert_eq!(atf, Matrix::column(&[4.0, 6.0]).unwrap());
    }
}

//! Combined direct analysis of a linear system
//!
//! Runs the requested subset of solve, determinant, inverse and condition
//! number in one call. The solve and the determinant share one elimination,
//! the inverse and the condition number share one inversion.

use super::elimination::{PivotStrategy, eliminate};
use super::gauss::{back_substitute, reduced_determinant};
use super::inverse::inverse;
use crate::error::{Result, SolverError};
use crate::matrix::Matrix;
use crate::traits::Scalar;

/// Which quantities [`analyze`] computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Compute the solution of `A x = f` (requires `f`)
    pub solve_system: bool,
    /// Pivot policy for the solve and the determinant
    pub pivoting: PivotStrategy,
    /// Compute the determinant of `A`
    pub determinant: bool,
    /// Compute the inverse of `A`
    pub inverse: bool,
    /// Compute the condition number of `A`
    pub condition_number: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solve_system: true,
            pivoting: PivotStrategy::Partial,
            determinant: true,
            inverse: false,
            condition_number: false,
        }
    }
}

/// Results of [`analyze`]; fields not requested are `None`
#[derive(Debug, Clone, Default)]
pub struct Analysis<T: Scalar> {
    pub solution: Option<Matrix<T>>,
    pub determinant: Option<T>,
    pub inverse: Option<Matrix<T>>,
    pub condition_number: Option<T>,
}

/// Compute the quantities selected in `options` for the system `A x = f`
///
/// All arguments are validated before any computation starts.
pub fn analyze<T: Scalar>(
    a: &Matrix<T>,
    f: Option<&Matrix<T>>,
    options: &AnalysisOptions,
) -> Result<Analysis<T>> {
    if !a.is_square() {
        return Err(SolverError::invalid(format!(
            "analysis needs a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    if options.solve_system && f.is_none() {
        return Err(SolverError::invalid(
            "solving the system needs a right-hand side",
        ));
    }
    if let Some(f) = f {
        if f.rows() != a.rows() {
            return Err(SolverError::invalid(format!(
                "right-hand side has {} rows, system has {}",
                f.rows(),
                a.rows()
            )));
        }
    }

    let mut analysis = Analysis {
        solution: None,
        determinant: None,
        inverse: None,
        condition_number: None,
    };

    if options.determinant || options.solve_system {
        let mut work_a = a.try_clone()?;
        let mut work_f = match (options.solve_system, f) {
            (true, Some(f)) => Some(f.try_clone()?),
            _ => None,
        };
        let order = match work_f.as_mut() {
            Some(wf) => eliminate(&mut work_a, &mut [wf], options.pivoting)?,
            None => eliminate(&mut work_a, &mut [], options.pivoting)?,
        };
        if order.is_degenerate() {
            log::debug!("analysis: elimination found a singular system");
        }

        if options.determinant {
            analysis.determinant = Some(reduced_determinant(&work_a, &order));
        }
        if let Some(wf) = &work_f {
            analysis.solution = Some(back_substitute(&work_a, wf, &order)?);
        }
    }
    if options.inverse || options.condition_number {
        let inv = inverse(a)?;
        if options.condition_number {
            analysis.condition_number = Some(a.norm_inf() * inv.norm_inf());
        }
        if options.inverse {
            analysis.inverse = Some(inv);
        }
    }

    Ok(analysis)
}

//! Forward Gaussian elimination with logical column permutation
//!
//! Instead of swapping columns when a pivot is chosen off the diagonal, the
//! column stays where it is and the choice is written to a [`ColumnOrder`].
//! The result is a matrix that is upper triangular once its columns are read
//! in that order.

use crate::error::{Result, SolverError};
use crate::format::MatrixFormat;
use crate::matrix::Matrix;
use crate::traits::Scalar;

/// Pivot selection policy for one elimination step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Largest magnitude element among the remaining columns of the row.
    /// Ties go to the lowest column index.
    #[default]
    Partial,
    /// Lowest-indexed remaining column whose element is not numerically zero
    FirstNonZero,
}

impl From<bool> for PivotStrategy {
    /// `true` selects partial pivoting
    fn from(use_pivoting: bool) -> Self {
        if use_pivoting {
            PivotStrategy::Partial
        } else {
            PivotStrategy::FirstNonZero
        }
    }
}

/// Permutation record produced by [`eliminate`]
///
/// Entry `i` is the column used as pivot at step `i` (which is also row
/// `i`), or `None` when row `i` had no usable pivot. Real entries are
/// pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    steps: Vec<Option<usize>>,
    num_cols: usize,
}

impl ColumnOrder {
    /// Build a record directly from pivot columns
    ///
    /// Fails if a column is out of range or used twice.
    pub fn from_steps(steps: Vec<Option<usize>>, num_cols: usize) -> Result<Self> {
        let mut seen = vec![false; num_cols];
        for col in steps.iter().flatten() {
            if *col >= num_cols || seen[*col] {
                return Err(SolverError::invalid(format!(
                    "column {} is out of range or repeated in the permutation record",
                    col
                )));
            }
            seen[*col] = true;
        }
        Ok(Self { steps, num_cols })
    }

    /// Number of elimination steps recorded
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Pivot column of step `step`, `None` for a degenerate step
    pub fn pivot(&self, step: usize) -> Option<usize> {
        self.steps[step]
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.steps.iter().copied()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.steps
    }

    /// True if some step found no pivot, i.e. the matrix is singular
    pub fn is_degenerate(&self) -> bool {
        self.steps.iter().any(Option::is_none)
    }

    /// Number of pairs `i < j` with `col[i] > col[j]`, degenerate steps excluded
    pub fn inversions(&self) -> usize {
        let mut count = 0;
        for (i, ci) in self.steps.iter().enumerate() {
            let Some(ci) = ci else { continue };
            count += self.steps[i + 1..]
                .iter()
                .flatten()
                .filter(|cj| *cj < ci)
                .count();
        }
        count
    }

    /// `(-1)^inversions`
    pub fn sign<T: Scalar>(&self) -> T {
        if self.inversions() % 2 == 0 {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Columns no step used as pivot, in ascending order
    pub fn unclaimed_columns(&self) -> Vec<usize> {
        let mut claimed = vec![false; self.num_cols];
        for col in self.steps.iter().flatten() {
            claimed[*col] = true;
        }
        (0..self.num_cols).filter(|c| !claimed[*c]).collect()
    }
}

/// Choose the pivot column of `row` among columns not yet eliminated
fn select_pivot<T: Scalar>(
    a: &Matrix<T>,
    eliminated: &[bool],
    row: usize,
    strategy: PivotStrategy,
) -> Option<usize> {
    let mut remaining = (0..a.cols()).filter(|c| !eliminated[*c]);
    match strategy {
        PivotStrategy::Partial => {
            let first = remaining.next()?;
            let mut best = first;
            let mut best_abs = a.get(row, first).abs();
            for c in remaining {
                let v = a.get(row, c).abs();
                if v > best_abs {
                    best = c;
                    best_abs = v;
                }
            }
            if best_abs.is_numerically_zero() {
                None
            } else {
                Some(best)
            }
        }
        PivotStrategy::FirstNonZero => remaining.find(|c| !a.get(row, *c).is_numerically_zero()),
    }
}

/// Forward elimination of a square matrix, in place
///
/// Every row operation applied to `a` is applied to each of `companions`
/// as well, so right-hand sides stay aligned with the reduced matrix. A row
/// without a usable pivot is left as is and recorded as degenerate; content
/// never makes this fail, only shapes and allocation do.
///
/// # Errors
///
/// - [`SolverError::InvalidArgument`] if `a` is not square or a companion
///   has a different number of rows
/// - [`SolverError::AllocationFailure`] if the bookkeeping vectors cannot be allocated
pub fn eliminate<T: Scalar>(
    a: &mut Matrix<T>,
    companions: &mut [&mut Matrix<T>],
    strategy: PivotStrategy,
) -> Result<ColumnOrder> {
    if !a.is_square() {
        return Err(SolverError::invalid(format!(
            "elimination needs a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    let n = a.rows();
    if let Some(bad) = companions.iter().find(|m| m.rows() != n) {
        return Err(SolverError::invalid(format!(
            "companion matrix has {} rows, expected {}",
            bad.rows(),
            n
        )));
    }

    let mut steps = Vec::new();
    steps.try_reserve_exact(n)?;
    let mut eliminated = Vec::new();
    eliminated.try_reserve_exact(n)?;
    eliminated.resize(n, false);

    for i in 0..n {
        let pivot = select_pivot(a, &eliminated, i, strategy);
        steps.push(pivot);

        let Some(p) = pivot else {
            log::trace!("elimination step {}: no pivot, row skipped", i);
            continue;
        };
        eliminated[p] = true;

        let pivot_value = a.get(i, p);
        for j in (i + 1)..n {
            let coefficient = -a.get(j, p) / pivot_value;
            a.add_scaled_row(i, j, coefficient);
            for m in companions.iter_mut() {
                m.add_scaled_row(i, j, coefficient);
            }
        }

        log::trace!(
            "elimination step {}: pivot column {} (value {})",
            i,
            p,
            pivot_value
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("\n{}", a.display(MatrixFormat::Grid));
        }
    }

    Ok(ColumnOrder {
        steps,
        num_cols: n,
    })
}

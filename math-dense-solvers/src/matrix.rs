//! Dense row-major matrix
//!
//! [`Matrix`] wraps an `ndarray::Array2` in standard (row-major) layout, so
//! element `(r, c)` sits at offset `c + r * cols` of the storage. It provides
//! the element accessors and row primitives the elimination code is written
//! against, plus products and transposition.
//!
//! Construction and copies go through `try_reserve_exact`, so running out of
//! memory is reported as [`SolverError::AllocationFailure`]. Every element
//! and row access is bounds-checked by `ndarray` and panics when out of range.

use crate::error::{Result, SolverError};
use crate::traits::Scalar;
use ndarray::{Array2, ArrayView1, Zip, s};
use std::ops::{Index, IndexMut};

/// Dense matrix with row-major contiguous storage
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar = f64> {
    data: Array2<T>,
}

/// Allocate `len` copies of `value`, reporting allocation failure instead of aborting.
fn try_filled<T: Scalar>(len: usize, value: T) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, value);
    Ok(values)
}

fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(SolverError::AllocationFailure)
}

impl<T: Scalar> Matrix<T> {
    /// Wrap row-major values whose length is already known to be `rows * cols`
    fn from_storage(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        let data = Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| SolverError::invalid(format!("{}x{} matrix: {}", rows, cols, e)))?;
        Ok(Self { data })
    }

    /// Create a zero-filled `rows x cols` matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let values = try_filled(checked_len(rows, cols)?, T::zero())?;
        Self::from_storage(rows, cols, values)
    }

    /// Create the `n x n` identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        m.data.diag_mut().fill(T::one());
        Ok(m)
    }

    /// Create a matrix by evaluating `f(row, col)` for every element
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut m = Self::new(rows, cols)?;
        for ((r, c), v) in m.data.indexed_iter_mut() {
            *v = f(r, c);
        }
        Ok(m)
    }

    /// Create a matrix from row-major values
    pub fn from_shape_vec(rows: usize, cols: usize, values: Vec<T>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if values.len() != len {
            return Err(SolverError::invalid(format!(
                "{} values cannot fill a {}x{} matrix",
                values.len(),
                rows,
                cols
            )));
        }
        Self::from_storage(rows, cols, values)
    }

    /// Create a matrix from a list of rows
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::new();
        values.try_reserve_exact(checked_len(rows.len(), cols)?)?;
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(SolverError::invalid(format!(
                    "row {} has {} elements, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            values.extend_from_slice(row);
        }
        Self::from_storage(rows.len(), cols, values)
    }

    /// Create an `n x 1` column vector
    pub fn column(values: &[T]) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(values.len())?;
        data.extend_from_slice(values);
        Self::from_storage(values.len(), 1, data)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Underlying array
    #[inline]
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    /// Unwrap into the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Elements of one row
    #[inline]
    pub fn row(&self, row: usize) -> ArrayView1<'_, T> {
        self.data.row(row)
    }

    /// Element at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[[row, col]]
    }

    /// Overwrite the element at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[[row, col]] = value;
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self> {
        let mut values = Vec::new();
        values.try_reserve_exact(self.data.len())?;
        values.extend(self.data.iter().copied());
        Self::from_storage(self.rows(), self.cols(), values)
    }

    /// Exchange rows `r1` and `r2`
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            // still reject an out-of-range row
            let _ = self.data.row(r1);
            return;
        }
        let (a, b) = self.data.multi_slice_mut((s![r1, ..], s![r2, ..]));
        Zip::from(a).and(b).for_each(|x, y| std::mem::swap(x, y));
    }

    /// Multiply every element of `row` by `factor`
    pub fn scale_row(&mut self, row: usize, factor: T) {
        self.data.row_mut(row).mapv_inplace(|v| v * factor);
    }

    /// Add `factor * row[source]` into `row[dest]`
    pub fn add_scaled_row(&mut self, source: usize, dest: usize, factor: T) {
        if source == dest {
            self.data.row_mut(dest).mapv_inplace(|v| v + factor * v);
            return;
        }
        let (dst, src) = self.data.multi_slice_mut((s![dest, ..], s![source, ..]));
        Zip::from(dst).and(src).for_each(|d, &mut v| *d += factor * v);
    }

    /// Matrix product `self * other`
    ///
    /// Fails with [`SolverError::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols() != other.rows() {
            return Err(SolverError::DimensionMismatch {
                expected: self.cols(),
                got: other.rows(),
            });
        }
        let mut res = Matrix::new(self.rows(), other.cols())?;
        for ((i, j), out) in res.data.indexed_iter_mut() {
            *out = self
                .data
                .row(i)
                .iter()
                .zip(other.data.column(j))
                .fold(T::zero(), |acc, (&a, &b)| acc + a * b);
        }
        Ok(res)
    }

    /// Transposed copy
    pub fn transpose(&self) -> Result<Matrix<T>> {
        let mut res = Matrix::new(self.cols(), self.rows())?;
        res.data.assign(&self.data.t());
        Ok(res)
    }

    /// Maximum over rows of the sum of absolute values in that row
    ///
    /// A NaN anywhere in the matrix makes the norm NaN.
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for row in self.data.rows() {
            let sum = row.fold(T::zero(), |acc, v| acc + v.abs());
            if sum.is_nan() {
                return sum;
            }
            if sum > max {
                max = sum;
            }
        }
        max
    }

    /// Element-wise comparison with absolute tolerance `tol`
    ///
    /// Matrices of different shapes are never equal.
    pub fn approx_eq(&self, other: &Matrix<T>, tol: T) -> bool {
        self.shape() == other.shape()
            && Zip::from(&self.data)
                .and(&other.data)
                .all(|&a, &b| (a - b).abs() <= tol)
    }
}

impl<T: Scalar> From<Array2<T>> for Matrix<T> {
    fn from(array: Array2<T>) -> Self {
        let data = if array.is_standard_layout() {
            array
        } else {
            array.as_standard_layout().into_owned()
        };
        Self { data }
    }
}

impl<T: Scalar> From<Matrix<T>> for Array2<T> {
    fn from(m: Matrix<T>) -> Self {
        m.data
    }
}

impl<T: Scalar> Index<[usize; 2]> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; 2]) -> &T {
        &self.data[index]
    }
}

impl<T: Scalar> IndexMut<[usize; 2]> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, index: [usize; 2]) -> &mut T {
        &mut self.data[index]
    }
}

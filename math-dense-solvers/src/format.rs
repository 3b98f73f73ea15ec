//! Text rendering of matrices
//!
//! Formatting is a pure function of the matrix and an explicit
//! [`MatrixFormat`]; nothing here keeps global state.
//!
//! ```
//! use math_audio_dense_solvers::{Matrix, MatrixFormat};
//!
//! let m: Matrix = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! assert_eq!(
//!     m.display(MatrixFormat::Nested).to_string(),
//!     "{{1.000000, 2.000000},{3.000000, 4.000000}}\n"
//! );
//! ```

use crate::matrix::Matrix;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a matrix is rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixFormat {
    /// Aligned grid, one row per line, two decimals
    #[default]
    Grid,
    /// Nested braces `{{a, b},{c, d}}` as accepted by computer algebra systems
    Nested,
}

impl FromStr for MatrixFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" | "human" => Ok(MatrixFormat::Grid),
            "nested" | "list" => Ok(MatrixFormat::Nested),
            other => Err(format!(
                "unknown matrix format '{}' (expected 'grid' or 'nested')",
                other
            )),
        }
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixFormat::Grid => f.write_str("grid"),
            MatrixFormat::Nested => f.write_str("nested"),
        }
    }
}

/// Borrowing adapter returned by [`Matrix::display`]
#[derive(Debug, Clone, Copy)]
pub struct MatrixDisplay<'a, T: Scalar> {
    matrix: &'a Matrix<T>,
    format: MatrixFormat,
}

impl<T: Scalar> Matrix<T> {
    /// Render this matrix in the given format
    pub fn display(&self, format: MatrixFormat) -> MatrixDisplay<'_, T> {
        MatrixDisplay {
            matrix: self,
            format,
        }
    }
}

impl<T: Scalar> fmt::Display for MatrixDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        match self.format {
            MatrixFormat::Grid => {
                for r in 0..m.rows() {
                    for v in m.row(r) {
                        write!(f, "{:10.2} ", v)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            MatrixFormat::Nested => {
                f.write_str("{")?;
                for r in 0..m.rows() {
                    f.write_str("{")?;
                    for (c, v) in m.row(r).iter().enumerate() {
                        if c > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{:.6}", v)?;
                    }
                    f.write_str(if r + 1 < m.rows() { "}," } else { "}" })?;
                }
                f.write_str("}\n")
            }
        }
    }
}

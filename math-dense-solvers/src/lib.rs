//! Dense linear system solvers
//!
//! This crate solves `A x = f` for dense real matrices and derives the
//! related quantities from the same elimination machinery.
//!
//! # Features
//!
//! - **Gaussian elimination** with partial or first-non-zero pivoting, using
//!   a logical column permutation instead of physical column swaps
//! - **Determinant**, **inverse** (Gauss-Jordan) and **condition number**
//! - **SOR** (successive over-relaxation) on the normal equations
//! - **Dense matrix** type with row primitives, products and transposition
//! - Plain-text rendering as an aligned grid or as nested braces
//!
//! Every entry point works on copies of its inputs. Numerical singularity is
//! not an error: it shows up as zero determinants and non-finite values.
//!
//! # Example
//!
//! ```
//! use math_audio_dense_solvers::{Matrix, PivotStrategy, determinant, solve};
//!
//! let a: Matrix = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]])?;
//! let f: Matrix = Matrix::column(&[1.0, 2.0])?;
//!
//! let x = solve(&a, &f, PivotStrategy::Partial)?;
//! assert!((x.get(0, 0) - 1.0 / 11.0).abs() < 1e-12);
//! assert!((determinant(&a, PivotStrategy::Partial)? - 11.0).abs() < 1e-12);
//! # Ok::<(), math_audio_dense_solvers::SolverError>(())
//! ```

pub mod config;
pub mod direct;
pub mod error;
pub mod format;
pub mod generate;
pub mod iterative;
pub mod matrix;
pub mod traits;

// Re-export main types
pub use error::{Result, SolverError};
pub use format::{MatrixDisplay, MatrixFormat};
pub use matrix::Matrix;
pub use traits::Scalar;

// Re-export direct solvers
pub use direct::{
    Analysis, AnalysisOptions, ColumnOrder, PivotStrategy, analyze, condition_number,
    determinant, eliminate, inverse, solve,
};

// Re-export iterative solvers
pub use iterative::{SorConfig, SorSolution, sor};

pub use config::{ConfigError, Method, RunConfig};
pub use generate::generated_system;

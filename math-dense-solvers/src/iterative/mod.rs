//! Iterative solvers for linear systems
//!
//! - [`sor`]: successive over-relaxation on the normal equations

mod sor;

pub use sor::{SorConfig, SorSolution, normal_equations, sor};

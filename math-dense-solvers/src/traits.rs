//! Scalar abstraction for the dense solvers
//!
//! The solvers are generic over the floating-point element type through
//! [`Scalar`], implemented for `f64` (the default throughout) and `f32`.

use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display};

/// Trait for real floating-point element types.
///
/// Besides the arithmetic bounds it carries the threshold below which a
/// value counts as numerically zero when choosing pivots.
pub trait Scalar:
    Float + NumAssign + FromPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Values with magnitude strictly below this are treated as zero.
    ///
    /// For `f64` this is `1e-300`: effectively "exactly zero", not a
    /// stability threshold. Ill-conditioned inputs will get tiny pivots
    /// through unchallenged.
    fn zero_tolerance() -> Self;

    /// Check if this value is numerically zero
    #[inline]
    fn is_numerically_zero(self) -> bool {
        self.abs() < Self::zero_tolerance()
    }
}

impl Scalar for f64 {
    #[inline]
    fn zero_tolerance() -> Self {
        1e-300
    }
}

impl Scalar for f32 {
    // 1e-300 underflows in single precision; the smallest normal value
    // keeps the same "exactly zero" meaning.
    #[inline]
    fn zero_tolerance() -> Self {
        f32::MIN_POSITIVE
    }
}

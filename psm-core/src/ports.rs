use crate::models::{Curve, PriceAxis, PricePoint};

/// Interface for strategies that locate the intersection of two curves.
///
/// Implementations receive two curves sampled over the same axis and return
/// the price at which they meet, along with the first curve's percentage at
/// that price. They must be deterministic, must break ties toward the lowest
/// price, and must fail (rather than truncate) on misaligned input.
pub trait Intersector {
    /// A short, stable name for the strategy, suitable for logs and reports
    fn name(&self) -> &'static str;

    /// Estimate where `a` and `b` intersect along `axis`.
    ///
    /// # Errors
    ///
    /// Returns `IntersectionError` if the inputs are empty, differ in length,
    /// or contain non-finite values.
    fn intersect(
        &self,
        a: &Curve,
        b: &Curve,
        axis: &PriceAxis,
    ) -> Result<PricePoint, IntersectionError>;
}

/// Errors that can occur when intersecting two curves
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum IntersectionError {
    /// Error when there are no samples to compare
    #[error("cannot intersect empty curves")]
    Empty,
    /// Error when the curves and axis are not aligned
    #[error("curves of length {a} and {b} do not match an axis of length {axis}")]
    LengthMismatch {
        /// The length of the first curve
        a: usize,
        /// The length of the second curve
        b: usize,
        /// The length of the axis
        axis: usize,
    },
    /// Error when a curve or axis value is NaN or infinite
    #[error("non-finite value at index {0}")]
    NonFinite(usize),
}

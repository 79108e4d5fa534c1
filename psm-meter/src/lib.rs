/**
 * Construction of cumulative percentage curves from raw answers.
 */
mod curves;
pub use curves::{build_curve, build_curves};

/**
 * These are the implementations of the intersection strategies.
 */
mod impls;
pub use impls::*;

/**
 * The end-to-end analysis: axis, curves and the four price points.
 */
mod meter;
pub use meter::*;

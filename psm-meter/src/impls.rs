use psm_core::ports::IntersectionError;

/// Nearest-sample intersection (the default)
pub mod nearest;
pub use nearest::{NearestSample, find_intersection};

/// Linearly interpolated crossing, an opt-in refinement
pub mod linear;
pub use linear::{LinearCrossing, find_crossing};

// Every strategy makes the same promises about its input, so the checks live here.
pub(crate) fn check_aligned(a: &[f64], b: &[f64], axis: &[f64]) -> Result<(), IntersectionError> {
    if a.len() != b.len() || a.len() != axis.len() {
        return Err(IntersectionError::LengthMismatch {
            a: a.len(),
            b: b.len(),
            axis: axis.len(),
        });
    }
    if axis.is_empty() {
        return Err(IntersectionError::Empty);
    }
    if let Some(index) = (0..axis.len())
        .find(|&i| !(a[i].is_finite() && b[i].is_finite() && axis[i].is_finite()))
    {
        return Err(IntersectionError::NonFinite(index));
    }
    Ok(())
}

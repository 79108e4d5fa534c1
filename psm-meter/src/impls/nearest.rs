use super::check_aligned;
use psm_core::{
    models::{Curve, PriceAxis, PricePoint},
    ports::{IntersectionError, Intersector},
};
use tracing::{Level, event};

/// Picks the axis price at which the two curves are closest.
///
/// The estimate is always one of the sampled prices; nothing is interpolated,
/// so its precision is bounded by the axis spacing. When several prices share
/// the minimal distance the lowest one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestSample;

impl Intersector for NearestSample {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn intersect(
        &self,
        a: &Curve,
        b: &Curve,
        axis: &PriceAxis,
    ) -> Result<PricePoint, IntersectionError> {
        find_intersection(a, b, axis)
    }
}

/// Finds the index of minimal `|a[i] - b[i]|` and reports `axis[i]` with `a[i]`.
///
/// This is the slice-level form of [`NearestSample`], usable with curves and
/// axes that did not come from this crate.
///
/// # Errors
///
/// Returns `IntersectionError` if the inputs are empty, differ in length, or
/// contain non-finite values.
pub fn find_intersection(
    a: &[f64],
    b: &[f64],
    axis: &[f64],
) -> Result<PricePoint, IntersectionError> {
    check_aligned(a, b, axis)?;

    let mut best = 0;
    let mut best_gap = (a[0] - b[0]).abs();
    let mut ties = 1;

    for i in 1..axis.len() {
        let gap = (a[i] - b[i]).abs();
        if gap < best_gap {
            best = i;
            best_gap = gap;
            ties = 1;
        } else if gap == best_gap {
            // strictly-less above keeps the first occurrence
            ties += 1;
        }
    }

    if ties > 1 {
        event!(
            Level::DEBUG,
            ties,
            price = axis[best],
            gap = best_gap,
            "ambiguous intersection resolved to the lowest price"
        );
    }

    Ok(PricePoint {
        price: axis[best],
        percent: a[best],
        ties,
    })
}

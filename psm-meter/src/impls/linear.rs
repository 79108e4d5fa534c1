use super::{check_aligned, find_intersection};
use psm_core::{
    models::{Curve, PriceAxis, PricePoint},
    ports::{IntersectionError, Intersector},
};
use tracing::{Level, event};

/// Interpolates the first crossing of the two curves.
///
/// With `d[i] = a[i] - b[i]`, the first price where `d` is exactly zero, or
/// the first pair of neighbouring prices where `d` changes sign, defines the
/// crossing; in the latter case the price and percentage are linearly
/// interpolated between the two samples. Curves that never cross fall back to
/// [`super::NearestSample`].
///
/// This moves every reported price off the sampled axis, so it is never the
/// default.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearCrossing;

impl Intersector for LinearCrossing {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn intersect(
        &self,
        a: &Curve,
        b: &Curve,
        axis: &PriceAxis,
    ) -> Result<PricePoint, IntersectionError> {
        find_crossing(a, b, axis)
    }
}

/// Slice-level form of [`LinearCrossing`]
pub fn find_crossing(
    a: &[f64],
    b: &[f64],
    axis: &[f64],
) -> Result<PricePoint, IntersectionError> {
    check_aligned(a, b, axis)?;

    let mut first = None;
    let mut candidates = 0;

    for i in 0..axis.len() {
        let di = a[i] - b[i];

        if di == 0.0 {
            candidates += 1;
            first.get_or_insert(PricePoint {
                price: axis[i],
                percent: a[i],
                ties: 0,
            });
            continue;
        }

        let j = i + 1;
        if j == axis.len() {
            break;
        }
        let dj = a[j] - b[j];
        if dj != 0.0 && (di < 0.0) != (dj < 0.0) {
            candidates += 1;
            let t = di / (di - dj);
            first.get_or_insert(PricePoint {
                price: axis[i] + t * (axis[j] - axis[i]),
                percent: a[i] + t * (a[j] - a[i]),
                ties: 0,
            });
        }
    }

    let Some(mut point) = first else {
        event!(
            Level::DEBUG,
            "curves do not cross, falling back to the nearest sample"
        );
        return find_intersection(a, b, axis);
    };

    point.ties = candidates;
    if candidates > 1 {
        event!(
            Level::DEBUG,
            candidates,
            price = point.price,
            "curves cross more than once, keeping the lowest crossing"
        );
    }
    Ok(point)
}

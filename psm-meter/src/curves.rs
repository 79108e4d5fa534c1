use psm_core::models::{Curve, CurveError, CurveSet, Direction, PriceAxis, Question, ResponseSet};

/// Builds the cumulative percentage curve of `values` over `axis`.
///
/// For every axis price `p` the result holds
/// - ascending: `100 * count(v <= p) / count(values)`
/// - descending: `100 * count(v >= p) / count(values)`
///
/// so the curve is 0 below the smallest value and 100 from the largest value
/// on (ascending), or 100 up to the smallest value and 0 beyond the largest
/// (descending).
///
/// The counts come from binary searches over a sorted copy of `values`, which
/// gives exactly the same integers as comparing every value with every price.
///
/// # Errors
///
/// Returns `CurveError::Empty` if `values` is empty and
/// `CurveError::NonFinite` if any value is NaN or infinite.
pub fn build_curve(
    values: &[f64],
    axis: &PriceAxis,
    direction: Direction,
) -> Result<Curve, CurveError> {
    if values.is_empty() {
        return Err(CurveError::Empty);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CurveError::NonFinite);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let total = sorted.len() as f64;

    let percentages = axis
        .iter()
        .map(|&price| {
            let count = match direction {
                Direction::Ascending => sorted.partition_point(|&v| v <= price),
                Direction::Descending => sorted.len() - sorted.partition_point(|&v| v < price),
            };
            100.0 * count as f64 / total
        })
        .collect();

    Curve::new(direction, percentages)
}

/// Builds all four curves of a response set over a shared axis,
/// each in its question's direction
pub fn build_curves(responses: &ResponseSet, axis: &PriceAxis) -> Result<CurveSet, CurveError> {
    let build = |question: Question| {
        build_curve(responses.responses(question), axis, question.direction())
    };

    Ok(CurveSet {
        too_cheap: build(Question::TooCheap)?,
        cheap: build(Question::Cheap)?,
        expensive: build(Question::Expensive)?,
        too_expensive: build(Question::TooExpensive)?,
    })
}

use super::{Direction, Question};

/// A cumulative percentage curve sampled over a [`super::PriceAxis`].
///
/// Each value is the percentage of respondents (in `[0, 100]`) whose answer
/// is at or below (ascending) or at or above (descending) the corresponding
/// axis price. A curve is immutable once built, and always:
/// - non-empty,
/// - finite and within `[0, 100]`,
/// - non-decreasing if ascending, non-increasing if descending.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Curve {
    direction: Direction,
    values: Vec<f64>,
}

impl Curve {
    /// Creates a curve from its sampled percentages, validating all constraints
    pub fn new(direction: Direction, values: Vec<f64>) -> Result<Self, CurveError> {
        if values.is_empty() {
            return Err(CurveError::Empty);
        }

        for value in values.iter() {
            if !value.is_finite() {
                return Err(CurveError::NonFinite);
            }
            if !(0.0..=100.0).contains(value) {
                return Err(CurveError::OutOfRange(*value));
            }
        }

        let monotone = match direction {
            Direction::Ascending => values.windows(2).all(|w| w[0] <= w[1]),
            Direction::Descending => values.windows(2).all(|w| w[0] >= w[1]),
        };
        if !monotone {
            return Err(CurveError::NonMonotone(direction));
        }

        Ok(Self { direction, values })
    }

    /// The accumulation direction of the curve
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The sampled percentages, one per axis price
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated curve; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::ops::Deref for Curve {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

/// The four curves of one survey, sampled over a shared axis
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurveSet {
    /// Share of respondents who find a price too cheap (ascending)
    pub too_cheap: Curve,
    /// Share of respondents who find a price cheap (ascending)
    pub cheap: Curve,
    /// Share of respondents who find a price expensive (descending)
    pub expensive: Curve,
    /// Share of respondents who find a price too expensive (descending)
    pub too_expensive: Curve,
}

impl CurveSet {
    /// The curve built for a given question
    pub fn get(&self, question: Question) -> &Curve {
        match question {
            Question::TooCheap => &self.too_cheap,
            Question::Cheap => &self.cheap,
            Question::Expensive => &self.expensive,
            Question::TooExpensive => &self.too_expensive,
        }
    }
}

/// Errors that can occur when creating or validating a Curve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Error when there is nothing to build the curve from, or no samples
    #[error("curve has no samples")]
    Empty,
    /// Error when a value is NaN or infinite
    #[error("curve contains a non-finite value")]
    NonFinite,
    /// Error when a percentage falls outside [0, 100]
    #[error("percentage {0} is outside [0, 100]")]
    OutOfRange(f64),
    /// Error when the samples contradict the curve's direction
    #[error("samples are not monotone in the {0:?} direction")]
    NonMonotone(Direction),
}

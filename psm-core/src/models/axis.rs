use super::ResponseSet;

/// The shared price axis over which all four curves are sampled.
///
/// A valid axis is non-empty, finite and strictly increasing. It is built
/// from a [`ResponseSet`] according to an [`AxisStrategy`], or supplied
/// directly by the caller through [`PriceAxis::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(transparent))]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PriceAxis(Vec<f64>);

impl PriceAxis {
    /// Creates an axis from explicit prices, validating all constraints
    pub fn new(prices: Vec<f64>) -> Result<Self, AxisError> {
        if prices.is_empty() {
            return Err(AxisError::Empty);
        }

        if prices.iter().any(|p| !p.is_finite()) {
            return Err(AxisError::NonFinite);
        }

        if let Some(index) = prices.windows(2).position(|w| w[0] >= w[1]) {
            return Err(AxisError::NotIncreasing { index: index + 1 });
        }

        Ok(Self(prices))
    }

    /// Builds the axis for `responses` using the given strategy
    pub fn build(strategy: AxisStrategy, responses: &ResponseSet) -> Result<Self, AxisError> {
        match strategy {
            AxisStrategy::Observed => Ok(Self::observed(responses)),
            AxisStrategy::Grid { points } => Self::grid(responses, points),
        }
    }

    /// The sorted set of every distinct answer across all four questions.
    ///
    /// This reproduces the empirical distributions exactly, but on small
    /// surveys the resulting intersections can be coarse.
    pub fn observed(responses: &ResponseSet) -> Self {
        let mut prices = responses
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .collect::<Vec<f64>>();
        // ResponseSet guarantees finite values, so total_cmp agrees with <
        prices.sort_unstable_by(f64::total_cmp);
        prices.dedup();
        Self(prices)
    }

    /// `points` evenly spaced prices from the smallest to the largest answer,
    /// both endpoints included.
    ///
    /// If every answer is the same price the grid collapses to that single
    /// price. Otherwise at least two points are required.
    pub fn grid(responses: &ResponseSet, points: usize) -> Result<Self, AxisError> {
        let (lo, hi) = responses.bounds();
        if lo == hi {
            return Ok(Self(vec![lo]));
        }
        Self::linspace(lo, hi, points)
    }

    /// `points` evenly spaced prices over `[lo, hi]`, endpoints included
    pub fn linspace(lo: f64, hi: f64, points: usize) -> Result<Self, AxisError> {
        if points < 2 {
            return Err(AxisError::TooFewGridPoints(points));
        }
        if points > AxisStrategy::MAX_GRID_POINTS {
            return Err(AxisError::TooManyGridPoints {
                points,
                max: AxisStrategy::MAX_GRID_POINTS,
            });
        }

        let span = hi - lo;
        let last = points - 1;
        // Scale the fraction, not the index, so huge spans cannot overflow
        let mut prices = (0..points)
            .map(|i| (lo + span * (i as f64 / last as f64)).min(hi))
            .collect::<Vec<f64>>();
        // Pin the upper endpoint so the grid always covers the largest answer
        prices[last] = hi;

        // Extremely dense grids over tiny ranges can round adjacent points together
        prices.dedup();
        Self::new(prices)
    }

    /// The prices of the axis, in increasing order
    pub fn prices(&self) -> &[f64] {
        &self.0
    }

    /// The number of prices on the axis
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated axis; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The lowest and highest price on the axis
    pub fn domain(&self) -> (f64, f64) {
        (self.0[0], self.0[self.0.len() - 1])
    }
}

impl std::ops::Deref for PriceAxis {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for PriceAxis {
    type Error = AxisError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How the shared price axis is constructed from the observed answers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum AxisStrategy {
    /// Every distinct observed answer (exact empirical axis)
    Observed,
    /// A uniform grid between the smallest and largest observed answer
    Grid {
        /// The number of grid points, endpoints included
        points: usize,
    },
}

impl AxisStrategy {
    /// The grid density used when none is configured
    pub const DEFAULT_GRID_POINTS: usize = 500;

    /// The densest grid that will be built. Far beyond any survey's
    /// resolution, it bounds the memory a single axis can take.
    pub const MAX_GRID_POINTS: usize = 1_000_000;
}

impl Default for AxisStrategy {
    fn default() -> Self {
        Self::Grid {
            points: Self::DEFAULT_GRID_POINTS,
        }
    }
}

/// Errors that can occur when creating or validating a PriceAxis
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AxisError {
    /// Error when no prices are provided
    #[error("price axis is empty")]
    Empty,
    /// Error when a price is NaN or infinite
    #[error("price axis contains a non-finite value")]
    NonFinite,
    /// Error when the prices are not strictly increasing
    #[error("price axis is not strictly increasing at index {index}")]
    NotIncreasing {
        /// The first index whose price does not exceed its predecessor
        index: usize,
    },
    /// Error when a grid is requested with fewer than two points
    #[error("a grid axis needs at least 2 points, got {0}")]
    TooFewGridPoints(usize),
    /// Error when a grid is requested with more points than can be built
    #[error("a grid axis takes at most {max} points, got {points}")]
    TooManyGridPoints {
        /// The requested number of points
        points: usize,
        /// [`AxisStrategy::MAX_GRID_POINTS`]
        max: usize,
    },
}

use std::fmt;

/// The estimated intersection of two curves
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// The price at which the curves meet
    pub price: f64,
    /// The percentage of the first curve at `price`
    pub percent: f64,
    /// How many candidate positions qualified as the intersection.
    ///
    /// A value above 1 means the curves were equally close (or crossed) at
    /// several prices and the lowest one was chosen.
    pub ties: usize,
}

impl PricePoint {
    /// Whether the intersection had to be disambiguated
    pub fn is_ambiguous(&self) -> bool {
        self.ties > 1
    }
}

/// The four canonical Van Westendorp price points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PriceMetric {
    /// Indifference Price Point
    Ipp,
    /// Optimal Price Point
    Opp,
    /// Point of Marginal Cheapness
    Pmc,
    /// Point of Marginal Expensiveness
    Pme,
}

impl PriceMetric {
    /// All metrics, in reporting order
    pub const ALL: [PriceMetric; 4] = [
        PriceMetric::Ipp,
        PriceMetric::Opp,
        PriceMetric::Pmc,
        PriceMetric::Pme,
    ];
}

impl fmt::Display for PriceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (match self {
            Self::Ipp => "IPP",
            Self::Opp => "OPP",
            Self::Pmc => "PMC",
            Self::Pme => "PME",
        })
        .fmt(f)
    }
}

/// The price points derived from one survey
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoints {
    /// Indifference Price Point: cheap meets expensive
    pub ipp: PricePoint,
    /// Optimal Price Point: too cheap meets too expensive
    pub opp: PricePoint,
    /// Point of Marginal Cheapness: lower bound of the acceptable range
    pub pmc: PricePoint,
    /// Point of Marginal Expensiveness: upper bound of the acceptable range
    pub pme: PricePoint,
}

impl PricePoints {
    /// The price point for a given metric
    pub fn get(&self, metric: PriceMetric) -> &PricePoint {
        match metric {
            PriceMetric::Ipp => &self.ipp,
            PriceMetric::Opp => &self.opp,
            PriceMetric::Pmc => &self.pmc,
            PriceMetric::Pme => &self.pme,
        }
    }

    /// The acceptable price range, `(PMC, PME)`.
    ///
    /// Returned as-is: on unusual data the PMC may exceed the PME.
    pub fn acceptable_range(&self) -> (f64, f64) {
        (self.pmc.price, self.pme.price)
    }
}

use super::{PriceMetric, Question};

/// Which curve pairs define the marginal cheapness and expensiveness points.
///
/// Both readings of the method are in common use and they generally yield
/// different prices, so the choice is always explicit and is reported
/// alongside the results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Pairing {
    /// PMC = (too cheap, cheap), PME = (expensive, too expensive)
    #[default]
    Adjacent,
    /// PMC = (too cheap, expensive), PME = (cheap, too expensive)
    Crossed,
}

impl Pairing {
    /// The pair of curves whose intersection defines `metric`
    pub fn curves(self, metric: PriceMetric) -> (Question, Question) {
        use Question::*;
        match (metric, self) {
            (PriceMetric::Ipp, _) => (Cheap, Expensive),
            (PriceMetric::Opp, _) => (TooCheap, TooExpensive),
            (PriceMetric::Pmc, Pairing::Adjacent) => (TooCheap, Cheap),
            (PriceMetric::Pme, Pairing::Adjacent) => (Expensive, TooExpensive),
            (PriceMetric::Pmc, Pairing::Crossed) => (TooCheap, Expensive),
            (PriceMetric::Pme, Pairing::Crossed) => (Cheap, TooExpensive),
        }
    }
}

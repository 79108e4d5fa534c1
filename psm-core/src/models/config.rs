use super::{AxisStrategy, Pairing};

/// The knobs of a price sensitivity analysis.
///
/// Neither setting changes the curve or intersection algorithms themselves,
/// but both change the reported prices, so they are recorded with every result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeterConfig {
    /// How the shared price axis is constructed
    #[cfg_attr(feature = "serde", serde(default))]
    pub axis: AxisStrategy,
    /// Which curve pairs define PMC and PME
    #[cfg_attr(feature = "serde", serde(default))]
    pub pairing: Pairing,
}

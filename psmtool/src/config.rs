//! Analysis settings for `psmtool analyze`.
//!
//! Each setting is resolved from the defaults, a TOML file, `PSM_*`
//! environment variables and the command line, later layers winning.

use crate::CliError;
use clap::{Args, ValueEnum};
use psm_core::models::{AxisStrategy, MeterConfig, Pairing};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct AppConfig {
    /// Axis construction and PMC/PME pairing
    #[serde(default)]
    pub meter: MeterConfig,

    /// The intersection strategy
    #[serde(default)]
    pub intersection: IntersectionMethod,

    /// What goes into the report
    #[serde(default)]
    pub report: ReportConfig,
}

/// The available intersection strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionMethod {
    /// The sampled price at which the curves are closest
    #[default]
    Nearest,
    /// The linearly interpolated first crossing
    Linear,
}

/// Report contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ReportConfig {
    /// Include the price axis and the four curves, e.g. for plotting
    #[serde(default)]
    pub include_curves: bool,
}

impl AppConfig {
    /// Resolves the analysis settings from, lowest priority first:
    /// 1. The built-in defaults
    /// 2. The `--config` TOML file, if one was given
    /// 3. `PSM_<SECTION>__<KEY>` environment variables
    ///
    /// Command-line flags are applied afterwards by [`AppConfig::with_overrides`].
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Sample every distinct answer instead of a uniform grid
    /// export PSM_METER__AXIS__KIND="observed"
    ///
    /// # Use the alternative PMC/PME pairing
    /// export PSM_METER__PAIRING="crossed"
    ///
    /// # Always include the curves in the report
    /// export PSM_REPORT__INCLUDE_CURVES=true
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    // PSM_METER__AXIS__POINTS lands on meter.axis.points
    fn environment() -> config::Environment {
        config::Environment::with_prefix("PSM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
        let mut layers =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "configuration file {} not found",
                    path.display()
                ));
            }
            layers = layers.add_source(config::File::from(path));
        }

        layers
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Apply explicit command-line flags on top of the loaded configuration
    pub fn with_overrides(mut self, flags: &MeterArgs) -> Result<Self, CliError> {
        match (flags.axis, flags.grid_points) {
            (Some(AxisKind::Observed), Some(_)) => return Err(CliError::GridPointsWithObserved),
            (Some(AxisKind::Observed), None) => self.meter.axis = AxisStrategy::Observed,
            (Some(AxisKind::Grid), points) | (None, points @ Some(_)) => {
                let points = points.unwrap_or(match self.meter.axis {
                    AxisStrategy::Grid { points } => points,
                    AxisStrategy::Observed => AxisStrategy::DEFAULT_GRID_POINTS,
                });
                self.meter.axis = AxisStrategy::Grid { points };
            }
            (None, None) => {}
        }

        if let Some(pairing) = flags.pairing {
            self.meter.pairing = pairing.into();
        }
        if let Some(intersection) = flags.intersection {
            self.intersection = intersection;
        }
        if flags.curves {
            self.report.include_curves = true;
        }

        Ok(self)
    }
}

/// Command-line flags that override the loaded configuration
#[derive(Args, Debug, Default)]
pub struct MeterArgs {
    /// How to build the price axis
    #[arg(long)]
    pub axis: Option<AxisKind>,

    /// The number of points of a grid axis (implies --axis grid)
    #[arg(long)]
    pub grid_points: Option<usize>,

    /// Which curve pairs define PMC and PME
    #[arg(long)]
    pub pairing: Option<PairingFlag>,

    /// How to locate curve intersections
    #[arg(long)]
    pub intersection: Option<IntersectionMethod>,

    /// Include the price axis and curves in the report
    #[arg(long)]
    pub curves: bool,
}

// `psm-core` knows nothing of clap, so the flags get their own enums.

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum AxisKind {
    /// Every distinct observed answer
    Observed,
    /// A uniform grid between the smallest and largest answer
    Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum PairingFlag {
    /// PMC = (too cheap, cheap), PME = (expensive, too expensive)
    Adjacent,
    /// PMC = (too cheap, expensive), PME = (cheap, too expensive)
    Crossed,
}

impl From<PairingFlag> for Pairing {
    fn from(value: PairingFlag) -> Self {
        match value {
            PairingFlag::Adjacent => Pairing::Adjacent,
            PairingFlag::Crossed => Pairing::Crossed,
        }
    }
}

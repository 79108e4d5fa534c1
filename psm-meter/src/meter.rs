use crate::{NearestSample, build_curves};
use psm_core::{
    models::{
        AxisError, CurveError, CurveSet, MeterConfig, Pairing, PriceAxis, PriceMetric,
        PricePoints, ResponseSet,
    },
    ports::{IntersectionError, Intersector},
};
use tracing::{Level, event, span};

/// Runs a full Van Westendorp analysis of one set of survey responses.
///
/// The meter builds the shared price axis, the four cumulative curves, and
/// reads the IPP, OPP, PMC and PME off the curve intersections using the
/// configured [`Intersector`]. It holds no state between analyses, so a
/// single meter can be shared across threads and reused for any number of
/// products.
#[derive(Clone, Debug, Default)]
pub struct PriceSensitivityMeter<I = NearestSample> {
    config: MeterConfig,
    intersector: I,
}

/// The outcome of analysing one set of survey responses
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Analysis {
    /// The number of respondents
    pub respondents: usize,
    /// Respondents whose answers were not ordered too cheap <= cheap <= expensive <= too expensive
    pub inconsistent_respondents: usize,
    /// The pairing used for PMC and PME
    pub pairing: Pairing,
    /// The shared price axis
    pub axis: PriceAxis,
    /// The four cumulative curves over `axis`
    pub curves: CurveSet,
    /// The derived price points
    pub points: PricePoints,
}

impl<I: Intersector> PriceSensitivityMeter<I> {
    /// Create a meter with the given configuration and intersection strategy
    pub fn new(config: MeterConfig, intersector: I) -> Self {
        Self {
            config,
            intersector,
        }
    }

    /// The configuration this meter analyses with
    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// The intersection strategy this meter analyses with
    pub fn intersector(&self) -> &I {
        &self.intersector
    }

    /// Analyse `responses` over an axis built from the configured strategy
    pub fn analyze(&self, responses: &ResponseSet) -> Result<Analysis, MeterError> {
        let axis = PriceAxis::build(self.config.axis, responses)?;
        self.analyze_with_axis(responses, axis)
    }

    /// Analyse `responses` over a caller-supplied axis.
    ///
    /// The axis must span every answer, otherwise the curves would not reach
    /// their 0% and 100% plateaus and the intersections would be clipped.
    pub fn analyze_with_axis(
        &self,
        responses: &ResponseSet,
        axis: PriceAxis,
    ) -> Result<Analysis, MeterError> {
        let span = span!(
            Level::INFO,
            "analyze",
            respondents = responses.len(),
            axis = axis.len(),
            intersector = self.intersector.name()
        );
        let _guard = span.enter();

        let (lo, hi) = responses.bounds();
        let (start, end) = axis.domain();
        if start > lo || end < hi {
            return Err(MeterError::AxisCoverage {
                axis: (start, end),
                responses: (lo, hi),
            });
        }

        let inconsistent_respondents = responses.inconsistent_respondents();
        if inconsistent_respondents > 0 {
            event!(
                Level::WARN,
                inconsistent_respondents,
                "some respondents did not answer in increasing price order"
            );
        }

        let curves = build_curves(responses, &axis)?;

        let intersect = |metric: PriceMetric| {
            let (a, b) = self.config.pairing.curves(metric);
            self.intersector
                .intersect(curves.get(a), curves.get(b), &axis)
                .map_err(|source| MeterError::Intersection { metric, source })
        };

        let points = PricePoints {
            ipp: intersect(PriceMetric::Ipp)?,
            opp: intersect(PriceMetric::Opp)?,
            pmc: intersect(PriceMetric::Pmc)?,
            pme: intersect(PriceMetric::Pme)?,
        };

        for metric in PriceMetric::ALL {
            let point = points.get(metric);
            if point.is_ambiguous() {
                event!(
                    Level::DEBUG,
                    %metric,
                    price = point.price,
                    ties = point.ties,
                    "several prices are equally close, reporting the lowest"
                );
            }
        }

        event!(
            Level::INFO,
            ipp = points.ipp.price,
            opp = points.opp.price,
            pmc = points.pmc.price,
            pme = points.pme.price,
            "price points computed"
        );

        Ok(Analysis {
            respondents: responses.len(),
            inconsistent_respondents,
            pairing: self.config.pairing,
            axis,
            curves,
            points,
        })
    }
}

/// Errors that can occur during an analysis
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MeterError {
    /// The price axis could not be built
    #[error("invalid price axis: {0}")]
    Axis(#[from] AxisError),
    /// A supplied axis does not span the observed answers
    #[error("axis {axis:?} does not span the answers {responses:?}")]
    AxisCoverage {
        /// The axis domain
        axis: (f64, f64),
        /// The smallest and largest answer
        responses: (f64, f64),
    },
    /// A curve could not be built
    #[error("invalid curve: {0}")]
    Curve(#[from] CurveError),
    /// A price point could not be located
    #[error("unable to locate {metric}: {source}")]
    Intersection {
        /// The price point being computed
        metric: PriceMetric,
        /// The underlying failure
        source: IntersectionError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearCrossing;
    use psm_core::models::AxisStrategy;

    fn responses() -> ResponseSet {
        ResponseSet::new(
            vec![2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0],
            vec![8.0, 9.0, 10.0],
            vec![11.0, 12.0, 13.0],
        )
        .unwrap()
    }

    #[test]
    fn test_default_meter() {
        let meter: PriceSensitivityMeter = PriceSensitivityMeter::default();
        assert_eq!(meter.config(), &MeterConfig::default());
        assert_eq!(meter.intersector().name(), "nearest");

        let analysis = meter.analyze(&responses()).unwrap();
        assert_eq!(analysis.respondents, 3);
        assert_eq!(analysis.axis.len(), AxisStrategy::DEFAULT_GRID_POINTS);
        assert_eq!(analysis.curves.cheap.len(), analysis.axis.len());
    }

    #[test]
    fn test_axis_must_cover_answers() {
        let meter: PriceSensitivityMeter = PriceSensitivityMeter::default();
        let axis = PriceAxis::new(vec![2.0, 5.0, 10.0]).unwrap();
        assert_eq!(
            meter.analyze_with_axis(&responses(), axis).unwrap_err(),
            MeterError::AxisCoverage {
                axis: (2.0, 10.0),
                responses: (2.0, 13.0),
            }
        );
    }

    #[test]
    fn test_grid_axis_errors_propagate() {
        let config = MeterConfig {
            axis: AxisStrategy::Grid { points: 0 },
            ..Default::default()
        };
        let meter = PriceSensitivityMeter::new(config, LinearCrossing);
        assert_eq!(
            meter.analyze(&responses()).unwrap_err(),
            MeterError::Axis(AxisError::TooFewGridPoints(0))
        );
    }

    #[test]
    fn test_every_metric_is_located() {
        let meter: PriceSensitivityMeter = PriceSensitivityMeter::default();
        let analysis = meter.analyze(&responses()).unwrap();
        let (lo, hi) = analysis.axis.domain();
        for metric in PriceMetric::ALL {
            let point = analysis.points.get(metric);
            assert!(point.ties >= 1, "{metric}");
            assert!((lo..=hi).contains(&point.price), "{metric}");
        }
    }

    #[test]
    fn test_oversized_grid_is_an_error() {
        let config = MeterConfig {
            axis: AxisStrategy::Grid { points: usize::MAX },
            ..Default::default()
        };
        let meter = PriceSensitivityMeter::new(config, NearestSample);
        assert!(matches!(
            meter.analyze(&responses()).unwrap_err(),
            MeterError::Axis(AxisError::TooManyGridPoints { .. })
        ));
    }

    #[test]
    fn test_pairing_is_reported() {
        let config = MeterConfig {
            axis: AxisStrategy::Observed,
            pairing: Pairing::Crossed,
        };
        let analysis = PriceSensitivityMeter::new(config, NearestSample)
            .analyze(&responses())
            .unwrap();
        assert_eq!(analysis.pairing, Pairing::Crossed);
    }
}

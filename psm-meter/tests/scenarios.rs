use approx::assert_relative_eq;
use psm_core::{
    models::{
        AxisError, AxisStrategy, Curve, MeterConfig, Pairing, PriceAxis, PricePoint, ResponseSet,
        ResponseSetError,
    },
    ports::{IntersectionError, Intersector},
};
use psm_meter::{PriceSensitivityMeter, build_curves, find_intersection};
use rstest::*;
use rstest_reuse::{self, *};

use all_intersectors::all_intersectors;

#[fixture]
pub fn survey() -> ResponseSet {
    ResponseSet::new(
        vec![2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0],
        vec![8.0, 9.0, 10.0],
        vec![11.0, 12.0, 13.0],
    )
    .unwrap()
}

fn observed() -> MeterConfig {
    MeterConfig {
        axis: AxisStrategy::Observed,
        pairing: Pairing::Adjacent,
    }
}

// Look up a curve's value at a price that is known to be on the axis
fn at(curve: &Curve, axis: &PriceAxis, price: f64) -> f64 {
    let index = axis.iter().position(|&p| p == price).unwrap();
    curve[index]
}

#[rstest]
fn curves_match_hand_computed_values(survey: ResponseSet) {
    let axis = PriceAxis::new((2..=13).map(f64::from).collect()).unwrap();
    assert_eq!(axis, PriceAxis::observed(&survey));

    let curves = build_curves(&survey, &axis).unwrap();
    let third = 100.0 / 3.0;

    assert_relative_eq!(at(&curves.too_cheap, &axis, 2.0), third);
    assert_relative_eq!(at(&curves.too_cheap, &axis, 4.0), 100.0);

    assert_relative_eq!(at(&curves.cheap, &axis, 4.0), 0.0);
    assert_relative_eq!(at(&curves.cheap, &axis, 5.0), third);
    assert_relative_eq!(at(&curves.cheap, &axis, 7.0), 100.0);

    assert_relative_eq!(at(&curves.expensive, &axis, 8.0), 100.0);
    assert_relative_eq!(at(&curves.expensive, &axis, 10.0), third);
    assert_relative_eq!(at(&curves.expensive, &axis, 11.0), 0.0);

    assert_relative_eq!(at(&curves.too_expensive, &axis, 11.0), 100.0);
    assert_relative_eq!(at(&curves.too_expensive, &axis, 13.0), third);
}

#[apply(all_intersectors)]
#[rstest]
fn adjacent_points_on_observed_axis(intersector: impl Intersector, survey: ResponseSet) {
    let analysis = PriceSensitivityMeter::new(observed(), intersector)
        .analyze(&survey)
        .unwrap();
    let points = analysis.points;

    // cheap and expensive are both at 100% on [7, 8]
    assert_eq!((points.ipp.price, points.ipp.ties), (7.0, 2));
    // too cheap and too expensive are both at 100% on [4, 11]
    assert_eq!((points.opp.price, points.opp.ties), (4.0, 8));
    // too cheap and cheap are both at 100% from 7 onwards
    assert_eq!((points.pmc.price, points.pmc.ties), (7.0, 7));
    // expensive and too expensive are both at 100% up to 8
    assert_eq!((points.pme.price, points.pme.ties), (2.0, 7));

    assert_eq!(points.acceptable_range(), (7.0, 2.0));
}

#[apply(all_intersectors)]
#[rstest]
fn crossed_points_on_observed_axis(intersector: impl Intersector, survey: ResponseSet) {
    let config = MeterConfig {
        pairing: Pairing::Crossed,
        ..observed()
    };
    let analysis = PriceSensitivityMeter::new(config, intersector)
        .analyze(&survey)
        .unwrap();
    let points = analysis.points;

    // IPP and OPP do not depend on the pairing
    assert_eq!(points.ipp.price, 7.0);
    assert_eq!(points.opp.price, 4.0);

    assert_eq!((points.pmc.price, points.pmc.ties), (4.0, 5));
    assert_eq!((points.pme.price, points.pme.ties), (7.0, 5));
    assert_eq!(points.acceptable_range(), (4.0, 7.0));
}

#[apply(all_intersectors)]
#[rstest]
fn ipp_within_cheap_and_expensive_on_grid(intersector: impl Intersector, survey: ResponseSet) {
    let analysis = PriceSensitivityMeter::new(MeterConfig::default(), intersector)
        .analyze(&survey)
        .unwrap();

    assert_eq!(analysis.axis.len(), 500);
    assert_eq!(analysis.axis.domain(), (2.0, 13.0));

    let ipp = analysis.points.ipp.price;
    assert!((5.0..=10.0).contains(&ipp), "IPP {ipp} outside [5, 10]");
    assert_relative_eq!(analysis.points.ipp.percent, 100.0);
}

#[rstest]
fn single_respondent_steps() {
    let responses = ResponseSet::from_rows([[2.0, 3.0, 4.0, 5.0]]).unwrap();
    let axis = PriceAxis::observed(&responses);
    let curves = build_curves(&responses, &axis).unwrap();

    assert_eq!(curves.too_cheap.values(), &[100.0, 100.0, 100.0, 100.0]);
    assert_eq!(curves.cheap.values(), &[0.0, 100.0, 100.0, 100.0]);
    assert_eq!(curves.expensive.values(), &[100.0, 100.0, 100.0, 0.0]);
    assert_eq!(curves.too_expensive.values(), &[100.0, 100.0, 100.0, 100.0]);
}

#[apply(all_intersectors)]
#[rstest]
fn single_price_degenerates(
    intersector: impl Intersector,
    #[values(AxisStrategy::Observed, AxisStrategy::Grid { points: 500 })] axis: AxisStrategy,
) {
    let responses = ResponseSet::from_rows([[5.0, 5.0, 5.0, 5.0]]).unwrap();
    let config = MeterConfig {
        axis,
        ..Default::default()
    };
    let analysis = PriceSensitivityMeter::new(config, intersector)
        .analyze(&responses)
        .unwrap();

    assert_eq!(analysis.axis.prices(), &[5.0]);
    for point in [
        analysis.points.ipp,
        analysis.points.opp,
        analysis.points.pmc,
        analysis.points.pme,
    ] {
        assert_eq!(
            point,
            PricePoint {
                price: 5.0,
                percent: 100.0,
                ties: 1
            }
        );
    }
}

#[apply(all_intersectors)]
#[rstest]
fn analysis_is_repeatable(intersector: impl Intersector, survey: ResponseSet) {
    let meter = PriceSensitivityMeter::new(MeterConfig::default(), intersector);
    let first = meter.analyze(&survey).unwrap();
    let second = meter.analyze(&survey).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_inputs_are_rejected() {
    assert_eq!(
        ResponseSet::from_rows(std::iter::empty()).unwrap_err(),
        ResponseSetError::Empty
    );
    assert_eq!(PriceAxis::new(vec![]).unwrap_err(), AxisError::Empty);
    assert_eq!(
        find_intersection(&[], &[], &[]).unwrap_err(),
        IntersectionError::Empty
    );
}

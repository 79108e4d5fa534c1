//! Property-based checks of the curve and intersection contracts.

use psm_core::models::{Direction, PriceAxis};
use psm_meter::{build_curve, find_crossing, find_intersection};
use proptest::prelude::*;

fn answers_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1000.0, 1..64)
}

fn axis_strategy() -> impl Strategy<Value = PriceAxis> {
    (0.0f64..500.0, 1.0f64..500.0, 2usize..200)
        .prop_map(|(lo, width, points)| PriceAxis::linspace(lo, lo + width, points).unwrap())
}

// The exact empirical axis of a set of answers
fn observed_axis(values: &[f64]) -> PriceAxis {
    let mut prices = values.to_vec();
    prices.sort_unstable_by(f64::total_cmp);
    prices.dedup();
    PriceAxis::new(prices).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ascending_curves_never_decrease(values in answers_strategy(), axis in axis_strategy()) {
        let curve = build_curve(&values, &axis, Direction::Ascending).unwrap();
        prop_assert_eq!(curve.len(), axis.len());
        prop_assert!(curve.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(curve.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn descending_curves_never_increase(values in answers_strategy(), axis in axis_strategy()) {
        let curve = build_curve(&values, &axis, Direction::Descending).unwrap();
        prop_assert_eq!(curve.len(), axis.len());
        prop_assert!(curve.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(curve.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn curves_saturate_at_the_extremes(values in answers_strategy()) {
        let axis = observed_axis(&values);
        let up = build_curve(&values, &axis, Direction::Ascending).unwrap();
        let down = build_curve(&values, &axis, Direction::Descending).unwrap();
        prop_assert_eq!(up[up.len() - 1], 100.0);
        prop_assert_eq!(down[0], 100.0);
    }

    #[test]
    fn curves_match_the_naive_definition(values in answers_strategy(), axis in axis_strategy()) {
        let curve = build_curve(&values, &axis, Direction::Ascending).unwrap();
        for (price, value) in axis.iter().zip(curve.iter()) {
            let count = values.iter().filter(|&&v| v <= *price).count();
            prop_assert_eq!(*value, 100.0 * count as f64 / values.len() as f64);
        }
    }

    #[test]
    fn curves_are_bit_identical_on_rebuild(values in answers_strategy(), axis in axis_strategy()) {
        let a = build_curve(&values, &axis, Direction::Descending).unwrap();
        let b = build_curve(&values, &axis, Direction::Descending).unwrap();
        prop_assert!(a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn intersections_are_symmetric_in_price(
        a in answers_strategy(),
        b in answers_strategy(),
        axis in axis_strategy(),
    ) {
        let a = build_curve(&a, &axis, Direction::Ascending).unwrap();
        let b = build_curve(&b, &axis, Direction::Descending).unwrap();

        let ab = find_intersection(&a, &b, &axis).unwrap();
        let ba = find_intersection(&b, &a, &axis).unwrap();
        prop_assert_eq!(ab.price, ba.price);
        prop_assert_eq!(ab.ties, ba.ties);

        let ab = find_crossing(&a, &b, &axis).unwrap();
        let ba = find_crossing(&b, &a, &axis).unwrap();
        prop_assert_eq!(ab.price, ba.price);
    }

    #[test]
    fn nearest_sample_picks_the_first_minimum(
        a in answers_strategy(),
        b in answers_strategy(),
        axis in axis_strategy(),
    ) {
        let a = build_curve(&a, &axis, Direction::Ascending).unwrap();
        let b = build_curve(&b, &axis, Direction::Descending).unwrap();
        let point = find_intersection(&a, &b, &axis).unwrap();

        let gaps = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).collect::<Vec<_>>();
        let best = gaps.iter().copied().fold(f64::INFINITY, f64::min);
        let first = gaps.iter().position(|&g| g == best).unwrap();

        prop_assert_eq!(point.price, axis[first]);
        prop_assert_eq!(point.percent, a[first]);
        prop_assert_eq!(point.ties, gaps.iter().filter(|&&g| g == best).count());
    }
}

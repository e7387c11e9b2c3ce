use series_geom::core::spline::{
    SplineType, bezier_control_points, compute, monotonic_coefficients,
    natural_spline_coefficients,
};
use series_geom::core::ChartPoint;

#[test]
fn natural_coefficients_vanish_for_a_straight_line() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, 1.0, 2.0, 3.0];
    let coefficients = natural_spline_coefficients(&xs, &ys, None);
    for c in coefficients {
        assert!(c.abs() <= 1e-9);
    }
}

#[test]
fn natural_endpoint_curvature_is_zero() {
    let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
    let ys = [0.0, 2.0, 1.0, 3.0, 0.5];
    let coefficients = natural_spline_coefficients(&xs, &ys, None);
    assert_eq!(coefficients.len(), 5);
    assert!(coefficients[0].abs() <= 1e-12);
    assert!(coefficients[4].abs() <= 1e-12);
}

#[test]
fn bezier_conversion_interpolates_thirds_in_x() {
    let (start, end) = bezier_control_points(
        ChartPoint::new(0.0, 0.0),
        ChartPoint::new(3.0, 3.0),
        0.0,
        0.0,
    );
    assert!((start.x - 1.0).abs() <= 1e-12);
    assert!((end.x - 2.0).abs() <= 1e-12);
    // Zero curvature degenerates to the straight chord.
    assert!((start.y - 1.0).abs() <= 1e-12);
    assert!((end.y - 2.0).abs() <= 1e-12);
}

#[test]
fn control_set_has_one_pair_per_gap() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [1.0, 4.0, 2.0, 5.0];
    for spline in [
        SplineType::Natural,
        SplineType::Monotonic,
        SplineType::Cardinal,
        SplineType::Clamped {
            start_slope: 1.0,
            end_slope: -1.0,
        },
    ] {
        let set = compute(spline, &xs, &ys);
        assert_eq!(set.len(), 3);
        assert_eq!(set.starts.len(), set.ends.len());
    }
}

#[test]
fn short_inputs_yield_empty_sets() {
    assert!(compute(SplineType::Natural, &[], &[]).is_empty());
    assert!(compute(SplineType::Monotonic, &[1.0], &[2.0]).is_empty());
    assert!(compute(SplineType::Cardinal, &[1.0], &[2.0]).is_empty());
}

#[test]
fn two_points_degenerate_to_one_straight_pair() {
    let set = compute(SplineType::Natural, &[0.0, 3.0], &[0.0, 3.0]);
    assert_eq!(set.len(), 1);
    assert!((set.starts[0].y - 1.0).abs() <= 1e-12);
    assert!((set.ends[0].y - 2.0).abs() <= 1e-12);
}

#[test]
fn duplicate_x_values_do_not_poison_the_set() {
    let xs = [0.0, 1.0, 1.0, 2.0];
    let ys = [0.0, 1.0, 3.0, 2.0];
    for spline in [SplineType::Natural, SplineType::Monotonic, SplineType::Cardinal] {
        let set = compute(spline, &xs, &ys);
        assert_eq!(set.len(), 3);
        for point in set.starts.iter().chain(set.ends.iter()) {
            assert!(point.x.is_finite(), "{spline:?} produced non-finite x");
            assert!(point.y.is_finite(), "{spline:?} produced non-finite y");
        }
    }
}

#[test]
fn monotonic_flattens_local_extrema() {
    // Opposite-sign adjacent slopes force the interior coefficient to zero.
    let xs = [0.0, 1.0, 2.0];
    let ys = [0.0, 5.0, 0.0];
    let coefficients = monotonic_coefficients(&xs, &ys);
    assert!(coefficients[1].abs() <= 1e-12);
}

#[test]
fn monotonic_uses_harmonic_mean_for_same_sign_slopes() {
    let xs = [0.0, 1.0, 2.0];
    let ys = [0.0, 1.0, 3.0];
    let coefficients = monotonic_coefficients(&xs, &ys);
    // d1 = d2 = 1, m1 = 1, m2 = 2 => 3*2 / (3/1 + 3/2) = 6 / 4.5
    assert!((coefficients[1] - 6.0 / 4.5).abs() <= 1e-12);
}

#[test]
fn cardinal_endpoint_tangents_are_one_sided() {
    let xs = [0.0, 1.0, 2.0];
    let ys = [0.0, 2.0, 4.0];
    let set = compute(SplineType::Cardinal, &xs, &ys);
    // First start control sits tangent/3 past the first point.
    assert!((set.starts[0].x - (0.0 + 1.0 / 3.0)).abs() <= 1e-12);
    assert!((set.starts[0].y - (0.0 + 2.0 / 3.0)).abs() <= 1e-12);
    // Interior tangent is half the neighbor span.
    assert!((set.ends[0].x - (1.0 - 1.0 / 3.0)).abs() <= 1e-12);
    assert!((set.ends[0].y - (2.0 - 2.0 / 3.0)).abs() <= 1e-12);
}

use series_geom::core::{AxisContext, BubblePoint, ChartPoint};
use series_geom::series::BubbleSeries;

#[test]
fn radii_interpolate_between_the_configured_bounds() {
    let mut series = BubbleSeries::new();
    series.set_radius_range(0.1, 0.5).expect("radius range");
    series.set_points(vec![
        BubblePoint::new(0.0, 1.0, 10.0).expect("bubble point"),
        BubblePoint::new(1.0, 2.0, 5.0).expect("bubble point"),
        BubblePoint::new(2.0, 3.0, 0.0).expect("bubble point"),
    ]);
    series.layout(&AxisContext::default()).expect("layout");

    let segments = series.segments();
    assert!((segments[0].radius_x - 0.5).abs() <= 1e-12);
    assert!((segments[1].radius_x - 0.3).abs() <= 1e-12);
    assert!((segments[2].radius_x - 0.1).abs() <= 1e-12);
}

#[test]
fn zero_size_spread_falls_back_to_the_minimum_radius() {
    let mut series = BubbleSeries::new();
    series.set_points(vec![
        BubblePoint::new(0.0, 1.0, 0.0).expect("bubble point"),
        BubblePoint::new(1.0, 2.0, 0.0).expect("bubble point"),
    ]);
    series.layout(&AxisContext::default()).expect("layout");

    for segment in series.segments() {
        assert!((segment.radius_x - 0.1).abs() <= 1e-12);
    }
}

#[test]
fn ellipse_containment_drives_the_hit_test() {
    let mut series = BubbleSeries::new();
    series.set_radius_range(0.5, 0.5).expect("radius range");
    series.set_points(vec![BubblePoint::new(0.0, 0.0, 1.0).expect("bubble point")]);
    series.layout(&AxisContext::default()).expect("layout");

    assert_eq!(series.data_point_index(ChartPoint::new(0.3, 0.3)), Some(0));
    assert_eq!(series.data_point_index(ChartPoint::new(0.4, 0.4)), None);
}

#[test]
fn invalid_radius_range_is_rejected() {
    let mut series = BubbleSeries::new();
    assert!(series.set_radius_range(0.5, 0.1).is_err());
    assert!(series.set_radius_range(-0.1, 0.5).is_err());
    assert!(series.set_radius_range(f64::NAN, 0.5).is_err());
}

#[test]
fn empty_bubbles_are_suppressed() {
    let mut series = BubbleSeries::new();
    series.set_points(vec![
        BubblePoint::new(0.0, f64::NAN, 3.0).expect("bubble point"),
        BubblePoint::new(1.0, 2.0, 3.0).expect("bubble point"),
    ]);
    series.layout(&AxisContext::default()).expect("layout");

    assert!(!series.segments()[0].visible);
    assert!(series.segments()[1].visible);
    // Hit tests skip the suppressed bubble.
    assert_eq!(series.data_point_index(ChartPoint::new(0.0, 0.0)), None);
}

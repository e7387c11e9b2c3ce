use series_geom::core::adornment::AdornmentPosition;
use series_geom::core::spline::SplineType;
use series_geom::core::{AxisContext, ChartPoint, EmptyPointMode, RangePoint};
use series_geom::series::SplineRangeAreaSeries;

fn band(values: &[(f64, f64)]) -> Vec<RangePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| RangePoint::new(i as f64, high, low).expect("point"))
        .collect()
}

#[test]
fn one_segment_per_contiguous_run() {
    let mut series = SplineRangeAreaSeries::new();
    series.set_points(band(&[
        (5.0, 1.0),
        (6.0, 2.0),
        (f64::NAN, f64::NAN),
        (7.0, 3.0),
        (8.0, 4.0),
        (9.0, 5.0),
    ]));
    series.layout(&AxisContext::default()).expect("layout");

    let segments = series.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].run_start, 0);
    assert_eq!(segments[0].len(), 2);
    assert_eq!(segments[1].run_start, 3);
    assert_eq!(segments[1].len(), 3);
}

#[test]
fn control_sets_cover_every_gap_of_a_run() {
    let mut series = SplineRangeAreaSeries::new();
    series.set_points(band(&[(5.0, 1.0), (7.0, 2.0), (6.0, 1.5), (8.0, 3.0)]));
    series.layout(&AxisContext::default()).expect("layout");

    let segment = &series.segments()[0];
    assert_eq!(segment.high_controls.len(), 3);
    assert_eq!(segment.low_controls.len(), 3);
}

#[test]
fn substitution_modes_rejoin_the_band() {
    let mut series = SplineRangeAreaSeries::new();
    series.set_points(band(&[(5.0, 1.0), (f64::NAN, f64::NAN), (7.0, 3.0)]));
    series.set_empty_point_mode(EmptyPointMode::Average);
    series.layout(&AxisContext::default()).expect("layout");

    assert_eq!(series.segments().len(), 1);
    let segment = &series.segments()[0];
    assert_eq!(segment.len(), 3);
    assert_eq!(segment.highs[1], 6.0);
    assert_eq!(segment.lows[1], 2.0);
}

#[test]
fn spline_type_changes_the_control_geometry() {
    let points = band(&[(1.0, 0.0), (4.0, 2.0), (2.0, 1.0), (5.0, 3.0)]);

    let mut natural = SplineRangeAreaSeries::new();
    natural.set_points(points.clone());
    natural.layout(&AxisContext::default()).expect("layout");

    let mut cardinal = SplineRangeAreaSeries::new();
    cardinal.set_points(points);
    cardinal.set_spline_type(SplineType::Cardinal);
    cardinal.layout(&AxisContext::default()).expect("layout");

    assert_ne!(
        natural.segments()[0].high_controls,
        cardinal.segments()[0].high_controls
    );
}

#[test]
fn range_adornments_pair_top_and_bottom_per_point() {
    let mut series = SplineRangeAreaSeries::new();
    series.set_points(band(&[(5.0, 1.0), (6.0, 2.0)]));
    series.set_adornment_position(AdornmentPosition::TopAndBottom);
    series.layout(&AxisContext::default()).expect("layout");

    let adornments = series.adornments();
    assert_eq!(adornments.len(), 4);
    assert_eq!(adornments[0].anchor.y, 5.0);
    assert_eq!(adornments[1].anchor.y, 1.0);
}

#[test]
fn hit_test_uses_the_nearest_band_column() {
    let mut series = SplineRangeAreaSeries::new();
    series.set_points(band(&[(5.0, 1.0), (6.0, 2.0), (7.0, 3.0)]));
    series.layout(&AxisContext::default()).expect("layout");

    assert_eq!(
        series.data_point_index(ChartPoint::new(1.2, 4.0)),
        Some(1)
    );
    assert_eq!(series.data_point_index(ChartPoint::new(1.2, 9.0)), None);
}

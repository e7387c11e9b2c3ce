use series_geom::core::{AxisContext, ChartPoint, OhlcPoint};
use series_geom::interaction::SelectionState;
use series_geom::series::{CandleSeries, SeriesKind};

fn candle_kind() -> SeriesKind {
    let mut series = CandleSeries::new();
    series.set_points(vec![
        OhlcPoint::new(0.0, 10.0, 13.0, 9.0, 12.0).expect("valid ohlc"),
        OhlcPoint::new(1.0, 12.0, 13.0, 10.0, 11.0).expect("valid ohlc"),
    ]);
    SeriesKind::Candle(series)
}

fn candle_segments(kind: &SeriesKind) -> &[series_geom::series::CandleSegment] {
    match kind {
        SeriesKind::Candle(series) => series.segments(),
        _ => &[],
    }
}

#[test]
fn hit_selects_and_repeat_hit_clears() {
    let mut kind = candle_kind();
    kind.layout(&AxisContext::default()).expect("layout");

    let mut selection = SelectionState::new();
    let on_first = ChartPoint::new(0.0, 11.0);

    assert_eq!(selection.select_at(&mut kind, on_first), Some(0));
    assert!(candle_segments(&kind)[0].selected);

    assert_eq!(selection.select_at(&mut kind, on_first), None);
    assert!(!candle_segments(&kind)[0].selected);
}

#[test]
fn hitting_another_point_moves_the_selection() {
    let mut kind = candle_kind();
    kind.layout(&AxisContext::default()).expect("layout");

    let mut selection = SelectionState::new();
    selection.select_at(&mut kind, ChartPoint::new(0.0, 11.0));
    selection.select_at(&mut kind, ChartPoint::new(1.0, 11.0));

    let segments = candle_segments(&kind);
    assert!(!segments[0].selected);
    assert!(segments[1].selected);
}

#[test]
fn missing_leaves_the_selection_alone() {
    let mut kind = candle_kind();
    kind.layout(&AxisContext::default()).expect("layout");

    let mut selection = SelectionState::new();
    selection.select_at(&mut kind, ChartPoint::new(0.0, 11.0));
    selection.select_at(&mut kind, ChartPoint::new(50.0, 50.0));

    assert_eq!(selection.selected(), Some(0));
    assert!(candle_segments(&kind)[0].selected);
}

#[test]
fn selection_survives_relayout() {
    let mut kind = candle_kind();
    kind.layout(&AxisContext::default()).expect("layout");

    let mut selection = SelectionState::new();
    selection.select_at(&mut kind, ChartPoint::new(0.0, 11.0));

    kind.layout(&AxisContext::default()).expect("layout");
    assert!(candle_segments(&kind)[0].selected);
}

#[test]
fn clear_resets_both_state_and_flags() {
    let mut kind = candle_kind();
    kind.layout(&AxisContext::default()).expect("layout");

    let mut selection = SelectionState::new();
    selection.select_at(&mut kind, ChartPoint::new(0.0, 11.0));
    selection.clear(&mut kind);

    assert_eq!(selection.selected(), None);
    assert!(!candle_segments(&kind)[0].selected);
}

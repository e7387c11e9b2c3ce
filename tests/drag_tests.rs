use series_geom::core::{ChartPoint, OhlcPoint, RangePoint, XyPoint};
use series_geom::interaction::DragChannel;
use series_geom::interaction::drag::{drag_update_ohlc, drag_update_range, drag_update_xy};

#[test]
fn xy_drag_writes_the_value_channel() {
    let mut points = vec![XyPoint::new(0.0, 5.0).expect("point")];
    let channel = drag_update_xy(&mut points, 0, ChartPoint::new(0.0, 7.5));
    assert_eq!(channel, Some(DragChannel::Y));
    assert_eq!(points[0].y, 7.5);
}

#[test]
fn out_of_range_drag_is_skipped() {
    let mut points = vec![XyPoint::new(0.0, 5.0).expect("point")];
    assert_eq!(drag_update_xy(&mut points, 9, ChartPoint::new(0.0, 7.5)), None);
    assert_eq!(points[0].y, 5.0);
}

#[test]
fn range_drag_picks_the_nearest_channel() {
    let mut points = vec![RangePoint::new(0.0, 10.0, 2.0).expect("point")];

    let channel = drag_update_range(&mut points, 0, ChartPoint::new(0.0, 9.0));
    assert_eq!(channel, Some(DragChannel::High));
    assert_eq!(points[0].high, 9.0);

    let channel = drag_update_range(&mut points, 0, ChartPoint::new(0.0, 3.0));
    assert_eq!(channel, Some(DragChannel::Low));
    assert_eq!(points[0].low, 3.0);
}

#[test]
fn ohlc_drag_clamps_body_channels_into_the_envelope() {
    let mut points = vec![OhlcPoint::new(0.0, 10.0, 13.0, 9.0, 12.0).expect("point")];

    // 11.5 is nearest to close (12); stays inside [9, 13].
    let channel = drag_update_ohlc(&mut points, 0, ChartPoint::new(0.0, 11.5));
    assert_eq!(channel, Some(DragChannel::Close));
    assert_eq!(points[0].close, 11.5);
}

#[test]
fn ohlc_drag_extends_the_envelope_through_high_and_low() {
    let mut points = vec![OhlcPoint::new(0.0, 10.0, 13.0, 9.0, 12.0).expect("point")];

    let channel = drag_update_ohlc(&mut points, 0, ChartPoint::new(0.0, 20.0));
    assert_eq!(channel, Some(DragChannel::High));
    assert_eq!(points[0].high, 20.0);

    let channel = drag_update_ohlc(&mut points, 0, ChartPoint::new(0.0, -3.0));
    assert_eq!(channel, Some(DragChannel::Low));
    assert_eq!(points[0].low, -3.0);
}

#[test]
fn ohlc_envelope_stays_consistent_after_any_drag() {
    let mut points = vec![OhlcPoint::new(0.0, 10.0, 13.0, 9.0, 12.0).expect("point")];
    for y in [-5.0, 0.0, 9.5, 11.0, 12.5, 30.0] {
        drag_update_ohlc(&mut points, 0, ChartPoint::new(0.0, y));
        let p = points[0];
        assert!(p.low <= p.high);
        assert!(p.open >= p.low && p.open <= p.high);
        assert!(p.close >= p.low && p.close <= p.high);
    }
}

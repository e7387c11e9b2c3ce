use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{ChartPoint, OhlcPoint, RangePoint, XyPoint};

/// Channel a drag gesture resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragChannel {
    Y,
    High,
    Low,
    Open,
    Close,
}

fn distance(value: f64, target: f64) -> OrderedFloat<f64> {
    OrderedFloat((value - target).abs())
}

fn clamp_into(value: f64, low: f64, high: f64) -> f64 {
    if low <= high {
        value.clamp(low, high)
    } else {
        value
    }
}

/// Writes the dragged value into a single-value series.
///
/// Out-of-range indices are skipped, never fatal. Returns the channel that
/// was written.
pub fn drag_update_xy(
    points: &mut [XyPoint],
    index: usize,
    new_point: ChartPoint,
) -> Option<DragChannel> {
    let Some(point) = points.get_mut(index) else {
        warn!(index, "ignoring drag past data boundary");
        return None;
    };
    point.y = new_point.y;
    Some(DragChannel::Y)
}

/// Writes the dragged value into the nearest channel of a range series.
pub fn drag_update_range(
    points: &mut [RangePoint],
    index: usize,
    new_point: ChartPoint,
) -> Option<DragChannel> {
    let Some(point) = points.get_mut(index) else {
        warn!(index, "ignoring drag past data boundary");
        return None;
    };

    if distance(point.high, new_point.y) <= distance(point.low, new_point.y) {
        point.high = new_point.y;
        Some(DragChannel::High)
    } else {
        point.low = new_point.y;
        Some(DragChannel::Low)
    }
}

/// Writes the dragged value into the nearest channel of an OHLC series,
/// clamped so the sample's low/high envelope stays consistent.
pub fn drag_update_ohlc(
    points: &mut [OhlcPoint],
    index: usize,
    new_point: ChartPoint,
) -> Option<DragChannel> {
    let Some(point) = points.get_mut(index) else {
        warn!(index, "ignoring drag past data boundary");
        return None;
    };

    let y = new_point.y;
    let candidates = [
        (DragChannel::Open, distance(point.open, y)),
        (DragChannel::Close, distance(point.close, y)),
        (DragChannel::High, distance(point.high, y)),
        (DragChannel::Low, distance(point.low, y)),
    ];
    let channel = candidates
        .iter()
        .min_by_key(|(_, d)| *d)
        .map(|&(channel, _)| channel)?;

    match channel {
        DragChannel::Open => point.open = clamp_into(y, point.low, point.high),
        DragChannel::Close => point.close = clamp_into(y, point.low, point.high),
        DragChannel::High => point.high = y.max(point.open.max(point.close)),
        DragChannel::Low => point.low = y.min(point.open.min(point.close)),
        DragChannel::Y => {}
    }
    Some(channel)
}
